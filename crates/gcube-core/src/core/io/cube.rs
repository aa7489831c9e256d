use super::text::{self, MalformedNumber};
use super::tokenizer::TokenReader;
use crate::core::io::traits::MolecularFile;
use crate::core::models::cube::{Cube, GridError};
use crate::core::models::system::MolecularSystem;
use crate::core::utils::bonding::BondPerception;
use crate::core::utils::units::{
    point_angstrom_to_bohr, point_bohr_to_angstrom, vector_angstrom_to_bohr,
    vector_bohr_to_angstrom,
};
use nalgebra::{Point3, Vector3};
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, trace};

/// First line of every file written by [`CubeFile`].
pub const GENERATOR_BANNER: &str = "Gaussian Cube file generated by gcube.";

/// Default upper bound on the number of samples in a single grid (2^27, 512 MiB of `f32`).
pub const DEFAULT_MAX_VOXELS: usize = 1 << 27;

const VALUES_PER_LINE: usize = 6;

/// Upper bound on the initial allocation of a sample buffer; larger grids grow as they are read.
const INITIAL_BUFFER_CAPACITY: usize = 1 << 20;

/// How the grids of a file are laid out, decided by the sign of the atom count.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GridSet {
    /// Non-negative atom count: exactly one grid follows the geometry.
    #[default]
    Single,
    /// Negative atom count: a grid count and one identifier per grid precede the data.
    Multiple { identifiers: Vec<u32> },
}

impl GridSet {
    pub fn grid_count(&self) -> usize {
        match self {
            GridSet::Single => 1,
            GridSet::Multiple { identifiers } => identifiers.len(),
        }
    }
}

/// Header information of a cube file that is not part of the molecular model.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CubeMetadata {
    /// Line 1, verbatim. Also stored as the system name.
    pub title: String,
    /// Line 2, verbatim. Usually describes the field type.
    pub comment: String,
    pub grid_set: GridSet,
}

/// Options controlling how cube files are decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct CubeReadOptions {
    /// Largest accepted `nx * ny * nz` of a grid; checked before any sample buffer is allocated.
    pub max_voxels: usize,
    /// Whether to infer bonds from the decoded geometry.
    pub perceive_bonds: bool,
    pub bonding: BondPerception,
}

impl Default for CubeReadOptions {
    fn default() -> Self {
        Self {
            max_voxels: DEFAULT_MAX_VOXELS,
            perceive_bonds: true,
            bonding: BondPerception::default(),
        }
    }
}

/// Broad classification of [`CubeError`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubeErrorKind {
    /// The input does not follow the cube grammar.
    MalformedInput,
    /// The model cannot be written as a cube file.
    InvalidModelState,
    /// The underlying stream failed.
    Io,
}

#[derive(Debug, Error)]
pub enum CubeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: MalformedNumber,
    },
    #[error("Unexpected end of file while reading {expected}")]
    UnexpectedEof { expected: &'static str },
    #[error("Line {line} has no field {index} ({expected})")]
    MissingField {
        line: usize,
        index: usize,
        expected: &'static str,
    },
    #[error("Invalid voxel count {count} along axis {axis}; counts must be positive")]
    InvalidDimensions { axis: usize, count: i64 },
    #[error("Grid dimensions {dimensions:?} exceed the limit of {limit} voxels")]
    TooManyVoxels { dimensions: [usize; 3], limit: usize },
    #[error("The molecule has no grids to write")]
    NoGrids,
    /// An ordered atom index with no atom behind it. The public API never removes atoms, so
    /// this only guards against an inconsistent model.
    #[error("Internal error: Atom invalid. (index {index})")]
    InvalidAtom { index: usize },
    #[error(transparent)]
    Grid(#[from] GridError),
}

impl CubeError {
    pub fn kind(&self) -> CubeErrorKind {
        match self {
            CubeError::Io(_) => CubeErrorKind::Io,
            CubeError::NoGrids | CubeError::InvalidAtom { .. } => CubeErrorKind::InvalidModelState,
            CubeError::Parse { .. }
            | CubeError::UnexpectedEof { .. }
            | CubeError::MissingField { .. }
            | CubeError::InvalidDimensions { .. }
            | CubeError::TooManyVoxels { .. }
            | CubeError::Grid(_) => CubeErrorKind::MalformedInput,
        }
    }
}

/// Decoding state over one input stream.
struct CubeParser<R> {
    tokens: TokenReader<R>,
}

impl<R: BufRead> CubeParser<R> {
    fn new(reader: R) -> Self {
        Self {
            tokens: TokenReader::new(reader),
        }
    }

    fn line(&mut self, expected: &'static str) -> Result<String, CubeError> {
        self.tokens
            .read_line()?
            .ok_or(CubeError::UnexpectedEof { expected })
    }

    fn token<T: FromStr>(&mut self, expected: &'static str) -> Result<T, CubeError> {
        let parsed = self.tokens.next_token()?.map(text::parse_number::<T>);
        match parsed {
            None => Err(CubeError::UnexpectedEof { expected }),
            Some(Ok(value)) => Ok(value),
            Some(Err(source)) => Err(CubeError::Parse {
                line: self.tokens.line_number(),
                source,
            }),
        }
    }

    /// Reads one line and splits it into space-separated fields.
    fn fields(&mut self, expected: &'static str) -> Result<(usize, Vec<String>), CubeError> {
        let line = self.line(expected)?;
        let fields = text::split(text::trim(&line), ' ', true)
            .into_iter()
            .map(str::to_string)
            .collect();
        Ok((self.tokens.line_number(), fields))
    }
}

fn field<T: FromStr>(
    fields: &[String],
    index: usize,
    line: usize,
    expected: &'static str,
) -> Result<T, CubeError> {
    let token = fields.get(index).ok_or(CubeError::MissingField {
        line,
        index,
        expected,
    })?;
    text::parse_number(token).map_err(|source| CubeError::Parse { line, source })
}

fn checked_dimensions(counts: [i64; 3], limit: usize) -> Result<[usize; 3], CubeError> {
    let mut dimensions = [0usize; 3];
    for (axis, &count) in counts.iter().enumerate() {
        if count <= 0 {
            return Err(CubeError::InvalidDimensions { axis, count });
        }
        let Ok(count) = usize::try_from(count) else {
            return Err(CubeError::TooManyVoxels { dimensions, limit });
        };
        dimensions[axis] = count;
    }
    let total = dimensions
        .iter()
        .try_fold(1usize, |acc, &n| acc.checked_mul(n));
    match total {
        Some(total) if total <= limit => Ok(dimensions),
        _ => Err(CubeError::TooManyVoxels { dimensions, limit }),
    }
}

fn write_fixed_int(writer: &mut impl Write, number: usize) -> io::Result<()> {
    write!(writer, "{:>5}", number)
}

fn write_fixed_float(writer: &mut impl Write, number: f64) -> io::Result<()> {
    write!(writer, "{:>12.6}", number)
}

/// Formats a number like C's `%.{precision}e`: signed exponent with at least two digits.
fn format_scientific(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let formatted = format!("{:.*e}", precision, value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => formatted,
    }
}

pub struct CubeFile;

impl CubeFile {
    /// Reads a cube file with explicit options.
    ///
    /// # Errors
    ///
    /// Returns an error classified as [`CubeErrorKind::MalformedInput`] if a number fails to
    /// parse, a positional field is missing, the stream ends early, or the grid dimensions are
    /// not positive or exceed `options.max_voxels`.
    pub fn read_with_options(
        reader: &mut impl BufRead,
        options: &CubeReadOptions,
    ) -> Result<(MolecularSystem, CubeMetadata), CubeError> {
        let mut parser = CubeParser::new(reader);
        let mut system = MolecularSystem::new();

        let title = parser.line("title line")?;
        system.set_name(title.clone());
        let comment = parser.line("comment line")?;

        let n_atoms: i64 = parser.token("atom count")?;
        let mut origin = Point3::origin();
        for axis in 0..3 {
            origin[axis] = parser.token("grid origin")?;
        }
        parser.tokens.skip_line()?;

        let mut counts = [0i64; 3];
        let mut spacing = Vector3::zeros();
        for axis in 0..3 {
            let (line, fields) = parser.fields("grid axis")?;
            counts[axis] = field(&fields, 0, line, "voxel count")?;
            spacing[axis] = field(&fields, axis + 1, line, "voxel spacing")?;
        }
        debug!(n_atoms, ?counts, "Parsed cube header.");

        for _ in 0..n_atoms.unsigned_abs() {
            let (line, fields) = parser.fields("atom record")?;
            let atomic_number: u8 = field(&fields, 0, line, "atomic number")?;
            let mut position = Point3::origin();
            for axis in 0..3 {
                position[axis] = field(&fields, axis + 2, line, "atom coordinate")?;
            }
            let atom_id = system.add_atom(atomic_number);
            if let Some(atom) = system.atom_mut(atom_id) {
                atom.position = point_bohr_to_angstrom(&position);
            }
        }

        let grid_set = if n_atoms < 0 {
            let n_cubes: u32 = parser.token("grid count")?;
            let mut identifiers = Vec::new();
            for _ in 0..n_cubes {
                identifiers.push(parser.token("grid identifier")?);
            }
            parser.tokens.skip_line()?;
            GridSet::Multiple { identifiers }
        } else {
            GridSet::Single
        };

        if options.perceive_bonds {
            let bond_count = system.perceive_bonds_simple(&options.bonding);
            debug!(bond_count, "Perceived bonds from geometry.");
        }

        let origin = point_bohr_to_angstrom(&origin);
        let spacing = vector_bohr_to_angstrom(&spacing);
        let grid_count = grid_set.grid_count();
        let dimensions = if grid_count > 0 {
            checked_dimensions(counts, options.max_voxels)?
        } else {
            [0; 3]
        };
        let voxel_count: usize = dimensions.iter().product();

        for grid_index in 0..grid_count {
            let mut values = Vec::with_capacity(voxel_count.min(INITIAL_BUFFER_CAPACITY));
            for _ in 0..voxel_count {
                values.push(parser.token::<f32>("grid value")?);
            }
            parser.tokens.skip_line()?;

            system.push_cube(Cube::from_samples(origin, dimensions, spacing, values)?);
            trace!(grid_index, voxel_count, "Read grid.");
        }

        debug!(
            atoms = system.atom_count(),
            grids = system.cube_count(),
            "Finished reading cube file."
        );

        Ok((
            system,
            CubeMetadata {
                title,
                comment,
                grid_set,
            },
        ))
    }
}

impl MolecularFile for CubeFile {
    type Metadata = CubeMetadata;
    type Error = CubeError;

    fn read_from(
        reader: &mut impl BufRead,
    ) -> Result<(MolecularSystem, Self::Metadata), Self::Error> {
        Self::read_with_options(reader, &CubeReadOptions::default())
    }

    /// Writes the first grid of `system` together with its geometry.
    ///
    /// Only grid 0 is written, even if more grids are attached.
    ///
    /// # Errors
    ///
    /// Returns [`CubeError::NoGrids`] without writing anything if the system has no grid, and
    /// [`CubeError::InvalidAtom`] if an atom slot cannot be resolved.
    fn write_system_to(
        system: &MolecularSystem,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        let cube = system.cube(0).ok_or(CubeError::NoGrids)?;
        let min = point_angstrom_to_bohr(&cube.min());
        let spacing = vector_angstrom_to_bohr(&cube.spacing());
        let dimensions = cube.dimensions();

        writeln!(writer, "{}", GENERATOR_BANNER)?;
        writeln!(writer, "{}", system.name())?;

        let atom_count = system.atom_count();
        write_fixed_int(writer, atom_count)?;
        for axis in 0..3 {
            write_fixed_float(writer, min[axis])?;
        }
        write_fixed_int(writer, 1)?;
        writeln!(writer)?;

        for axis in 0..3 {
            write_fixed_int(writer, dimensions[axis])?;
            for component in 0..3 {
                let value = if component == axis { spacing[axis] } else { 0.0 };
                write_fixed_float(writer, value)?;
            }
            writeln!(writer)?;
        }

        for index in 0..atom_count {
            let atom = system
                .atom_at(index)
                .ok_or(CubeError::InvalidAtom { index })?;
            let position = point_angstrom_to_bohr(&atom.position);
            write_fixed_int(writer, atom.atomic_number as usize)?;
            write_fixed_float(writer, 0.0)?;
            for axis in 0..3 {
                write_fixed_float(writer, position[axis])?;
            }
            writeln!(writer)?;
        }

        for (i, &value) in cube.data().iter().enumerate() {
            write!(writer, "{:>13}", format_scientific(f64::from(value), 5))?;
            if i % VALUES_PER_LINE == VALUES_PER_LINE - 1 {
                writeln!(writer)?;
            }
        }

        debug!(
            atoms = atom_count,
            voxels = cube.data().len(),
            skipped_grids = system.cube_count() - 1,
            "Finished writing cube file."
        );
        Ok(())
    }
}
