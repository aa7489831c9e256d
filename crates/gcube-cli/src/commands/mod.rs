pub mod convert;
pub mod info;

use crate::error::{CliError, Result};
use crate::utils::progress::Spinner;
use gcube::core::io::cube::{CubeFile, CubeMetadata, CubeReadOptions};
use gcube::core::models::system::MolecularSystem;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

/// Opens and decodes a cube file, mapping decode failures to [`CliError::FileParsing`].
pub(crate) fn read_cube(
    path: &Path,
    options: &CubeReadOptions,
) -> Result<(MolecularSystem, CubeMetadata)> {
    info!("Loading cube file from {:?}", path);
    let file = File::open(path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    let mut reader = BufReader::new(file);

    let spinner = Spinner::new(format!("Reading {}", path.display()));
    let result =
        CubeFile::read_with_options(&mut reader, options).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
    spinner.finish(format!("✓ Read {}", path.display()));

    info!(
        "Loaded {} atom(s) and {} grid(s).",
        result.0.atom_count(),
        result.0.cube_count()
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TINY_CUBE: &str = "\
tiny
comment
    1    0.000000    0.000000    0.000000
    1    1.000000    0.000000    0.000000
    1    0.000000    1.000000    0.000000
    2    0.000000    0.000000    1.000000
    1    1.000000    0.000000    0.000000    0.000000
  1.00000e+00  2.00000e+00
";

    #[test]
    fn read_cube_decodes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.cube");
        std::fs::write(&path, TINY_CUBE).unwrap();

        let (system, metadata) = read_cube(&path, &CubeReadOptions::default()).unwrap();
        assert_eq!(metadata.title, "tiny");
        assert_eq!(system.atom_count(), 1);
        assert_eq!(system.cube_count(), 1);
        assert_eq!(system.cubes()[0].data(), &[1.0, 2.0]);
    }

    #[test]
    fn read_cube_reports_missing_and_malformed_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.cube");
        assert!(matches!(
            read_cube(&missing, &CubeReadOptions::default()),
            Err(CliError::FileParsing { .. })
        ));

        let broken = dir.path().join("broken.cube");
        std::fs::write(&broken, "title\ncomment\n    x\n").unwrap();
        assert!(matches!(
            read_cube(&broken, &CubeReadOptions::default()),
            Err(CliError::FileParsing { .. })
        ));
    }
}
