use nalgebra::{Point3, Vector3};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum GridError {
    #[error(
        "Grid buffer holds {actual} values but dimensions {dimensions:?} require {expected}"
    )]
    LengthMismatch {
        dimensions: [usize; 3],
        expected: usize,
        actual: usize,
    },
}

/// An axis-aligned lattice of scalar samples.
///
/// Samples are stored in row-major order with the x index varying slowest and the z index
/// varying fastest, which is the scan order of cube files. All lengths are in Ångström.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cube {
    /// Position of the sample with indices `(0, 0, 0)`.
    min: Point3<f64>,
    /// Distance between neighbouring samples along each axis.
    spacing: Vector3<f64>,
    /// Number of samples along each axis.
    dimensions: [usize; 3],
    /// The samples, always `dimensions[0] * dimensions[1] * dimensions[2]` of them.
    data: Vec<f32>,
}

impl Cube {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a lattice and its samples in one step.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::LengthMismatch`] if `data` does not hold exactly one sample per
    /// lattice point.
    pub fn from_samples(
        min: Point3<f64>,
        dimensions: [usize; 3],
        spacing: Vector3<f64>,
        data: Vec<f32>,
    ) -> Result<Self, GridError> {
        let mut cube = Self {
            min,
            spacing,
            dimensions,
            data: Vec::new(),
        };
        cube.set_data(data)?;
        Ok(cube)
    }

    /// Sets the geometry of the lattice.
    ///
    /// The sample buffer is reset to `nx * ny * nz` zeros, so it always matches the lattice.
    ///
    /// # Arguments
    ///
    /// * `min` - Position of the first sample.
    /// * `dimensions` - Number of samples along x, y and z.
    /// * `spacing` - Distance between samples along x, y and z.
    pub fn set_limits(&mut self, min: Point3<f64>, dimensions: [usize; 3], spacing: Vector3<f64>) {
        self.min = min;
        self.dimensions = dimensions;
        self.spacing = spacing;
        self.data.clear();
        self.data.resize(self.voxel_count(), 0.0);
    }

    /// Replaces the sample buffer.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::LengthMismatch`] if the buffer length differs from the product of
    /// the dimensions; the stored samples are left untouched in that case.
    pub fn set_data(&mut self, data: Vec<f32>) -> Result<(), GridError> {
        let expected = self.voxel_count();
        if data.len() != expected {
            return Err(GridError::LengthMismatch {
                dimensions: self.dimensions,
                expected,
                actual: data.len(),
            });
        }
        self.data = data;
        Ok(())
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn min(&self) -> Point3<f64> {
        self.min
    }

    /// Position of the last sample, `min + spacing * (dimensions - 1)` per axis.
    pub fn max(&self) -> Point3<f64> {
        let steps = Vector3::from_fn(|axis, _| self.dimensions[axis].saturating_sub(1) as f64);
        self.min + self.spacing.component_mul(&steps)
    }

    pub fn spacing(&self) -> Vector3<f64> {
        self.spacing
    }

    pub fn dimensions(&self) -> [usize; 3] {
        self.dimensions
    }

    pub fn voxel_count(&self) -> usize {
        self.dimensions.iter().product()
    }

    /// Volume of a single voxel in cubic Ångström.
    pub fn voxel_volume(&self) -> f64 {
        self.spacing.x * self.spacing.y * self.spacing.z
    }

    /// Flat buffer index of the sample at `(i, j, k)`, or `None` outside the lattice.
    pub fn index(&self, i: usize, j: usize, k: usize) -> Option<usize> {
        let [nx, ny, nz] = self.dimensions;
        if i >= nx || j >= ny || k >= nz {
            return None;
        }
        Some((i * ny + j) * nz + k)
    }

    pub fn value(&self, i: usize, j: usize, k: usize) -> Option<f32> {
        self.index(i, j, k).and_then(|idx| self.data.get(idx).copied())
    }

    /// Cartesian position of the sample at `(i, j, k)`.
    pub fn position(&self, i: usize, j: usize, k: usize) -> Point3<f64> {
        self.min
            + Vector3::new(
                self.spacing.x * i as f64,
                self.spacing.y * j as f64,
                self.spacing.z * k as f64,
            )
    }
}
