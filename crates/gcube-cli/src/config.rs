use crate::cli::ReadArgs;
use crate::error::{CliError, Result};
use gcube::core::io::cube::CubeReadOptions;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialReaderConfig {
    #[serde(rename = "max-voxels")]
    max_voxels: Option<usize>,
    #[serde(rename = "perceive-bonds")]
    perceive_bonds: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialBondingConfig {
    tolerance: Option<f64>,
    #[serde(rename = "min-distance")]
    min_distance: Option<f64>,
}

/// Reader settings as found in a TOML configuration file; every key is optional.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialReadConfig {
    reader: Option<PartialReaderConfig>,
    bonding: Option<PartialBondingConfig>,
}

impl PartialReadConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Loads the configuration file if one was given, otherwise starts from an empty config.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Resolves the final reader options: CLI overrides win over the file, which wins over
    /// library defaults.
    pub fn merge_with_cli(self, args: &ReadArgs) -> Result<CubeReadOptions> {
        let mut options = CubeReadOptions::default();
        let reader = self.reader.unwrap_or_default();
        let bonding = self.bonding.unwrap_or_default();

        if let Some(max_voxels) = args.max_voxels.or(reader.max_voxels) {
            options.max_voxels = max_voxels;
        }
        if let Some(perceive_bonds) = reader.perceive_bonds {
            options.perceive_bonds = perceive_bonds;
        }
        if args.no_bonds {
            options.perceive_bonds = false;
        }
        if let Some(tolerance) = args.bond_tolerance.or(bonding.tolerance) {
            options.bonding.tolerance = tolerance;
        }
        if let Some(min_distance) = bonding.min_distance {
            options.bonding.min_distance = min_distance;
        }

        if options.max_voxels == 0 {
            return Err(CliError::Config(
                "'max-voxels' must be greater than zero".to_string(),
            ));
        }
        if !options.bonding.tolerance.is_finite() || options.bonding.tolerance < 0.0 {
            return Err(CliError::Config(format!(
                "'tolerance' must be a non-negative number, got {}",
                options.bonding.tolerance
            )));
        }
        if !options.bonding.min_distance.is_finite() || options.bonding.min_distance < 0.0 {
            return Err(CliError::Config(format!(
                "'min-distance' must be a non-negative number, got {}",
                options.bonding.min_distance
            )));
        }

        debug!(?options, "Resolved reader options.");
        Ok(options)
    }
}
