use crate::cli::ConvertArgs;
use crate::config::PartialReadConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::Spinner;
use gcube::core::io::cube::{CubeError, CubeFile};
use gcube::core::io::traits::MolecularFile;
use gcube::workflows::extract;
use std::path::Path;
use tracing::{info, warn};

pub fn run(args: ConvertArgs, config_path: Option<&Path>) -> Result<()> {
    let options = PartialReadConfig::load(config_path)?.merge_with_cli(&args.read)?;
    let (mut system, _metadata) = super::read_cube(&args.input, &options)?;

    if let Some(index) = args.grid {
        info!("Selecting grid #{} for output.", index);
        system = extract::select_grid(&system, index)?;
    }

    match system.cube_count() {
        0 => {
            return Err(CliError::FileWriting {
                path: args.output.clone(),
                source: CubeError::NoGrids,
            });
        }
        1 => {}
        n => {
            warn!(
                "Input holds {} grids; only the first is written. Use --grid to choose another.",
                n
            );
        }
    }

    info!("Writing cube file to {:?}", &args.output);
    let spinner = Spinner::new(format!("Writing {}", args.output.display()));
    CubeFile::write_system_to_path(&system, &args.output).map_err(|e| {
        CliError::FileWriting {
            path: args.output.clone(),
            source: e,
        }
    })?;
    spinner.finish(format!("✓ Cube file written to: {}", args.output.display()));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ReadArgs;

    const TWO_GRID_CUBE: &str = "\
pair
two orbitals
   -1    0.000000    0.000000    0.000000
    1    1.000000    0.000000    0.000000
    1    0.000000    1.000000    0.000000
    2    0.000000    0.000000    1.000000
    1    1.000000    0.000000    0.000000    0.000000
    2    5    6
  1.00000e+00  2.00000e+00
  3.00000e+00  4.00000e+00
";

    const EMPTY_CUBE: &str = "\
empty
no grids
   -1    0.000000    0.000000    0.000000
    1    1.000000    0.000000    0.000000
    1    0.000000    1.000000    0.000000
    1    0.000000    0.000000    1.000000
    1    1.000000    0.000000    0.000000    0.000000
    0
";

    fn args(dir: &Path, input: &str, grid: Option<usize>) -> ConvertArgs {
        ConvertArgs {
            input: dir.join(input),
            output: dir.join("out.cube"),
            grid,
            read: ReadArgs::default(),
        }
    }

    #[test]
    fn convert_writes_selected_grid() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("in.cube"), TWO_GRID_CUBE).unwrap();

        run(args(dir.path(), "in.cube", Some(1)), None).unwrap();

        let written = std::fs::read_to_string(dir.path().join("out.cube")).unwrap();
        assert!(written.starts_with("Gaussian Cube file generated by gcube.\npair\n"));
        assert!(written.contains("3.00000e+00  4.00000e+00"));
        assert!(!written.contains("1.00000e+00  2.00000e+00"));
    }

    #[test]
    fn convert_rejects_out_of_range_grid() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("in.cube"), TWO_GRID_CUBE).unwrap();

        let result = run(args(dir.path(), "in.cube", Some(2)), None);
        assert!(matches!(result, Err(CliError::Extract(_))));
        assert!(!dir.path().join("out.cube").exists());
    }

    #[test]
    fn convert_without_grids_creates_no_output() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("in.cube"), EMPTY_CUBE).unwrap();

        let result = run(args(dir.path(), "in.cube", None), None);
        assert!(matches!(
            result,
            Err(CliError::FileWriting {
                source: CubeError::NoGrids,
                ..
            })
        ));
        assert!(!dir.path().join("out.cube").exists());
    }
}
