use crate::cli::InfoArgs;
use crate::config::PartialReadConfig;
use crate::error::Result;
use gcube::core::models::element;
use gcube::workflows::inspect::{self, CubeSummary};
use std::fmt::Write;
use std::path::Path;
use tracing::info;

pub fn run(args: InfoArgs, config_path: Option<&Path>) -> Result<()> {
    let options = PartialReadConfig::load(config_path)?.merge_with_cli(&args.read)?;
    let (system, metadata) = super::read_cube(&args.input, &options)?;

    info!("Summarizing cube file contents...");
    let summary = inspect::summarize(&system, &metadata);
    print!("{}", render_summary(&summary));
    Ok(())
}

fn render_summary(summary: &CubeSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Title:    {}", summary.title);
    let _ = writeln!(out, "Comment:  {}", summary.comment);

    let composition = summary
        .composition
        .iter()
        .map(|&(z, count)| format!("{}{}", element::symbol(z), count))
        .collect::<Vec<_>>()
        .join(" ");
    let _ = writeln!(
        out,
        "Atoms:    {} ({})",
        summary.atom_count,
        if composition.is_empty() { "none" } else { &composition }
    );
    let _ = writeln!(out, "Bonds:    {}", summary.bond_count);
    let _ = writeln!(
        out,
        "Grids:    {} ({})",
        summary.grids.len(),
        if summary.multi_grid { "multi-grid header" } else { "single grid" }
    );

    for grid in &summary.grids {
        let [nx, ny, nz] = grid.dimensions;
        match grid.identifier {
            Some(id) => {
                let _ = writeln!(out, "\nGrid #{} (id {})", grid.index, id);
            }
            None => {
                let _ = writeln!(out, "\nGrid #{}", grid.index);
            }
        }
        let _ = writeln!(out, "  Dimensions: {} x {} x {}", nx, ny, nz);
        let _ = writeln!(
            out,
            "  Origin:     ({:.6}, {:.6}, {:.6}) Å",
            grid.origin.x, grid.origin.y, grid.origin.z
        );
        let _ = writeln!(
            out,
            "  Spacing:    ({:.6}, {:.6}, {:.6}) Å",
            grid.spacing.x, grid.spacing.y, grid.spacing.z
        );
        match &grid.statistics {
            Some(stats) => {
                let _ = writeln!(
                    out,
                    "  Values:     min {:.6e}, max {:.6e}, mean {:.6e}",
                    stats.min, stats.max, stats.mean
                );
                let _ = writeln!(out, "  Integral:   {:.6e}", stats.integral);
            }
            None => {
                let _ = writeln!(out, "  Values:     (empty)");
            }
        }
    }
    out
}
