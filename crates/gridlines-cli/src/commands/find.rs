//! Find command handler: one synchronous search on an empty grid.

use anyhow::{Context, Result};
use serde::Serialize;

use gridlines_lib::{GridConfig, PathFinder, Position};

use crate::output::{format_path, OutputFormat};

#[derive(Debug, Serialize)]
struct FoundPath<'a> {
    start: Position,
    end: Position,
    length: usize,
    path: &'a [Position],
}

/// Handle the find subcommand.
///
/// Returns the rendered result; search failures are returned as errors.
pub fn handle_find_command(
    config: GridConfig,
    from: Position,
    to: Position,
    format: OutputFormat,
) -> Result<String> {
    let mut finder = PathFinder::from_config(config).context("failed to create pathfinder")?;
    let path = finder.find_path(from, to)?;

    match format {
        OutputFormat::Json => {
            let record = FoundPath {
                start: from,
                end: to,
                length: path.len(),
                path: &path,
            };
            serde_json::to_string(&record).context("failed to serialize path")
        }
        OutputFormat::Text => Ok(format!(
            "Path {from} -> {to}: {} cells\n{}",
            path.len(),
            format_path(&path)
        )),
    }
}
