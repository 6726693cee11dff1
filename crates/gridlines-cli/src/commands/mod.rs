// Module exports for CLI subcommands
//
// Each module handles a specific CLI subcommand. main.rs parses arguments,
// resolves the grid configuration, and dispatches to these handlers.

pub mod draw;
pub mod find;

use std::path::Path;

use anyhow::{Context, Result};
use gridlines_lib::GridConfig;

/// Grid settings given on the command line, applied over a config file.
#[derive(Debug, Clone, Default)]
pub struct GridOverrides {
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub delay_ms: Option<u64>,
}

/// Load the config file (if any), then apply command-line overrides.
pub fn resolve_grid(config_path: Option<&Path>, overrides: &GridOverrides) -> Result<GridConfig> {
    let mut config = match config_path {
        Some(path) => GridConfig::load(path)
            .with_context(|| format!("failed to load grid configuration from {}", path.display()))?,
        None => GridConfig::default(),
    };

    if let Some(width) = overrides.width {
        config.width = width;
    }
    if let Some(height) = overrides.height {
        config.height = height;
    }
    if let Some(delay) = overrides.delay_ms {
        config.search_delay_ms = delay;
    }

    config.validate().context("invalid grid configuration")?;
    tracing::debug!(?config, "resolved grid configuration");
    Ok(config)
}
