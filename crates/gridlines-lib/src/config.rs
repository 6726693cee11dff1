//! Grid configuration.
//!
//! [`GridConfig`] captures everything fixed at [`PathFinder`](crate::PathFinder)
//! construction time. It can be built in code, or loaded from a JSON file where
//! every field is optional:
//!
//! ```json
//! { "width": 64, "height": 48, "search_delay_ms": 250 }
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::position::Position;

/// Default canvas width in cells.
pub const DEFAULT_WIDTH: i32 = 1280;
/// Default canvas height in cells.
pub const DEFAULT_HEIGHT: i32 = 720;

/// Dimensions and behaviour of the drawing grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub width: i32,
    pub height: i32,
    /// Artificial latency added to every search, in milliseconds.
    pub search_delay_ms: u64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            search_delay_ms: 0,
        }
    }
}

impl GridConfig {
    /// Create a configuration for a `width` x `height` grid without delay.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            search_delay_ms: 0,
        }
    }

    /// Load a configuration from a JSON file and validate it.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: GridConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        tracing::debug!(
            path = %path.display(),
            width = config.width,
            height = config.height,
            "loaded grid configuration"
        );
        Ok(config)
    }

    /// Reject grids that cannot hold a single cell.
    pub fn validate(&self) -> Result<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(Error::InvalidGrid {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    pub fn with_search_delay(mut self, delay: Duration) -> Self {
        self.search_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn search_delay(&self) -> Duration {
        Duration::from_millis(self.search_delay_ms)
    }

    /// Whether `position` lies within `[0,width) x [0,height)`.
    pub fn contains(&self, position: Position) -> bool {
        (0..self.width).contains(&position.x) && (0..self.height).contains(&position.y)
    }
}
