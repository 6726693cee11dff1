//! gridlines library entry points.
//!
//! This crate draws lines between pairs of grid cells as 8-connected A*
//! paths that never cross or touch previously drawn lines. [`PathFinder`]
//! runs the search and owns the growing obstacle set; [`Dispatcher`] pairs
//! incoming points and runs one search at a time in the background. Front
//! ends (the CLI, a canvas window) should only depend on the items exported
//! here.
//!

#![deny(warnings)]

pub mod config;
pub mod dispatcher;
pub mod error;
mod frontier;
pub mod pathfinder;
pub mod position;

pub use config::GridConfig;
pub use dispatcher::{DispatchEvent, Dispatcher, JobId};
pub use error::{Error, Result};
pub use pathfinder::{PathFinder, PathSearch};
pub use position::Position;

#[cfg(test)]
pub(crate) mod test_helpers;
