//! gridlines CLI library.
//!
//! This crate provides the command handlers, logging setup, and output
//! formatting behind the `gridlines` binary.

pub mod commands;
pub mod logging;
pub mod output;
pub mod terminal;
