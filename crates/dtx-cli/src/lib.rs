//! CLI library components for the DTX host.

pub mod commands;
pub mod logging;
pub mod types;
