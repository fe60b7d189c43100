//! CLI subcommands

pub mod diagnose;
pub mod predict;
pub mod train;
