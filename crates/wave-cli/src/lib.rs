//! CLI library components for the survey wave merger.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
