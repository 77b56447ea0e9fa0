//! CLI subcommands.

pub mod common;
pub mod locator;
pub mod style;
