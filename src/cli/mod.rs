//! Command-line interface: argument definitions and commands

pub mod args;
pub mod commands;

pub use args::{Cli, Commands};
