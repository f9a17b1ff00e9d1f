//! Command-line front end

pub mod args;
pub mod commands;
pub mod render;

pub use args::{Cli, Command, PrefCommand};
pub use commands::execute;
