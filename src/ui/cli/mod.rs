pub mod args;
pub mod commands;
mod output;

pub use args::{Cli, Command};
