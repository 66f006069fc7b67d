//! Command-line interface.

mod args;
pub mod init;
pub mod transform;

pub use args::{Cli, Commands, TransformArgs};
