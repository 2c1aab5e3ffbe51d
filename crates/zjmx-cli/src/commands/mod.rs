//! CLI command implementations

mod get;

pub use get::{get_command, resolve, Exchange, MissingOptions, Options};
