//! Small helpers shared across the workspace crates.

pub mod env;

pub use env::{ConfigError, get_env_var, parse_env_var};
