pub mod cli;
pub mod config;
pub mod store;

pub use cli::{run, Cli, Commands};
