//! Infrastructure adapters for config, logging, prompts, and argument files.

pub mod argfile;
pub mod config;
pub mod logging;
pub mod prompt;
