//! CLI Integration Tests
//!
//! Tests are organized by functionality:
//! - `cli::argument_parsing` - Subcommands and global flags
//! - `cli::toml_config` - Configuration files and flag overrides
//! - `cli::rendering` - Output of each subcommand through `run`

mod cli;
