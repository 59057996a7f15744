//! CLI Integration Test Modules

pub mod argument_parsing;
pub mod rendering;
pub mod toml_config;
