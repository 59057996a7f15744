//! CLI module containing argument parsing, config discovery and rendering

pub mod api;
pub mod args;
pub mod config;
pub mod render;

#[cfg(test)]
mod tests;
