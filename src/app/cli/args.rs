//! Command-line arguments
//!
//! Global flags may appear before or after the subcommand. Anything given
//! here overrides the configuration file.

use clap::{ArgAction, Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "gtmkit")]
#[command(about = "Render Google Tag Manager snippets for server-rendered pages")]
#[command(version, long_version = crate::core::version::long_version())]
#[command(after_help = " * can be specified multiple times or as a comma-separated list")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    pub config_file: Option<PathBuf>,

    /// Container ids*
    #[arg(
        short = 'i',
        long = "container",
        value_name = "IDS",
        action = ArgAction::Append,
        value_delimiter = ',',
        global = true
    )]
    pub containers: Vec<String>,

    /// Data layer name
    #[arg(short = 'd', long = "data-layer", value_name = "NAME", global = true)]
    pub data_layer: Option<String>,

    /// Script host
    #[arg(long = "host", value_name = "URL", global = true)]
    pub host: Option<String>,

    /// CSP nonce for rendered script tags
    #[arg(long = "nonce", value_name = "NONCE", global = true)]
    pub nonce: Option<String>,

    /// Force coloured output
    #[arg(long = "color", conflicts_with = "no_color", global = true)]
    pub color: bool,

    /// Disable coloured output
    #[arg(long = "no-color", conflicts_with = "color", global = true)]
    pub no_color: bool,

    /// Log level
    #[arg(
        short = 'l',
        long = "log-level",
        value_name = "LEVEL",
        value_parser = ["trace", "debug", "info", "warn", "error", "off"],
        global = true
    )]
    pub log_level: Option<String>,

    /// Log file path (use 'none' to log to stderr)
    #[arg(short = 'f', long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<String>,

    /// Log output format
    #[arg(
        short = 'o',
        long = "log-format",
        value_name = "FORMAT",
        value_parser = ["text", "ext", "json"],
        global = true
    )]
    pub log_format: Option<String>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Print the script URL for each container
    Urls,
    /// Print the <script> tags for the page head
    Head,
    /// Print the <noscript> fallback for the top of the body
    Noscript,
    /// Print head and body snippets with placement comments
    Snippet,
}

impl Args {
    /// Colour when forced, never when disabled, otherwise when stdout is a terminal
    pub fn use_color(&self) -> bool {
        if self.no_color {
            false
        } else if self.color {
            true
        } else {
            std::io::stdout().is_terminal()
        }
    }
}
