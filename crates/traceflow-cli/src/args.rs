//! Command-line argument definitions for the Traceflow CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, theme overrides and logging verbosity.

use clap::Parser;

use traceflow::theme::ColorScheme;

/// Command-line arguments for the Traceflow renderer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input flowchart document (TOML)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Theme used when the document names none
    #[arg(long)]
    pub theme: Option<String>,

    /// Color scheme forced for this render (light, dark)
    #[arg(long)]
    pub mode: Option<ColorScheme>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
