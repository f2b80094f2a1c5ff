use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use harmonygen::report::DEFAULT_LIBRARY_LIST;

/// harmonygen - writes Harmony prefix, replacement and postfix stubs for .NET libraries
#[derive(Debug, Parser)]
#[command(name = "harmonygen", version, about, long_about = None)]
pub struct Cli {
    /// Type name substrings to generate stubs for (case-insensitive). All types if empty.
    #[arg(value_name = "FILTERS")]
    pub filters: Vec<String>,

    /// File listing the libraries to read, one path per line.
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_LIBRARY_LIST)]
    pub libraries: PathBuf,

    /// Report file to write.
    #[arg(short, long, value_name = "FILE", default_value = "output.html")]
    pub output: PathBuf,

    /// Report format.
    #[arg(long, value_enum, default_value_t = Format::Html)]
    pub format: Format,

    /// Append the list of every type encountered and print it to the terminal.
    #[arg(long)]
    pub list_types: bool,

    /// Enable verbose (debug-level) logging output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format of the report file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// A standalone HTML document with one table row per member
    Html,
    /// Plain text sections
    Text,
    /// The rows of every module as JSON
    Json,
}
