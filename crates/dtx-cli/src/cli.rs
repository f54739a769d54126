//! CLI argument definitions for the DTX host.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use dtx_tensor::DType;

#[derive(Parser)]
#[command(
    name = "dtx",
    version,
    about = "DTX - Run model data transforms on JSON input and tensor output",
    long_about = "Run the DataTransform section of model metadata.\n\n\
                  `input` turns JSON records into tensors, `output` turns an output\n\
                  tensor back into JSON labels, `digitize` splits date/time strings."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Transform a JSON input file into tensors.
    Input(InputArgs),

    /// Transform a tensor file into JSON labels.
    Output(OutputArgs),

    /// Split date/time strings into their seven calendar components.
    Digitize(DigitizeArgs),
}

#[derive(Parser)]
pub struct InputArgs {
    /// Model metadata JSON containing a DataTransform section.
    #[arg(long = "metadata", value_name = "FILE")]
    pub metadata: PathBuf,

    /// Raw JSON input.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Tensor dtype per column transform, repeatable (default: f32 for all).
    #[arg(long = "dtype", value_name = "DTYPE")]
    pub dtypes: Vec<DType>,

    /// Refuse to allocate tensors with more elements than this.
    #[arg(long = "max-elements", value_name = "N")]
    pub max_elements: Option<usize>,

    /// Print tensors as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct OutputArgs {
    /// Model metadata JSON containing a DataTransform section.
    #[arg(long = "metadata", value_name = "FILE")]
    pub metadata: PathBuf,

    /// Output index to decode.
    #[arg(long = "index", default_value_t = 0)]
    pub index: usize,

    /// Tensor file: {"shape": [...], "dtype": "f32", "data": [...]}.
    #[arg(value_name = "TENSOR")]
    pub tensor: PathBuf,
}

#[derive(Parser)]
pub struct DigitizeArgs {
    /// Values such as "Jan 1 2024" or "Feb 29 2000 12:30:15".
    #[arg(value_name = "VALUE", required = true)]
    pub values: Vec<String>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
