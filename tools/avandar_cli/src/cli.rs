//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "avandar",
    version,
    about = "Compile structured queries, filter rows and scaffold files"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log output format.
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormatArg,

    /// YAML configuration file.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compile a structured query JSON file to DuckDB SQL.
    Compile(CompileArgs),

    /// Filter a JSON array of rows or an engine result document.
    Filter(FilterArgs),

    /// Generate files from a template kind.
    Scaffold(ScaffoldArgs),
}

#[derive(Parser)]
pub struct CompileArgs {
    /// Structured query JSON file.
    #[arg(value_name = "QUERY")]
    pub query: PathBuf,

    /// Catalog YAML with the datasets and entity configs the query refers to.
    #[arg(long, value_name = "PATH")]
    pub catalog: PathBuf,
}

#[derive(Parser)]
pub struct FilterArgs {
    /// JSON file holding an array of row objects, or a
    /// `{columns, data, numRows}` result.
    #[arg(value_name = "ROWS")]
    pub rows: PathBuf,

    /// JSON file with filters, in either shape or the tagged form.
    #[arg(long, value_name = "PATH")]
    pub filters: PathBuf,

    /// Print the filters as REST query parameters instead of filtering.
    #[arg(long)]
    pub postgrest: bool,
}

#[derive(Parser)]
pub struct ScaffoldArgs {
    /// Template kind (a subdirectory of the template root).
    #[arg(value_name = "KIND")]
    pub kind: String,

    /// Name used for `{{name}}`, `{{Name}}` and `{{name_snake}}`.
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Output directory.
    #[arg(long = "out", value_name = "DIR")]
    pub out: PathBuf,

    /// Extra template values as key=value.
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
    pub params: Vec<(String, String)>,

    /// Template root, overriding the configuration.
    #[arg(long, value_name = "DIR")]
    pub templates: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim().to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}
