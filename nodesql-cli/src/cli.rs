use clap::{Parser, Subcommand};
use nodesql_translate::{DialectKind, ValueType};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "nodesql",
    about = "Translate SPARQL value expressions to SQL",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output (also respects NO_COLOR env var)
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to config file (defaults to the nearest nodesql.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Translate a JSON-encoded expression to SQL
    Translate {
        /// Expression file; `-` or omitted reads stdin
        #[arg(long)]
        expr: Option<PathBuf>,

        /// Variable bindings file (JSON)
        #[arg(long)]
        bindings: Option<PathBuf>,

        /// SQL dialect (postgresql, mysql, h2)
        #[arg(long)]
        dialect: Option<DialectKind>,

        /// Expected type of the expression (node, bool, string, ...)
        #[arg(long = "type")]
        expected_type: Option<ValueType>,
    },

    /// List the native functions a dialect supports
    Functions {
        /// SQL dialect (postgresql, mysql, h2)
        #[arg(long)]
        dialect: Option<DialectKind>,
    },
}
