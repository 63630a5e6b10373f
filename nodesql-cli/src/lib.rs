//! nodesql CLI library.
//!
//! Command handlers behind the `nodesql` binary: `translate` reads a
//! JSON-encoded value expression plus variable bindings and prints the SQL,
//! `functions` lists the native functions a dialect supports.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod input;

use cli::{Cli, Commands};

/// Dispatch a parsed [`Cli`] to the matching command handler.
pub fn run(cli: Cli) -> error::CliResult<()> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Translate {
            expr,
            bindings,
            dialect,
            expected_type,
        } => {
            let config = config::resolve(config_path, dialect, expected_type)?;
            commands::translate::run(commands::translate::TranslateOpts {
                expr: expr.as_deref(),
                bindings: bindings.as_deref(),
                config,
            })
        }

        Commands::Functions { dialect } => {
            let config = config::resolve(config_path, dialect, None)?;
            commands::functions::run(config.dialect)
        }
    }
}
