use crate::error::{CliError, CliResult};
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

/// Where the expression comes from.
#[derive(Debug, PartialEq, Eq)]
pub enum InputSource {
    /// From a file on disk.
    File(PathBuf),
    /// From stdin (piped).
    Stdin,
}

/// Resolve the expression source: `--expr <file>`, `--expr -` or piped stdin.
pub fn resolve_input(expr: Option<&Path>) -> CliResult<InputSource> {
    resolve_input_with(expr, !io::stdin().is_terminal())
}

fn resolve_input_with(expr: Option<&Path>, stdin_piped: bool) -> CliResult<InputSource> {
    match expr {
        Some(path) if path == Path::new("-") => Ok(InputSource::Stdin),
        Some(path) => Ok(InputSource::File(path.to_path_buf())),
        None if stdin_piped => Ok(InputSource::Stdin),
        None => Err(CliError::Usage(format!(
            "no expression provided\n  {} pass --expr <file> or pipe JSON via stdin",
            colored::Colorize::bold(colored::Colorize::cyan("help:"))
        ))),
    }
}

/// Read content from the resolved input source.
pub fn read_input(source: &InputSource) -> CliResult<String> {
    match source {
        InputSource::File(path) => read_file(path),
        InputSource::Stdin => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

pub fn read_file(path: &Path) -> CliResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| CliError::Input(format!("failed to read {}: {e}", path.display())))
}
