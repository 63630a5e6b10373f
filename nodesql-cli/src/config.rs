use crate::error::CliResult;
use nodesql_translate::{DialectKind, TranslatorConfig, ValueType};
use std::path::{Path, PathBuf};
use tracing::debug;

const CONFIG_FILE: &str = "nodesql.toml";

/// Walk up from `start` looking for `nodesql.toml`.
fn find_config_from(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Find `nodesql.toml` by walking up from cwd.
pub fn find_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_from(&cwd)
}

/// Resolve translator settings: defaults, then the config file (`--config`
/// or the nearest `nodesql.toml`), then command-line flags.
pub fn resolve(
    config_path: Option<&Path>,
    dialect: Option<DialectKind>,
    expected_type: Option<ValueType>,
) -> CliResult<TranslatorConfig> {
    let path = config_path.map(Path::to_path_buf).or_else(find_config);
    let mut config = match &path {
        Some(path) => TranslatorConfig::load(path)?,
        None => TranslatorConfig::default(),
    };
    if let Some(dialect) = dialect {
        config.dialect = dialect;
    }
    if let Some(ty) = expected_type {
        config.expected_type = ty;
    }
    debug!(
        config_file = ?path,
        dialect = %config.dialect,
        expected_type = %config.expected_type,
        "resolved translator settings"
    );
    Ok(config)
}
