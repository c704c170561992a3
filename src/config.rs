use crate::error::{GuardError, Result};
use crate::types::config::GuardConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "guardfi.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".guardfi/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/guardfi/config.toml";

/// Loads configuration for `root`, or from `explicit` when given.
///
/// Layers are merged global, then project (or explicit), then local overlay.
/// Missing layers are skipped; with no layers at all the defaults apply.
pub fn load_config(root: &Path, explicit: Option<&Path>) -> Result<GuardConfig> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(root, explicit, global.as_deref())
}

pub(crate) fn load_config_with_global(
    root: &Path,
    explicit: Option<&Path>,
    global_path: Option<&Path>,
) -> Result<GuardConfig> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(GuardError::ConfigNotFound(path.display().to_string()));
        }
    }

    let mut merged = Value::Table(Map::new());
    if let Some(path) = global_path {
        merge_file_if_exists(&mut merged, path)?;
    }
    let project_path = explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.join(DEFAULT_CONFIG_FILE));
    merge_file_if_exists(&mut merged, &project_path)?;
    merge_file_if_exists(&mut merged, &root.join(DEFAULT_LOCAL_FILE))?;

    let cfg: GuardConfig = merged
        .try_into()
        .map_err(|e: toml::de::Error| GuardError::ConfigParse(e.to_string()))?;
    Ok(cfg)
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    debug!(path = %path.display(), "merging config layer");
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(())
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| GuardError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}
