use crate::error::Error;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "alphafix.json";

pub const DEFAULT_ROOT: &str = "lib";
pub const DEFAULT_EXTENSION: &str = "dart";

// ============================================================================
// Types
// ============================================================================

/// Where to look and which files to touch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrateConfig {
    pub root: PathBuf,
    pub extensions: Vec<String>,
    pub skip_dirs: Vec<String>,
}

impl Default for MigrateConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            extensions: vec![DEFAULT_EXTENSION.to_string()],
            skip_dirs: Vec::new(),
        }
    }
}

/// Config file contents. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ConfigFile {
    root: Option<PathBuf>,
    extensions: Option<Vec<String>>,
    skip_dirs: Option<Vec<String>>,
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub root: Option<PathBuf>,
    pub extensions: Vec<String>,
}

// ============================================================================
// Loading
// ============================================================================

/// Resolve the effective config: defaults, then the config file, then overrides.
///
/// With `explicit = None`, `alphafix.json` in `cwd` is used when present and
/// silently skipped when not. An explicit path must exist.
pub fn resolve(
    explicit: Option<&Path>,
    cwd: &Path,
    overrides: &ConfigOverrides,
) -> Result<MigrateConfig> {
    let file = match explicit {
        Some(path) => Some(read_config_file(path)?),
        None => {
            let implicit = cwd.join(DEFAULT_CONFIG_FILE);
            if implicit.is_file() {
                Some(read_config_file(&implicit)?)
            } else {
                None
            }
        }
    };

    let mut config = MigrateConfig::default();

    if let Some(file) = file {
        if let Some(root) = file.root {
            config.root = root;
        }
        if let Some(extensions) = file.extensions {
            config.extensions = extensions;
        }
        if let Some(skip_dirs) = file.skip_dirs {
            config.skip_dirs = skip_dirs;
        }
    }

    if let Some(root) = &overrides.root {
        config.root = root.clone();
    }
    if !overrides.extensions.is_empty() {
        config.extensions = overrides.extensions.clone();
    }

    config.extensions = normalize_extensions(&config.extensions)?;
    Ok(config)
}

fn read_config_file(path: &Path) -> Result<ConfigFile> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("read {}", path.display())))
    })?;

    serde_json::from_str(&raw).map_err(|e| Error::config_invalid_json(path.display().to_string(), e))
}

/// Strip leading dots and reject an empty set.
fn normalize_extensions(extensions: &[String]) -> Result<Vec<String>> {
    let mut normalized: Vec<String> = Vec::new();

    for ext in extensions {
        let trimmed = ext.trim().trim_start_matches('.');
        if trimmed.is_empty() {
            return Err(Error::config_invalid_value(
                "extensions",
                Some(ext.clone()),
                "Extension must not be empty",
            ));
        }
        if !normalized.iter().any(|e| e == trimmed) {
            normalized.push(trimmed.to_string());
        }
    }

    if normalized.is_empty() {
        return Err(Error::config_invalid_value(
            "extensions",
            None,
            "At least one file extension is required",
        ));
    }

    Ok(normalized)
}
