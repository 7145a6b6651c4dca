use crate::config::MigrateConfig;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Every file under `root` whose name ends in `.<ext>` for one of
/// `config.extensions`, in sorted path order. Directories listed in
/// `config.skip_dirs` are not entered.
///
/// A root that does not exist is an empty walk. A root that exists but is not
/// a directory is rejected, and an unreadable directory aborts the walk.
pub fn walk_files(root: &Path, config: &MigrateConfig) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        log_status!("migrate", "{} does not exist, nothing to do", root.display());
        return Ok(Vec::new());
    }

    if !root.is_dir() {
        return Err(Error::validation_invalid_argument(
            "path",
            format!("'{}' is not a directory", root.display()),
            None,
            None,
        )
        .with_hint("Pass --path <DIR> or set \"root\" in alphafix.json"));
    }

    let mut files = Vec::new();
    walk_recursive(root, config, &mut files)?;
    Ok(files)
}

fn walk_recursive(dir: &Path, config: &MigrateConfig, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("read dir {}", dir.display())))
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("read dir {}", dir.display())))
        })?;
        paths.push(entry.path());
    }
    paths.sort();

    for path in paths {
        // symlink_metadata: never follow a linked directory back up the tree
        let is_real_dir = std::fs::symlink_metadata(&path)
            .map(|m| m.is_dir())
            .unwrap_or(false);

        if is_real_dir {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            if config.skip_dirs.iter().any(|d| d == &name) {
                continue;
            }
            walk_recursive(&path, config, files)?;
        } else if path.is_file() && has_extension(&path, &config.extensions) {
            files.push(path);
        }
    }

    Ok(())
}

// Suffix match rather than Path::extension, which is None for a bare `.dart`.
fn has_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };

    extensions.iter().any(|ext| {
        name.len() > ext.len()
            && name.ends_with(ext.as_str())
            && name.as_bytes()[name.len() - ext.len() - 1] == b'.'
    })
}
