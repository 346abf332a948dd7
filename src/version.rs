//
// version.rs
// Toolsuite-rs
//
// Locates the install root and reads the suite version from the packaged VERSION.txt resource.
//
// Thales Matheus Mendonça Santos - November 2025

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DispatchError, Result};

pub const VERSION_FILE: &str = "VERSION.txt";

/// Overrides the install root used to find packaged resources.
pub const HOME_ENV: &str = "TOOLSUITE_HOME";

/// Directory the suite is installed in: `$TOOLSUITE_HOME`, else the executable's directory.
pub fn install_root() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }

    let exe = std::env::current_exe().map_err(|source| DispatchError::ResourceMissing {
        path: PathBuf::from(VERSION_FILE),
        source,
    })?;
    Ok(exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".")))
}

/// Read the version token: first line of `VERSION.txt`, without its line ending.
pub fn get_version(root: &Path) -> Result<String> {
    let primary = root.join(VERSION_FILE);
    let fallback = root.join("..").join("share").join("toolsuite").join(VERSION_FILE);

    let contents = match fs::read_to_string(&primary) {
        Ok(contents) => contents,
        Err(source) => fs::read_to_string(&fallback).map_err(|_| {
            DispatchError::ResourceMissing {
                path: primary.clone(),
                source,
            }
        })?,
    };

    let version = contents.lines().next().unwrap_or_default();
    tracing::debug!(root = %root.display(), version, "read version resource");
    Ok(version.trim_end_matches('\r').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn first_line_is_the_version() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(VERSION_FILE), "0.3.0\r\nbuilt from main\n").unwrap();

        assert_eq!(get_version(dir.path()).unwrap(), "0.3.0");
    }

    #[test]
    fn share_layout_is_searched() {
        let dir = tempdir().unwrap();
        let bin = dir.path().join("bin");
        let share = dir.path().join("share").join("toolsuite");
        fs::create_dir_all(&bin).unwrap();
        fs::create_dir_all(&share).unwrap();
        fs::write(share.join(VERSION_FILE), "1.2.3").unwrap();

        assert_eq!(get_version(&bin).unwrap(), "1.2.3");
    }

    #[test]
    fn missing_resource_is_reported() {
        let dir = tempdir().unwrap();
        let err = get_version(dir.path()).unwrap_err();

        assert!(matches!(err, DispatchError::ResourceMissing { .. }));
        assert!(err.to_string().contains(VERSION_FILE));
    }
}
