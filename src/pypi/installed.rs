//! Installed package discovery

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Lowercased names of the packages present in the local environment
pub type InstalledSet = HashSet<String>;

/// Source of the installed package names used to annotate results
pub trait PackageInventory {
    fn installed_names(&self) -> InstalledSet;
}

impl PackageInventory for InstalledSet {
    fn installed_names(&self) -> InstalledSet {
        self.clone()
    }
}

/// Interpreter asked for `sys.path` when none is configured
pub const DEFAULT_PYTHON: &str = "python3";

/// Installed distributions of a Python interpreter
///
/// Reads the `*.dist-info` and `*.egg-info` metadata found on the
/// interpreter's `sys.path`.
#[derive(Debug, Clone)]
pub struct PythonEnvironment {
    python: PathBuf,
}

impl PythonEnvironment {
    pub fn new() -> Self {
        Self {
            python: PathBuf::from(DEFAULT_PYTHON),
        }
    }

    pub fn with_python(python: impl Into<PathBuf>) -> Self {
        Self {
            python: python.into(),
        }
    }

    /// Directories on the interpreter's `sys.path`
    fn sys_path(&self) -> Option<Vec<PathBuf>> {
        let output = Command::new(&self.python)
            .args(["-c", "import sys; print('\\n'.join(sys.path))"])
            .output();

        let output = match output {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!(python = %self.python.display(), "cannot run interpreter: {}", e);
                return None;
            }
        };

        if !output.status.success() {
            tracing::warn!(
                python = %self.python.display(),
                status = %output.status,
                "interpreter failed to report sys.path"
            );
            return None;
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Some(
            stdout
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(PathBuf::from)
                .collect(),
        )
    }
}

impl Default for PythonEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageInventory for PythonEnvironment {
    fn installed_names(&self) -> InstalledSet {
        let Some(paths) = self.sys_path() else {
            return InstalledSet::new();
        };

        let mut installed = InstalledSet::new();
        for dir in &paths {
            installed.extend(distributions_in(dir));
        }
        tracing::debug!(count = installed.len(), "collected installed packages");
        installed
    }
}

/// Lowercased names of the distributions whose metadata sits directly in `dir`
///
/// Unreadable directories and non-directory entries of `sys.path` (zip files,
/// missing paths) yield nothing.
pub fn distributions_in(dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut names = Vec::new();
    for entry in entries.flatten() {
        let file_name = entry.file_name();
        let file_name = file_name.to_string_lossy();

        let (stem, metadata_file) = if let Some(stem) = file_name.strip_suffix(".dist-info") {
            (stem, "METADATA")
        } else if let Some(stem) = file_name.strip_suffix(".egg-info") {
            (stem, "PKG-INFO")
        } else {
            continue;
        };

        // egg-info may be a single file holding the metadata itself
        let path = entry.path();
        let metadata_path = if path.is_dir() {
            path.join(metadata_file)
        } else {
            path
        };

        let name = metadata_name(&metadata_path)
            .unwrap_or_else(|| stem.split('-').next().unwrap_or(stem).to_string());
        if !name.is_empty() {
            names.push(name.to_lowercase());
        }
    }
    names
}

/// The `Name:` header of a core metadata file
fn metadata_name(path: &Path) -> Option<String> {
    let content = fs::read_to_string(path).ok()?;
    content
        .lines()
        .take_while(|line| !line.is_empty())
        .find_map(|line| line.strip_prefix("Name:"))
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dist_info_uses_metadata_name() {
        let dir = tempfile::tempdir().unwrap();
        let dist = dir.path().join("PyYAML-6.0.1.dist-info");
        fs::create_dir(&dist).unwrap();
        fs::write(
            dist.join("METADATA"),
            "Metadata-Version: 2.1\nName: PyYAML\nVersion: 6.0.1\n\nName: not-a-header\n",
        )
        .unwrap();

        assert_eq!(distributions_in(dir.path()), vec!["pyyaml"]);
    }

    #[test]
    fn test_falls_back_to_directory_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("Flask-3.0.0.dist-info")).unwrap();
        fs::write(dir.path().join("six-1.16.0.egg-info"), "Metadata-Version: 1.0\n").unwrap();
        fs::create_dir(dir.path().join("requests")).unwrap();

        let mut names = distributions_in(dir.path());
        names.sort();
        assert_eq!(names, vec!["flask", "six"]);
    }

    #[test]
    fn test_egg_info_file_with_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("setuptools_scm-8.0.egg-info"),
            "Metadata-Version: 1.2\nName: setuptools-scm\n",
        )
        .unwrap();

        assert_eq!(distributions_in(dir.path()), vec!["setuptools-scm"]);
    }

    #[test]
    fn test_missing_directory_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(distributions_in(&dir.path().join("absent")).is_empty());
    }

    #[test]
    fn test_missing_interpreter_yields_empty_set() {
        let env = PythonEnvironment::with_python("/nonexistent/python-for-tests");
        assert!(env.installed_names().is_empty());
    }

    #[test]
    fn test_fixed_set_inventory() {
        let set: InstalledSet = ["requests".to_string()].into_iter().collect();
        assert!(set.installed_names().contains("requests"));
    }
}
