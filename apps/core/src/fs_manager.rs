use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Environment variable overriding the application root directory.
pub const HOME_ENV: &str = "MELLI_HOME";

pub struct PortablePathManager;

impl PortablePathManager {
    /// Application root: `$MELLI_HOME` when set, otherwise the working directory.
    pub fn root_dir() -> PathBuf {
        if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return PathBuf::from(home);
        }

        match std::env::current_dir() {
            Ok(path) => path,
            Err(e) => {
                error!("Failed to get current directory: {}. Falling back to '.'.", e);
                PathBuf::from(".")
            }
        }
    }

    /// Persisted state directory (./data).
    pub fn data_dir() -> PathBuf {
        Self::root_dir().join("data")
    }

    /// Classifier artifacts directory (./models).
    pub fn models_dir() -> PathBuf {
        Self::root_dir().join("models")
    }

    /// Creates the parent directory of `path` if it does not exist yet.
    pub fn ensure_parent(path: &Path) -> Result<(), std::io::Error> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
                info!("Creating directory: {:?}", parent);
                fs::create_dir_all(parent)
            }
            _ => Ok(()),
        }
    }

    /// Creates `dir` if needed. Returns whether it had to be created.
    pub fn ensure_dir(dir: &Path) -> Result<bool, std::io::Error> {
        if dir.is_dir() {
            return Ok(false);
        }
        info!("Creating directory: {:?}", dir);
        fs::create_dir_all(dir)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_root_dir_honours_env() {
        temp_env::with_var(HOME_ENV, Some("/srv/melli"), || {
            assert_eq!(PortablePathManager::root_dir(), PathBuf::from("/srv/melli"));
            assert_eq!(PortablePathManager::data_dir(), PathBuf::from("/srv/melli/data"));
            assert_eq!(PortablePathManager::models_dir(), PathBuf::from("/srv/melli/models"));
        });
    }

    #[test]
    fn test_ensure_parent_creates_nested_dirs() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a").join("b").join("state.json");

        PortablePathManager::ensure_parent(&file).unwrap();
        assert!(dir.path().join("a").join("b").is_dir());

        // Bare file names have no parent to create.
        PortablePathManager::ensure_parent(Path::new("state.json")).unwrap();
    }

    #[test]
    fn test_ensure_dir_reports_creation() {
        let dir = tempdir().unwrap();
        let data = dir.path().join("data");

        assert!(PortablePathManager::ensure_dir(&data).unwrap());
        assert!(data.is_dir());
        assert!(!PortablePathManager::ensure_dir(&data).unwrap());
    }
}
