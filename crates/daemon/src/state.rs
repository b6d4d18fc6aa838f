use std::{fs, path::PathBuf};

use common::prelude::{BasePath, Config, ConfigError, File};

pub const APP_NAME: &str = "quarry";

#[derive(Debug, Clone)]
pub struct AppState {
    /// Path to the repo directory (~/.quarry)
    pub repo_dir: PathBuf,
    /// Root every repo file is resolved against
    pub base: BasePath,
    /// Loaded configuration
    pub config: Config,
}

impl AppState {
    /// Get the repo directory path (custom or default ~/.quarry)
    pub fn repo_dir(custom_path: Option<PathBuf>) -> Result<PathBuf, StateError> {
        if let Some(path) = custom_path {
            return Ok(path);
        }

        let home = dirs::home_dir().ok_or(StateError::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", APP_NAME)))
    }

    /// Check if the repo holds a config
    pub fn exists(custom_path: Option<PathBuf>) -> Result<bool, StateError> {
        let repo_dir = Self::repo_dir(custom_path)?;
        Ok(BasePath::new(repo_dir).exists(File::Config))
    }

    /// Initialize a new repo directory around `config`.
    ///
    /// The directory itself may already exist, a config inside it may not.
    pub fn init(custom_path: Option<PathBuf>, config: Config) -> Result<Self, StateError> {
        let repo_dir = Self::repo_dir(custom_path)?;
        let base = BasePath::new(&repo_dir);

        if base.exists(File::Config) {
            return Err(StateError::AlreadyInitialized);
        }

        fs::create_dir_all(&repo_dir)?;
        config.save(&base)?;

        tracing::info!(
            repo = %repo_dir.display(),
            peername = %config.profile.peername,
            "initialized repo"
        );

        Ok(Self {
            repo_dir,
            base,
            config,
        })
    }

    /// Load existing state from the repo directory
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        let repo_dir = Self::repo_dir(custom_path)?;

        if !repo_dir.exists() {
            return Err(StateError::NotInitialized);
        }

        let base = BasePath::new(&repo_dir);
        if !base.exists(File::Config) {
            return Err(StateError::MissingFile(File::Config.path().to_string()));
        }

        let config = Config::load(&base)?;
        config.validate().map_err(ConfigError::from)?;

        Ok(Self {
            repo_dir,
            base,
            config,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("could not determine home directory")]
    NoHomeDirectory,

    #[error("quarry repo already initialized")]
    AlreadyInitialized,

    #[error("quarry repo not initialized, run 'quarry init' first")]
    NotInitialized,

    #[error("missing repo file: {0}")]
    MissingFile(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::test_support::test_config;

    #[test]
    fn test_init_then_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("repo");

        let state = AppState::init(Some(path.clone()), test_config()).unwrap();
        assert!(path.join("config.json").is_file());
        assert!(AppState::exists(Some(path.clone())).unwrap());

        let loaded = AppState::load(Some(path)).unwrap();
        assert_eq!(loaded.config, state.config);
    }

    #[test]
    fn test_init_twice_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().to_path_buf();

        AppState::init(Some(path.clone()), test_config()).unwrap();
        assert!(matches!(
            AppState::init(Some(path), test_config()),
            Err(StateError::AlreadyInitialized)
        ));
    }

    #[test]
    fn test_load_uninitialized() {
        let temp = TempDir::new().unwrap();

        assert!(matches!(
            AppState::load(Some(temp.path().join("nope"))),
            Err(StateError::NotInitialized)
        ));
        assert!(matches!(
            AppState::load(Some(temp.path().to_path_buf())),
            Err(StateError::MissingFile(_))
        ));
    }

    #[test]
    fn test_load_rejects_invalid_config() {
        let temp = TempDir::new().unwrap();
        let mut config = test_config();
        config.profile.peername = "me".to_string();
        std::fs::write(
            temp.path().join("config.json"),
            serde_json::to_vec(&config).unwrap(),
        )
        .unwrap();

        assert!(matches!(
            AppState::load(Some(temp.path().to_path_buf())),
            Err(StateError::Config(ConfigError::Invalid(_)))
        ));
    }
}
