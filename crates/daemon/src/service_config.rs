use std::path::PathBuf;

use common::prelude::Config as RepoConfig;

#[derive(Debug, Clone)]
pub struct Config {
    // repo configuration
    /// Path to the repo directory (absolute path),
    ///  bootstrapped with a fresh identity if it holds no config
    pub repo_dir: PathBuf,
    /// Repo config already loaded and validated by the caller,
    ///  read from `repo_dir` on startup if not set
    pub repo_config: Option<RepoConfig>,

    // http server configuration
    /// Whether to serve the HTTP API at all
    pub api_enabled: bool,
    /// Port for the API HTTP server
    pub api_port: u16,

    // logging
    pub log_level: tracing::Level,
    /// Directory for log files (optional, logs to stdout only if not set)
    pub log_dir: Option<PathBuf>,
}
