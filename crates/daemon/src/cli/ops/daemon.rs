use clap::Args;

use quarry_daemon::state::AppState;
use quarry_daemon::{spawn_service, ServiceConfig};

#[derive(Args, Debug, Clone)]
pub struct Daemon {
    /// Override API server port (default from config)
    #[arg(long)]
    pub api_port: Option<u16>,

    /// Directory for log files (logs to stdout only if not set)
    #[arg(long)]
    pub log_dir: Option<std::path::PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum DaemonError {
    #[error("state error: {0}")]
    StateError(#[from] quarry_daemon::state::StateError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Daemon {
    type Error = DaemonError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let repo_dir = AppState::repo_dir(ctx.repo_path.clone())?;

        // An uninitialized repo is bootstrapped by the service itself
        let repo_config = if AppState::exists(Some(repo_dir.clone()))? {
            Some(AppState::load(Some(repo_dir.clone()))?.config)
        } else {
            None
        };
        let api = repo_config
            .as_ref()
            .map(|repo_config| repo_config.api.clone())
            .unwrap_or_default();

        let config = ServiceConfig {
            repo_dir,
            repo_config,
            api_enabled: api.enabled,
            api_port: self.api_port.unwrap_or(api.port),
            log_level: tracing::Level::DEBUG,
            log_dir: self.log_dir.clone(),
        };

        spawn_service(&config).await;
        Ok("daemon ended".to_string())
    }
}
