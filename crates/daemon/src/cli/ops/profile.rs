use clap::Args;

use quarry_daemon::state::{AppState, StateError};

#[derive(Args, Debug, Clone)]
pub struct Profile;

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("state error: {0}")]
    State(#[from] StateError),
    #[error("failed to render profile: {0}")]
    Json(#[from] serde_json::Error),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Profile {
    type Error = ProfileError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let state = AppState::load(ctx.repo_path.clone())?;
        let profile = state.config.profile.redacted();
        Ok(serde_json::to_string_pretty(&profile)?)
    }
}
