use clap::Args;

use common::prelude::{nick, KeyError, PeerId, PrivKey};

#[derive(Args, Debug, Clone)]
pub struct Keygen;

#[derive(Debug, thiserror::Error)]
pub enum KeygenError {
    #[error("key generation failed: {0}")]
    Key(#[from] KeyError),
    #[error("key generation task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Print a fresh identity without touching any repo
#[async_trait::async_trait]
impl crate::cli::op::Op for Keygen {
    type Error = KeygenError;
    type Output = String;

    async fn execute(&self, _ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let key = tokio::task::spawn_blocking(PrivKey::generate).await??;
        let id = PeerId::from_public_key(&key.public())?;

        Ok(format!(
            "peer id:  {}\npeername: {}\nprivkey:  {}",
            id,
            nick(&id.to_string()),
            key.encode()?
        ))
    }
}
