use clap::Args;

use common::prelude::ParseError;
use quarry_daemon::http_server::context::dataset_ref_from_path;

#[derive(Args, Debug, Clone)]
pub struct Resolve {
    /// HTTP-style path, e.g. /peer/cities/at/ipfs/QmHash
    pub path: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Resolve {
    type Error = ResolveError;
    type Output = String;

    async fn execute(&self, _ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let dataset_ref = dataset_ref_from_path(&self.path)?;

        let mut lines = vec![dataset_ref.to_string()];
        for (label, value) in [
            ("peername", &dataset_ref.peername),
            ("name", &dataset_ref.name),
            ("profile id", &dataset_ref.profile_id),
            ("path", &dataset_ref.path),
        ] {
            if !value.is_empty() {
                lines.push(format!("  {:<11} {}", format!("{}:", label), value));
            }
        }
        Ok(lines.join("\n"))
    }
}
