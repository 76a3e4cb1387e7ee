use crate::{guard::RouteGuard, web};
use anyhow::{Context, Result};
use secrecy::SecretString;
use std::{path::PathBuf, sync::Arc};
use tracing::{debug, error};

pub struct Args {
    pub port: u16,
    pub web_root: PathBuf,
    pub jwt_secret: Option<SecretString>,
}

impl std::fmt::Debug for Args {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Args")
            .field("port", &self.port)
            .field("web_root", &self.web_root)
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Execute the server action.
/// # Errors
/// Returns an error if the server fails to bind or serve.
pub async fn execute(args: Args) -> Result<()> {
    debug!("Server args: {:?}", args);

    let guard = Arc::new(RouteGuard::with_secret(args.jwt_secret.as_ref()));

    if !guard.is_configured() {
        error!("SULIO_JWT_SECRET is not set: every dashboard request will be redirected to login");
    }

    web::new(args.port, guard, &args.web_root)
        .await
        .context("Failed to run the web gateway")
}
