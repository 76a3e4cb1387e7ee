//! Map validated CLI arguments to the action the binary runs.

use crate::cli::actions::{server::Args, Action};
use crate::cli::commands::{auth, web};
use anyhow::Result;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let web_opts = web::Options::parse(matches)?;
    let auth_opts = auth::Options::parse(matches);

    Ok(Action::Server(Args {
        port: web_opts.port,
        web_root: web_opts.web_root,
        jwt_secret: auth_opts.jwt_secret,
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::path::PathBuf;

    #[test]
    fn test_handler_server_action() {
        temp_env::with_vars(
            [
                ("SULIO_PORT", Some("9000")),
                ("SULIO_JWT_SECRET", Some("s3cret")),
                ("SULIO_WEB_ROOT", Some("/srv/sulio")),
            ],
            || {
                let matches = crate::cli::commands::new().get_matches_from(vec!["sulio"]);
                let Action::Server(args) = handler(&matches).unwrap();

                assert_eq!(args.port, 9000);
                assert_eq!(args.web_root, PathBuf::from("/srv/sulio"));
                assert_eq!(
                    args.jwt_secret.as_ref().map(|s| s.expose_secret().to_string()),
                    Some("s3cret".to_string())
                );
            },
        );
    }

    #[test]
    fn test_handler_without_secret() {
        temp_env::with_vars([("SULIO_JWT_SECRET", None::<&str>)], || {
            let matches = crate::cli::commands::new().get_matches_from(vec!["sulio"]);
            let Action::Server(args) = handler(&matches).unwrap();

            assert!(args.jwt_secret.is_none());
            assert!(!format!("{args:?}").contains("s3cret"));
        });
    }
}
