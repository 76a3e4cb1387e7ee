use clap::{Arg, ArgMatches, Command};
use secrecy::SecretString;

pub const ARG_JWT_SECRET: &str = "jwt-secret";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_JWT_SECRET)
            .long(ARG_JWT_SECRET)
            .help("Shared secret used to verify the `token` cookie; without it every dashboard request is sent to login")
            .env("SULIO_JWT_SECRET")
            .hide_env_values(true),
    )
}

pub struct Options {
    pub jwt_secret: Option<SecretString>,
}

impl Options {
    /// An empty secret counts as absent.
    #[must_use]
    pub fn parse(matches: &ArgMatches) -> Self {
        let jwt_secret = matches
            .get_one::<String>(ARG_JWT_SECRET)
            .filter(|secret| !secret.is_empty())
            .cloned()
            .map(SecretString::from);

        Self { jwt_secret }
    }
}
