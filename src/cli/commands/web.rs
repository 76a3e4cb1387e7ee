use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use std::path::PathBuf;

pub const ARG_PORT: &str = "port";
pub const ARG_WEB_ROOT: &str = "web-root";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_PORT)
                .short('p')
                .long(ARG_PORT)
                .help("Port to listen on")
                .default_value("8080")
                .env("SULIO_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new(ARG_WEB_ROOT)
                .long(ARG_WEB_ROOT)
                .help("Directory with the exported frontend pages and assets")
                .default_value("public")
                .env("SULIO_WEB_ROOT"),
        )
}

#[derive(Debug)]
pub struct Options {
    pub port: u16,
    pub web_root: PathBuf,
}

impl Options {
    /// # Errors
    ///
    /// Returns an error if the web root argument is missing.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080);
        let web_root = matches
            .get_one::<String>(ARG_WEB_ROOT)
            .map(PathBuf::from)
            .context("missing required argument: --web-root")?;

        Ok(Self { port, web_root })
    }
}
