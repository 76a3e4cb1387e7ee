//! # Sulio (web gateway)
//!
//! `sulio` serves the Sulio AI web frontend and decides, before any page is
//! served, whether the visitor may see it.
//!
//! ## Route guard
//!
//! Every navigation outside the API routes and build assets is checked for a
//! signed token in the `token` cookie (HMAC-signed JWT, shared secret):
//!
//! - **Dashboard** (`/dashboard*`): requires a valid token, otherwise the
//!   visitor is sent to `/auth/login?from=<path>`.
//! - **Public pages** (`/home`, `/pricing`, `/auth/*`): a signed-in visitor
//!   is sent to `/dashboard`. The landing page `/` is the exception and is
//!   always served.
//! - **Anything else** is served as is.
//!
//! Verification fails closed: a missing secret, a malformed or expired token,
//! or a bad signature all count as signed out.
//!
//! ## Backend
//!
//! Accounts, OTPs, the chatbot and the diary are owned by the Sulio API;
//! [`backend::Client`] speaks its HTTP interface.

pub mod backend;
pub mod cli;
pub mod guard;
pub mod web;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
