//! Token-gated route guard.
//!
//! Every guarded navigation is classified by path and checked for a valid
//! signed token in the `token` cookie:
//!
//! - `/dashboard*` without a valid token redirects to
//!   `/auth/login?from=<path>`.
//! - Allow-listed public pages (except `/`) with a valid token redirect to
//!   `/dashboard`.
//! - Everything else proceeds.
//!
//! [`RouteGuard::evaluate`] is pure: it returns a [`Decision`] and nothing
//! else. Logging happens separately through [`Decision::record`], and the
//! axum wiring lives in [`middleware`].

pub mod cookie;
pub mod middleware;
pub mod path;
pub mod token;

pub use self::middleware::route_guard;
pub use self::path::{canonicalize, classify, is_guarded, PathClass};
pub use self::token::{Claims, Verifier};

use secrecy::SecretString;
use tracing::{debug, error, info};
use url::form_urlencoded::byte_serialize;

/// What happens to a guarded request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Proceed,
    RedirectToLogin { from: String },
    RedirectToDashboard,
}

impl Outcome {
    /// Relative `Location` for redirects, `None` when the request proceeds.
    #[must_use]
    pub fn location(&self) -> Option<String> {
        match self {
            Self::Proceed => None,
            Self::RedirectToLogin { from } => {
                Some(format!("{}?from={}", path::LOGIN_PATH, encode_path(from)))
            }
            Self::RedirectToDashboard => Some(path::DASHBOARD_PATH.to_string()),
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Proceed => "proceed",
            Self::RedirectToLogin { .. } => "redirect_login",
            Self::RedirectToDashboard => "redirect_dashboard",
        }
    }
}

// Form-encode each segment but keep the separators readable.
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| byte_serialize(segment.as_bytes()).collect::<String>())
        .collect::<Vec<_>>()
        .join("/")
}

/// Authentication status of one request.
#[derive(Debug, Clone, PartialEq)]
pub enum Credential {
    Missing,
    Unconfigured,
    Invalid(String),
    Valid(Claims),
}

impl Credential {
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Unconfigured => "unconfigured",
            Self::Invalid(_) => "invalid",
            Self::Valid(_) => "valid",
        }
    }
}

/// Result of evaluating one request.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    /// Path as requested.
    pub path: String,
    /// Path the rules were applied to, see [`canonicalize`].
    pub canonical: String,
    pub class: PathClass,
    pub credential: Credential,
    pub outcome: Outcome,
}

impl Decision {
    /// Emit the decision as a structured event.
    pub fn record(&self) {
        match &self.credential {
            Credential::Unconfigured => {
                error!(path = %self.path, "token secret is not configured, treating request as unauthenticated");
            }
            Credential::Invalid(reason) => {
                debug!(path = %self.path, reason = %reason, "token verification failed");
            }
            Credential::Valid(claims) => {
                debug!(path = %self.path, subject = ?claims.subject(), "token verified");
            }
            Credential::Missing => {}
        }

        let location = self.outcome.location().unwrap_or_default();
        info!(
            path = %self.path,
            canonical = %self.canonical,
            class = %self.class,
            credential = self.credential.as_str(),
            outcome = self.outcome.as_str(),
            location = %location,
            "route guard decision"
        );
    }
}

/// The outcome for a path class and authentication state.
///
/// First matching rule wins; `/` never redirects to the dashboard.
#[must_use]
pub fn decide(path: &str, class: PathClass, authenticated: bool) -> Outcome {
    match class {
        PathClass::Protected if !authenticated => Outcome::RedirectToLogin {
            from: path.to_string(),
        },
        PathClass::Public if authenticated && path != path::ROOT_PATH => {
            Outcome::RedirectToDashboard
        }
        _ => Outcome::Proceed,
    }
}

#[derive(Debug)]
pub struct RouteGuard {
    verifier: Verifier,
}

impl RouteGuard {
    #[must_use]
    pub const fn new(verifier: Verifier) -> Self {
        Self { verifier }
    }

    /// Guard verifying tokens with `secret`; `None` fails every request closed.
    #[must_use]
    pub fn with_secret(secret: Option<&SecretString>) -> Self {
        Self::new(Verifier::new(secret))
    }

    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.verifier.is_configured()
    }

    /// Check the token, if any. Never fails: every error is an unauthenticated state.
    #[must_use]
    pub fn credential(&self, token: Option<&str>) -> Credential {
        let Some(token) = token.filter(|token| !token.is_empty()) else {
            return Credential::Missing;
        };
        match self.verifier.verify(token) {
            Ok(claims) => Credential::Valid(claims),
            Err(token::Error::MissingSecret) => Credential::Unconfigured,
            Err(err) => Credential::Invalid(err.to_string()),
        }
    }

    /// Decide what to do with a request for `path` carrying `token`.
    ///
    /// The rules see the canonical form of `path`; the login redirect's
    /// `from` keeps the path as requested.
    #[must_use]
    pub fn evaluate(&self, path: &str, token: Option<&str>) -> Decision {
        let canonical = canonicalize(path);
        let class = classify(&canonical);
        let credential = self.credential(token);
        let outcome = match decide(&canonical, class, credential.is_authenticated()) {
            Outcome::RedirectToLogin { .. } => Outcome::RedirectToLogin {
                from: path.to_string(),
            },
            outcome => outcome,
        };

        Decision {
            path: path.to_string(),
            canonical,
            class,
            credential,
            outcome,
        }
    }
}
