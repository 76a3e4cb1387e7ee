//! Static path rules: which requests the guard sees, and how it classifies them.

use percent_encoding::percent_decode_str;
use std::fmt;

/// Prefix of every page that requires a valid token.
pub const PROTECTED_PREFIX: &str = "/dashboard";

/// Login page, target of unauthenticated dashboard requests.
pub const LOGIN_PATH: &str = "/auth/login";

/// Landing page for authenticated users leaving a public page.
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Root path, exempt from the authenticated-public redirect.
pub const ROOT_PATH: &str = "/";

/// Marketing and auth pages reachable without a token.
pub const PUBLIC_PATHS: [&str; 8] = [
    "/auth/login",
    "/auth/register",
    "/auth/verify",
    "/auth/request-password-reset",
    "/auth/reset-password",
    "/",
    "/home",
    "/pricing",
];

// Matched against the path text after the leading slash, so `/apiary` is
// excluded along with `/api/...`.
const EXCLUDED_PREFIXES: [&str; 5] = ["api", "_next/static", "_next/image", "favicon.ico", "public"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClass {
    Public,
    Protected,
    Other,
}

impl PathClass {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for PathClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a request path. The protected prefix is checked first.
#[must_use]
pub fn classify(path: &str) -> PathClass {
    if path.starts_with(PROTECTED_PREFIX) {
        PathClass::Protected
    } else if PUBLIC_PATHS.contains(&path) {
        PathClass::Public
    } else {
        PathClass::Other
    }
}

/// The path as the static-file server resolves it.
///
/// Percent-decoded, with empty and `.` segments dropped and `..` stepping
/// back one segment. A trailing slash is kept. Every rule in this module
/// expects its input in this form.
#[must_use]
pub fn canonicalize(path: &str) -> String {
    let decoded = percent_decode_str(path).decode_utf8_lossy();

    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }

    let mut canonical = format!("/{}", segments.join("/"));
    if !segments.is_empty() && decoded.ends_with('/') {
        canonical.push('/');
    }
    canonical
}

/// Whether the guard runs for `path` at all.
///
/// API routes, build assets, the favicon and the public-assets folder are
/// never guarded.
#[must_use]
pub fn is_guarded(path: &str) -> bool {
    let Some(rest) = path.strip_prefix('/') else {
        return true;
    };
    !EXCLUDED_PREFIXES
        .iter()
        .any(|prefix| rest.starts_with(prefix))
}
