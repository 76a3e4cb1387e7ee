//! Reading the `token` cookie from requests.

use axum::http::{header::COOKIE, HeaderMap};

pub const TOKEN_COOKIE_NAME: &str = "token";

/// Value of the `token` cookie, looking through every `Cookie` header.
///
/// A missing cookie is not an error, just no credential.
#[must_use]
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|header| header.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (key, val) = pair.trim().split_once('=')?;
            (key.trim() == TOKEN_COOKIE_NAME).then(|| val.trim().to_string())
        })
}
