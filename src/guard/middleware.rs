use super::{canonicalize, cookie::token_from_headers, is_guarded, RouteGuard};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;

/// axum middleware applying the [`RouteGuard`] to every guarded path.
///
/// Mount with `axum::middleware::from_fn_with_state(guard, route_guard)`.
/// Redirects are `307 Temporary Redirect`. The exclusion check runs on the
/// canonical path, the same one the static-file fallback resolves.
pub async fn route_guard(
    State(guard): State<Arc<RouteGuard>>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path();

    if !is_guarded(&canonicalize(path)) {
        return next.run(request).await;
    }

    let token = token_from_headers(request.headers());
    let decision = guard.evaluate(path, token.as_deref());
    decision.record();

    match decision.outcome.location() {
        Some(location) => Redirect::temporary(&location).into_response(),
        None => next.run(request).await,
    }
}
