use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::{get, patch, post},
    Router,
};

use crate::auth::TokenVerifier;
use crate::errors::AppError;
use crate::AppState;

pub mod handlers;

/// Build the API router. All routes are relative — the caller mounts this
/// under `/api`.
///
/// Reads and login are open; the mutating routes sit behind `require_auth`,
/// so a missing or rejected token short-circuits before any handler (and
/// therefore the store) is reached.
pub fn api_router(verifier: TokenVerifier) -> Router<Arc<AppState>> {
    let mutations = Router::new()
        .route("/vendors", post(handlers::create_vendor))
        .route(
            "/vendors/:id",
            patch(handlers::update_vendor_status).delete(handlers::delete_vendor),
        )
        .route_layer(middleware::from_fn_with_state(verifier, require_auth));

    Router::new()
        .route("/auth/login", post(handlers::login))
        .route("/vendors", get(handlers::list_vendors))
        .route("/vendors/bounds", get(handlers::vendors_in_bounds))
        .route("/vendors/:id", get(handlers::get_vendor))
        .merge(mutations)
        .fallback(fallback_404)
}

async fn fallback_404() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// Middleware: validates the `Authorization: Bearer` token and stashes its
/// claims in request extensions for the handler. Rejection is the single
/// invalid-token outcome, distinct from a 404.
pub async fn require_auth(
    State(verifier): State<TokenVerifier>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim);

    let Some(token) = token else {
        tracing::warn!("mutating request without bearer token");
        return Err(AppError::InvalidToken);
    };

    // SECURITY: the token itself is never logged.
    let claims = verifier.verify(token)?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
