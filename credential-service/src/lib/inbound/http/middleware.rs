use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::principal::ports::AuthServicePort;
use crate::inbound::http::router::AppState;
use crate::principal::errors::AuthError;

/// Middleware that validates bearer tokens and stores the verified identity
/// in request extensions.
///
/// A missing header, a malformed header and a rejected token all produce the
/// same 401 response.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(&req)
        .map(str::to_owned)
        .ok_or(AuthError::Unauthenticated)?;

    let identity = state.auth_service.verify_token(&token).await?;

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

/// Token from an `Authorization: Bearer <token>` header. The scheme name is
/// matched case-insensitively (RFC 7235).
fn extract_token_from_header(req: &Request) -> Option<&str> {
    let value = req
        .headers()
        .get(http::header::AUTHORIZATION)?
        .to_str()
        .ok()?;

    let (scheme, token) = value.trim_start().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return None;
    }

    Some(token.trim()).filter(|token| !token.is_empty())
}
