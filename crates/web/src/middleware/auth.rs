use axum::{extract::Request, middleware::Next, response::Response};
use uuid::Uuid;

use crate::error::WebError;

/// Header carrying the authenticated user, set by the upstream gateway.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Caller identity inserted into request extensions by [`require_user`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub Uuid);

pub async fn require_user(mut req: Request, next: Next) -> Result<Response, WebError> {
    let user_id = req
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Uuid::parse_str(value.trim()).ok());

    let Some(user_id) = user_id else {
        tracing::warn!(path = %req.uri().path(), "Rejected request without a valid user id");
        return Err(WebError::Unauthorized);
    };

    req.extensions_mut().insert(AuthUser(user_id));
    Ok(next.run(req).await)
}
