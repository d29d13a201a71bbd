use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::warn;

use super::{claims::Claims, jwt::JwtKeys};
use crate::error::AppError;

/// Verified token claims of the caller.
///
/// A missing or empty `Authorization` header is `Unauthorized`; anything
/// present that does not verify is `Forbidden`. Both `<token>` and
/// `Bearer <token>` are accepted.
pub struct AuthUser(pub Claims);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some(raw) = parts.headers.get(AUTHORIZATION) else {
            warn!("missing Authorization header");
            return Err(AppError::Unauthorized);
        };
        if raw.is_empty() {
            warn!("empty Authorization header");
            return Err(AppError::Unauthorized);
        }

        let value = raw.to_str().map_err(|_| AppError::Forbidden)?.trim();
        let token = value
            .strip_prefix("Bearer ")
            .or_else(|| value.strip_prefix("bearer "))
            .unwrap_or(value)
            .trim();

        let keys = JwtKeys::from_ref(state);
        match keys.verify(token) {
            Ok(claims) => Ok(AuthUser(claims)),
            Err(e) => {
                warn!(error = %e, "invalid or expired token");
                Err(AppError::Forbidden)
            }
        }
    }
}
