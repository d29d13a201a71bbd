use axum::{extract::State, routing::get, Json, Router};
use tracing::{debug, instrument};

use crate::{
    auth::extractors::AuthUser,
    error::AppError,
    state::AppState,
    users::repo_types::User,
};

pub fn users_routes() -> Router<AppState> {
    Router::new().route("/users", get(list_users).post(list_users))
}

/// Every stored account; `password_hash` is never serialized.
#[instrument(skip(state, caller))]
pub async fn list_users(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<Json<Vec<User>>, AppError> {
    let users = state
        .store
        .list()
        .await
        .map_err(|e| AppError::Internal(anyhow::Error::new(e).context("list users")))?;
    debug!(caller = %caller.username, count = users.len(), "listed users");
    Ok(Json(users))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;
    use uuid::Uuid;

    #[test]
    fn user_serialization_omits_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            username: "alice".into(),
            email: "a@b.com".into(),
            password_hash: "$argon2id$v=19$secret".into(),
            created_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["username"], "alice");
        assert_eq!(json["email"], "a@b.com");
        assert!(json.get("password_hash").is_none());
        assert!(json["created_at"].is_string());
    }
}
