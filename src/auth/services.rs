use anyhow::Context;
use tracing::{info, warn};

use crate::{
    auth::{
        dto::{LoginRequest, RegisterRequest},
        jwt::JwtKeys,
        password::{hash_password_blocking, verify_password_blocking},
        validation::validate_registration,
    },
    error::AppError,
    users::{
        repo::{StoreError, UserStore},
        repo_types::NewUser,
    },
};

/// Validates, hashes and stores a new account.
pub async fn register(store: &dyn UserStore, req: RegisterRequest) -> Result<(), AppError> {
    let reg = validate_registration(req).map_err(|e| {
        warn!(reason = %e, "registration rejected");
        e
    })?;

    let password_hash = hash_password_blocking(reg.password).await?;

    let new_user = NewUser {
        username: reg.username,
        email: reg.email,
        password_hash,
    };

    match store.insert(new_user).await {
        Ok(user) => {
            info!(user_id = %user.id, username = %user.username, "user registered");
            Ok(())
        }
        Err(StoreError::Duplicate(constraint)) => {
            warn!(%constraint, "username or email already registered");
            Err(AppError::Conflict)
        }
        Err(StoreError::Database(e)) => Err(AppError::Internal(
            anyhow::Error::new(e).context("insert user"),
        )),
    }
}

/// Checks credentials and returns a freshly signed token.
///
/// Unknown user and wrong password produce the same error.
pub async fn login(
    store: &dyn UserStore,
    keys: &JwtKeys,
    req: LoginRequest,
) -> Result<String, AppError> {
    let user = store
        .find_by_username(&req.username)
        .await
        .context("find user by username")?;

    let Some(user) = user else {
        warn!(username = %req.username, "login unknown username");
        return Err(AppError::InvalidCredentials);
    };

    let ok = verify_password_blocking(req.password, user.password_hash.clone()).await?;
    if !ok {
        warn!(user_id = %user.id, "login invalid password");
        return Err(AppError::InvalidCredentials);
    }

    let token = keys.sign(&user.username)?;
    info!(user_id = %user.id, username = %user.username, "user logged in");
    Ok(token)
}
