use axum::{extract::rejection::JsonRejection, extract::State, Json};
use axum_extra::extract::cookie::CookieJar;
use serde_json::{json, Value};

use crate::auth::{removal_cookie, session_cookie, AuthUser};
use crate::db::UserRepo;
use crate::error::{AppError, Result};
use crate::models::{CredentialsRequest, User};
use crate::routes::parse_body;
use crate::security::{issue_token, verify_password};
use crate::AppState;

/// Log in and set the `jwt` session cookie
///
/// Unknown usernames and wrong passwords get the same 401.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: std::result::Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<User>)> {
    let creds = parse_body(payload)?
        .validate_for_login()
        .map_err(AppError::Validation)?;

    let record = UserRepo::new(&state.pool)
        .find_by_username(&creds.username)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let password = creds.password;
    let hash = record.password_hash.clone();
    let valid = tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await?;
    if !valid {
        return Err(AppError::InvalidCredentials);
    }

    let ttl_days = state.config.token_ttl_days;
    let token = issue_token(
        record.id,
        &state.config.secret_key,
        chrono::Duration::days(ttl_days),
    )?;

    tracing::info!(user_id = record.id, "User logged in");

    Ok((jar.add(session_cookie(token, ttl_days)), Json(User::from(record))))
}

/// Clear the session cookie
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<Value>) {
    (jar.remove(removal_cookie()), Json(json!({ "message": "Logged out" })))
}

/// The authenticated user
pub async fn current_user(State(state): State<AppState>, auth: AuthUser) -> Result<Json<User>> {
    let record = UserRepo::new(&state.pool)
        .find_by_id(auth.owner_id)
        .await?
        .ok_or(AppError::Unauthenticated)?;

    Ok(Json(User::from(record)))
}
