use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::db::UserRepo;
use crate::error::{AppError, Result};
use crate::models::{CredentialsRequest, User};
use crate::routes::parse_body;
use crate::security::hash_password;
use crate::AppState;

/// Register a new user
///
/// Stores a bcrypt hash of the password. Returns 409 Conflict if the
/// username is taken.
pub async fn register_user(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<User>> {
    let creds = parse_body(payload)?
        .validate_for_register()
        .map_err(AppError::Validation)?;

    let password = creds.password;
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password)).await??;

    let record = UserRepo::new(&state.pool)
        .create(&creds.username, &password_hash)
        .await?;

    tracing::info!(user_id = record.id, "New user registered");

    Ok(Json(User::from(record)))
}
