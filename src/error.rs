use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::constants::{
    ERR_HABIT_LIST_CONFLICT, ERR_HABIT_NAME_TAKEN, ERR_INVALID_CREDENTIALS, ERR_UNAUTHENTICATED,
    ERR_VALIDATION_FAILED,
};
use crate::models::FieldError;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Password hash error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("Unauthenticated")]
    Unauthenticated,

    #[error("Validation failed: {0:?}")]
    Validation(Vec<FieldError>),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Update conflict: {0}")]
    UpdateConflict(String),

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Habit list not found")]
    HabitListNotFound,
}

impl AppError {
    /// Map a failed write inside the rename cascade.
    ///
    /// Constraint violations are the caller's fault (400). Anything else
    /// stays an internal database error. The raw driver message is logged,
    /// never returned.
    pub fn from_write(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                tracing::warn!("Unique violation on habit list write: {}", db_err.message());
                AppError::UpdateConflict(ERR_HABIT_NAME_TAKEN.to_string())
            }
            sqlx::Error::Database(db_err)
                if db_err.is_foreign_key_violation() || db_err.is_check_violation() =>
            {
                tracing::warn!("Constraint violation on habit list write: {}", db_err.message());
                AppError::UpdateConflict(ERR_HABIT_LIST_CONFLICT.to_string())
            }
            _ => AppError::Database(err),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_)
            | AppError::Migration(_)
            | AppError::PasswordHash(_)
            | AppError::Token(_)
            | AppError::TaskJoin(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Unauthenticated | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Validation(_) | AppError::InvalidInput(_) | AppError::UpdateConflict(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::UserAlreadyExists => StatusCode::CONFLICT,
            AppError::HabitListNotFound => StatusCode::NOT_FOUND,
        }
    }
}

/// Implement IntoResponse to convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("{:?}", self);
        } else {
            tracing::warn!("Request rejected ({}): {}", status.as_u16(), self);
        }

        let body = match self {
            AppError::Database(_)
            | AppError::Migration(_)
            | AppError::PasswordHash(_)
            | AppError::Token(_)
            | AppError::TaskJoin(_) => json!({ "message": "Internal server error" }),
            AppError::Unauthenticated => json!({ "message": ERR_UNAUTHENTICATED }),
            AppError::Validation(errors) => json!({
                "message": ERR_VALIDATION_FAILED,
                "errors": errors,
            }),
            AppError::InvalidInput(msg) | AppError::UpdateConflict(msg) => {
                json!({ "message": msg })
            }
            AppError::UserAlreadyExists => json!({ "message": "User already exists" }),
            AppError::InvalidCredentials => json!({ "message": ERR_INVALID_CREDENTIALS }),
            AppError::HabitListNotFound => json!({ "message": "Habit list not found" }),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for application results
pub type Result<T> = std::result::Result<T, AppError>;
