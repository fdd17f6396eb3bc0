use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::{AppError, Result};

/// Unwrap a JSON body, turning a rejection into a 400 with axum's reason
///
/// Handlers take `Result<Json<T>, JsonRejection>` so that a malformed body
/// is reported in the same `{message}` shape as every other error.
pub fn parse_body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => Err(AppError::InvalidInput(rejection.body_text())),
    }
}
