pub mod habit_lists;
pub mod habits;
pub mod health;
pub mod register;
pub mod session;
pub mod validation;

pub use habit_lists::{list_habit_lists, upsert_habit_list};
pub use habits::{create_habit, list_habits};
pub use health::health_check;
pub use register::register_user;
pub use session::{current_user, login, logout};
pub use validation::parse_body;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::AppState;

/// All application routes, without the CORS and trace layers
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/register", post(register_user))
        .route("/api/login", post(login))
        .route("/api/logout", post(logout))
        .route("/api/user", get(current_user))
        .route(
            "/api/habit-lists",
            post(upsert_habit_list).get(list_habit_lists),
        )
        .route("/api/habits", post(create_habit).get(list_habits))
        .with_state(state)
}

/// Credentialed CORS for the configured origins
///
/// Auth rides in the `jwt` cookie, so only `Content-Type` is allowed as a
/// request header.
pub fn cors_layer(allowed_origins: &[String]) -> Result<CorsLayer, String> {
    let origins = allowed_origins
        .iter()
        .map(|s| s.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("Invalid ALLOWED_ORIGINS entry: {e}"))?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true))
}
