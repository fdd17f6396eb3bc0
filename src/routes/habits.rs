use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::auth::AuthUser;
use crate::db::{HabitListRepo, HabitRepo};
use crate::error::{AppError, Result};
use crate::models::{CreateHabitRequest, Habit};
use crate::routes::parse_body;
use crate::AppState;

/// Add a habit to one of the caller's habit lists
///
/// The target count starts at the list's default and the repeat count at 0.
/// Returns 404 if the caller has no list with that name.
pub async fn create_habit(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: std::result::Result<Json<CreateHabitRequest>, JsonRejection>,
) -> Result<Json<Habit>> {
    let (habit_name, comment) = parse_body(payload)?
        .validate()
        .map_err(AppError::Validation)?;

    let list = HabitListRepo::new(&state.pool)
        .find_by_name(auth.owner_id, &habit_name)
        .await?
        .ok_or(AppError::HabitListNotFound)?;

    let habit = HabitRepo::new(&state.pool).create(&list, &comment).await?;

    tracing::info!(
        owner_id = auth.owner_id,
        habit_id = habit.id,
        "Created habit under '{}'",
        habit.habit_name
    );

    Ok(Json(habit))
}

/// The caller's habits
pub async fn list_habits(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<Habit>>> {
    let habits = HabitRepo::new(&state.pool)
        .list_for_owner(auth.owner_id)
        .await?;

    Ok(Json(habits))
}
