use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::auth::AuthUser;
use crate::db::HabitListRepo;
use crate::error::{AppError, Result};
use crate::models::{HabitList, UpsertHabitListRequest};
use crate::routes::parse_body;
use crate::AppState;

/// Create or update a habit list
///
/// A list the caller already has under `Habit_Name` (or under `ID`, when
/// given) is updated in place, and every habit filed under its old name is
/// moved to the new name and `Default_Repeat_Count`. Otherwise a new list is
/// created. Either way the resulting list is returned.
pub async fn upsert_habit_list(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: std::result::Result<Json<UpsertHabitListRequest>, JsonRejection>,
) -> Result<Json<HabitList>> {
    let input = parse_body(payload)?
        .validate()
        .map_err(AppError::Validation)?;

    let outcome = HabitListRepo::new(&state.pool)
        .upsert(auth.owner_id, &input)
        .await?;

    Ok(Json(outcome.into_list()))
}

/// The caller's habit lists
pub async fn list_habit_lists(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<HabitList>>> {
    let lists = HabitListRepo::new(&state.pool)
        .list_for_owner(auth.owner_id)
        .await?;

    Ok(Json(lists))
}
