//! Habit list repository
//!
//! The upsert runs as one transaction: find the list, update it and cascade
//! the rename to its habits, or insert a new list. Returning early drops the
//! transaction, which rolls back anything already written.

use sqlx::{PgConnection, PgPool};

use crate::constants::ERR_HABIT_NAME_TAKEN;
use crate::error::{AppError, Result};
use crate::models::{HabitList, HabitListInput};

/// What the upsert did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created(HabitList),
    Updated {
        list: HabitList,
        /// Habits retargeted to the new name and repeat count
        habits_updated: u64,
    },
}

impl UpsertOutcome {
    pub fn into_list(self) -> HabitList {
        match self {
            UpsertOutcome::Created(list) => list,
            UpsertOutcome::Updated { list, .. } => list,
        }
    }
}

/// Habit list repository
pub struct HabitListRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> HabitListRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create the owner's habit list, or update the existing one and cascade
    /// its new name and default repeat count to every habit filed under the
    /// old name.
    ///
    /// With `input.id` unset the list is addressed by `(owner, habit_name)`,
    /// so a match can only be re-styled under the same name. With `input.id`
    /// set the list is addressed by id and may be renamed; an id the owner
    /// does not have is [`AppError::HabitListNotFound`].
    pub async fn upsert(&self, owner_id: i32, input: &HabitListInput) -> Result<UpsertOutcome> {
        let mut tx = self.pool.begin().await?;

        let existing = match input.id {
            Some(id) => Some(
                find_by_id(&mut tx, owner_id, id)
                    .await?
                    .ok_or(AppError::HabitListNotFound)?,
            ),
            None => find_by_name(&mut tx, owner_id, &input.habit_name).await?,
        };

        let outcome = match existing {
            Some(old) => {
                if old.habit_name != input.habit_name
                    && find_by_name(&mut tx, owner_id, &input.habit_name)
                        .await?
                        .is_some()
                {
                    return Err(AppError::UpdateConflict(ERR_HABIT_NAME_TAKEN.to_string()));
                }

                let list = update_list(&mut tx, owner_id, old.id, input).await?;
                let habits_updated = retarget_habits(
                    &mut tx,
                    owner_id,
                    &old.habit_name,
                    &input.habit_name,
                    input.default_repeat_count,
                )
                .await?;

                tracing::info!(
                    owner_id,
                    list_id = list.id,
                    habits_updated,
                    "Updated habit list '{}' -> '{}'",
                    old.habit_name,
                    list.habit_name
                );
                UpsertOutcome::Updated {
                    list,
                    habits_updated,
                }
            }
            None => {
                tracing::debug!(
                    owner_id,
                    "No habit list named '{}', creating it",
                    input.habit_name
                );
                let list = insert_list(&mut tx, owner_id, input).await?;
                tracing::info!(owner_id, list_id = list.id, "Created habit list '{}'", list.habit_name);
                UpsertOutcome::Created(list)
            }
        };

        tx.commit().await?;

        Ok(outcome)
    }

    pub async fn find_by_name(&self, owner_id: i32, habit_name: &str) -> Result<Option<HabitList>> {
        let mut conn = self.pool.acquire().await?;
        find_by_name(&mut conn, owner_id, habit_name).await
    }

    /// All of the owner's lists, oldest first
    pub async fn list_for_owner(&self, owner_id: i32) -> Result<Vec<HabitList>> {
        let lists = sqlx::query_as::<_, HabitList>(
            r#"
            SELECT id, owner_id, habit_name, icon_url, color, default_repeat_count
            FROM habit_lists
            WHERE owner_id = $1
            ORDER BY id
            "#,
        )
        .bind(owner_id)
        .fetch_all(self.pool)
        .await?;

        Ok(lists)
    }
}

async fn find_by_name(
    conn: &mut PgConnection,
    owner_id: i32,
    habit_name: &str,
) -> Result<Option<HabitList>> {
    let list = sqlx::query_as::<_, HabitList>(
        r#"
        SELECT id, owner_id, habit_name, icon_url, color, default_repeat_count
        FROM habit_lists
        WHERE owner_id = $1 AND habit_name = $2
        "#,
    )
    .bind(owner_id)
    .bind(habit_name)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(list)
}

async fn find_by_id(conn: &mut PgConnection, owner_id: i32, id: i32) -> Result<Option<HabitList>> {
    let list = sqlx::query_as::<_, HabitList>(
        r#"
        SELECT id, owner_id, habit_name, icon_url, color, default_repeat_count
        FROM habit_lists
        WHERE owner_id = $1 AND id = $2
        "#,
    )
    .bind(owner_id)
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(list)
}

async fn update_list(
    conn: &mut PgConnection,
    owner_id: i32,
    id: i32,
    input: &HabitListInput,
) -> Result<HabitList> {
    sqlx::query_as::<_, HabitList>(
        r#"
        UPDATE habit_lists
        SET habit_name = $1, icon_url = $2, color = $3, default_repeat_count = $4
        WHERE owner_id = $5 AND id = $6
        RETURNING id, owner_id, habit_name, icon_url, color, default_repeat_count
        "#,
    )
    .bind(&input.habit_name)
    .bind(&input.icon_url)
    .bind(&input.color)
    .bind(input.default_repeat_count)
    .bind(owner_id)
    .bind(id)
    .fetch_one(&mut *conn)
    .await
    .map_err(AppError::from_write)
}

/// Point every habit filed under `old_name` at the new name and target count
async fn retarget_habits(
    conn: &mut PgConnection,
    owner_id: i32,
    old_name: &str,
    new_name: &str,
    target_repeat_count: i32,
) -> Result<u64> {
    let result = sqlx::query(
        r#"
        UPDATE habits
        SET habit_name = $1, target_repeat_count = $2
        WHERE owner_id = $3 AND habit_name = $4
        "#,
    )
    .bind(new_name)
    .bind(target_repeat_count)
    .bind(owner_id)
    .bind(old_name)
    .execute(&mut *conn)
    .await
    .map_err(AppError::from_write)?;

    Ok(result.rows_affected())
}

async fn insert_list(
    conn: &mut PgConnection,
    owner_id: i32,
    input: &HabitListInput,
) -> Result<HabitList> {
    sqlx::query_as::<_, HabitList>(
        r#"
        INSERT INTO habit_lists (owner_id, habit_name, icon_url, color, default_repeat_count)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, owner_id, habit_name, icon_url, color, default_repeat_count
        "#,
    )
    .bind(owner_id)
    .bind(&input.habit_name)
    .bind(&input.icon_url)
    .bind(&input.color)
    .bind(input.default_repeat_count)
    .fetch_one(&mut *conn)
    .await
    .map_err(AppError::from_write)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(id: i32) -> HabitList {
        HabitList {
            id,
            owner_id: 1,
            habit_name: "Exercise".to_string(),
            icon_url: String::new(),
            color: String::new(),
            default_repeat_count: 3,
        }
    }

    #[test]
    fn test_outcome_exposes_list() {
        let created = UpsertOutcome::Created(list(1));
        let updated = UpsertOutcome::Updated {
            list: list(2),
            habits_updated: 4,
        };
        assert_eq!(created.into_list().id, 1);
        assert_eq!(updated.into_list().id, 2);
    }
}
