use sqlx::PgPool;

use crate::error::Result;
use crate::models::{Habit, HabitList};

/// Habit repository
pub struct HabitRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> HabitRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// File a new habit under `list`, seeded with the list's default count
    pub async fn create(&self, list: &HabitList, comment: &str) -> Result<Habit> {
        let habit = sqlx::query_as::<_, Habit>(
            r#"
            INSERT INTO habits (owner_id, habit_list_id, habit_name, comment, target_repeat_count)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, owner_id, habit_list_id, habit_name, date_created, comment,
                      target_repeat_count, repeat_count
            "#,
        )
        .bind(list.owner_id)
        .bind(list.id)
        .bind(&list.habit_name)
        .bind(comment)
        .bind(list.default_repeat_count)
        .fetch_one(self.pool)
        .await?;

        Ok(habit)
    }

    /// All of the owner's habits, oldest first
    pub async fn list_for_owner(&self, owner_id: i32) -> Result<Vec<Habit>> {
        let habits = sqlx::query_as::<_, Habit>(
            r#"
            SELECT id, owner_id, habit_list_id, habit_name, date_created, comment,
                   target_repeat_count, repeat_count
            FROM habits
            WHERE owner_id = $1
            ORDER BY id
            "#,
        )
        .bind(owner_id)
        .fetch_all(self.pool)
        .await?;

        Ok(habits)
    }
}
