use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::MAX_HABIT_NAME_LEN;
use crate::models::validation::{FieldError, Validator};

/// An individual trackable item
///
/// `habit_name` mirrors the parent list's name and is kept in sync by the
/// habit list upsert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Habit {
    #[serde(rename = "ID")]
    pub id: i32,
    #[serde(rename = "Owner_ID")]
    pub owner_id: i32,
    #[serde(rename = "Habit_List_ID")]
    pub habit_list_id: Option<i32>,
    #[serde(rename = "Habit_Name")]
    pub habit_name: String,
    #[serde(rename = "Date_Created")]
    pub date_created: NaiveDate,
    #[serde(rename = "Comment")]
    pub comment: String,
    #[serde(rename = "Target_Repeat_Count")]
    pub target_repeat_count: i32,
    #[serde(rename = "Repeat_Count")]
    pub repeat_count: i32,
}

/// Body of `POST /api/habits`
#[derive(Debug, Default, Deserialize)]
pub struct CreateHabitRequest {
    /// Name of the caller's habit list to file the habit under
    #[serde(rename = "Habit_Name")]
    pub habit_name: Option<String>,
    #[serde(rename = "Comment")]
    pub comment: Option<String>,
}

impl CreateHabitRequest {
    /// Returns the trimmed list name and the comment
    pub fn validate(self) -> Result<(String, String), Vec<FieldError>> {
        let mut v = Validator::new();
        v.required_str("Habit_Name", self.habit_name.as_deref(), MAX_HABIT_NAME_LEN);
        v.finish()?;

        Ok((
            self.habit_name.unwrap_or_default().trim().to_string(),
            self.comment.unwrap_or_default(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_habit_request() {
        let req: CreateHabitRequest =
            serde_json::from_value(json!({ "Habit_Name": "Exercise", "Comment": "morning run" }))
                .unwrap();
        assert_eq!(
            req.validate().unwrap(),
            ("Exercise".to_string(), "morning run".to_string())
        );
    }

    #[test]
    fn test_create_habit_requires_name() {
        let req: CreateHabitRequest =
            serde_json::from_value(json!({ "Comment": "orphan" })).unwrap();
        let errors = req.validate().unwrap_err();
        assert_eq!(errors[0].field, "Habit_Name");
    }

    #[test]
    fn test_habit_date_serializes_as_iso_date() {
        let habit = Habit {
            id: 1,
            owner_id: 2,
            habit_list_id: Some(3),
            habit_name: "Exercise".to_string(),
            date_created: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            comment: String::new(),
            target_repeat_count: 3,
            repeat_count: 0,
        };
        let value = serde_json::to_value(&habit).unwrap();
        assert_eq!(value["Date_Created"], "2024-03-09");
        assert_eq!(value["Habit_List_ID"], 3);
    }
}
