use serde::{Deserialize, Serialize};

use crate::constants::{MAX_COLOR_LEN, MAX_HABIT_NAME_LEN};
use crate::models::validation::{FieldError, Validator};

/// A named, styled grouping of habits belonging to one owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct HabitList {
    #[serde(rename = "ID")]
    pub id: i32,
    #[serde(rename = "Owner_ID")]
    pub owner_id: i32,
    #[serde(rename = "Habit_Name")]
    pub habit_name: String,
    #[serde(rename = "Icon_Url")]
    pub icon_url: String,
    #[serde(rename = "Color")]
    pub color: String,
    #[serde(rename = "Default_Repeat_Count")]
    pub default_repeat_count: i32,
}

/// Body of `POST /api/habit-lists`
///
/// Every field is optional at the serde level so that missing fields are
/// reported by [`UpsertHabitListRequest::validate`] instead of a generic
/// deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct UpsertHabitListRequest {
    /// Address an existing list by id, which allows renaming it
    #[serde(rename = "ID")]
    pub id: Option<i32>,
    #[serde(rename = "Habit_Name")]
    pub habit_name: Option<String>,
    #[serde(rename = "Icon_Url")]
    pub icon_url: Option<String>,
    #[serde(rename = "Color")]
    pub color: Option<String>,
    #[serde(rename = "Default_Repeat_Count")]
    pub default_repeat_count: Option<i32>,
}

/// Validated attributes for the habit list upsert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitListInput {
    pub id: Option<i32>,
    pub habit_name: String,
    pub icon_url: String,
    pub color: String,
    pub default_repeat_count: i32,
}

impl UpsertHabitListRequest {
    pub fn validate(self) -> Result<HabitListInput, Vec<FieldError>> {
        let mut v = Validator::new();

        if matches!(self.id, Some(id) if id <= 0) {
            v.fail("ID", "must be a positive integer");
        }
        v.required_str("Habit_Name", self.habit_name.as_deref(), MAX_HABIT_NAME_LEN);
        if let Some(color) = &self.color {
            v.max_len("Color", color, MAX_COLOR_LEN);
        }
        match self.default_repeat_count {
            None => v.fail("Default_Repeat_Count", "is required"),
            Some(n) if n < 1 => v.fail("Default_Repeat_Count", "must be at least 1"),
            Some(_) => {}
        }

        v.finish()?;

        Ok(HabitListInput {
            id: self.id,
            habit_name: self.habit_name.unwrap_or_default().trim().to_string(),
            icon_url: self.icon_url.unwrap_or_default(),
            color: self.color.unwrap_or_default(),
            default_repeat_count: self.default_repeat_count.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> UpsertHabitListRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_valid_request() {
        let input = parse(json!({
            "Habit_Name": "  Exercise ",
            "Icon_Url": "https://icons.test/run.svg",
            "Color": "#ff8800",
            "Default_Repeat_Count": 3
        }))
        .validate()
        .unwrap();

        assert_eq!(input.id, None);
        assert_eq!(input.habit_name, "Exercise");
        assert_eq!(input.icon_url, "https://icons.test/run.svg");
        assert_eq!(input.color, "#ff8800");
        assert_eq!(input.default_repeat_count, 3);
    }

    #[test]
    fn test_optional_style_fields_default_to_empty() {
        let input = parse(json!({ "Habit_Name": "Read", "Default_Repeat_Count": 1 }))
            .validate()
            .unwrap();
        assert_eq!(input.icon_url, "");
        assert_eq!(input.color, "");
    }

    #[test]
    fn test_missing_habit_name() {
        let errors = parse(json!({ "Default_Repeat_Count": 2 }))
            .validate()
            .unwrap_err();
        assert_eq!(errors, vec![FieldError::new("Habit_Name", "is required")]);
    }

    #[test]
    fn test_reports_every_offending_field() {
        let errors = parse(json!({
            "ID": 0,
            "Habit_Name": "",
            "Color": "c".repeat(31),
            "Default_Repeat_Count": 0
        }))
        .validate()
        .unwrap_err();

        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["ID", "Habit_Name", "Color", "Default_Repeat_Count"]
        );
    }

    #[test]
    fn test_habit_list_wire_keys() {
        let list = HabitList {
            id: 7,
            owner_id: 1,
            habit_name: "Workout".to_string(),
            icon_url: String::new(),
            color: "blue".to_string(),
            default_repeat_count: 5,
        };
        let value = serde_json::to_value(&list).unwrap();
        assert_eq!(value["ID"], 7);
        assert_eq!(value["Owner_ID"], 1);
        assert_eq!(value["Habit_Name"], "Workout");
        assert_eq!(value["Default_Repeat_Count"], 5);
    }
}
