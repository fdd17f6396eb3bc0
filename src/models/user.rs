use serde::{Deserialize, Serialize};

use crate::constants::{MAX_PASSWORD_LEN, MAX_USERNAME_LEN, MIN_PASSWORD_LEN, MIN_USERNAME_LEN};
use crate::models::validation::{FieldError, Validator};

/// User row as stored in Postgres
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: i32,
    pub username: String,
    /// bcrypt hash, never serialized
    pub password_hash: String,
}

/// User model for API responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "ID")]
    pub id: i32,
    #[serde(rename = "Username")]
    pub username: String,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            username: record.username,
        }
    }
}

/// Body of `POST /api/register` and `POST /api/login`
#[derive(Debug, Default, Deserialize)]
pub struct CredentialsRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Checked username/password pair
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl CredentialsRequest {
    /// Registration enforces the length rules on both fields
    pub fn validate_for_register(self) -> Result<Credentials, Vec<FieldError>> {
        let mut v = Validator::new();
        v.required_str("username", self.username.as_deref(), MAX_USERNAME_LEN);
        if let Some(username) = self.username.as_deref().map(str::trim) {
            if !username.is_empty() {
                v.min_len("username", username, MIN_USERNAME_LEN);
            }
        }
        match self.password.as_deref() {
            None => v.fail("password", "is required"),
            Some(p) if p.len() > MAX_PASSWORD_LEN => {
                v.fail("password", format!("must be at most {MAX_PASSWORD_LEN} bytes"))
            }
            Some(p) => v.min_len("password", p, MIN_PASSWORD_LEN),
        }
        v.finish()?;
        Ok(self.into_credentials())
    }

    /// Login only needs both fields present
    pub fn validate_for_login(self) -> Result<Credentials, Vec<FieldError>> {
        let mut v = Validator::new();
        v.required_str("username", self.username.as_deref(), MAX_USERNAME_LEN);
        if self.password.as_deref().map_or(true, str::is_empty) {
            v.fail("password", "is required");
        }
        v.finish()?;
        Ok(self.into_credentials())
    }

    fn into_credentials(self) -> Credentials {
        Credentials {
            username: self.username.unwrap_or_default().trim().to_string(),
            password: self.password.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: Option<&str>, password: Option<&str>) -> CredentialsRequest {
        CredentialsRequest {
            username: username.map(String::from),
            password: password.map(String::from),
        }
    }

    #[test]
    fn test_register_accepts_valid_credentials() {
        let creds = request(Some(" demo "), Some("vErYSeCuRePaSsWoRd123!"))
            .validate_for_register()
            .unwrap();
        assert_eq!(creds.username, "demo");
    }

    #[test]
    fn test_register_rejects_short_fields() {
        let errors = request(Some("ab"), Some("short"))
            .validate_for_register()
            .unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["username", "password"]);
    }

    #[test]
    fn test_register_rejects_overlong_password() {
        let long = "p".repeat(MAX_PASSWORD_LEN + 1);
        let errors = request(Some("demo"), Some(&long))
            .validate_for_register()
            .unwrap_err();
        assert_eq!(errors[0].field, "password");
    }

    #[test]
    fn test_login_requires_both_fields() {
        let errors = request(None, Some("")).validate_for_login().unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_user_from_record_drops_hash() {
        let user = User::from(UserRecord {
            id: 4,
            username: "demo".to_string(),
            password_hash: "$2b$10$hash".to_string(),
        });
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value, serde_json::json!({ "ID": 4, "Username": "demo" }));
    }
}
