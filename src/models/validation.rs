//! Field-level validation errors returned to clients

use serde::Serialize;

/// One offending request field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub reason: String,
}

impl FieldError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Collects field errors while a request is checked
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Required string: present and non-blank, at most `max` characters
    pub fn required_str(&mut self, field: &'static str, value: Option<&str>, max: usize) {
        match value.map(str::trim) {
            None => self.fail(field, "is required"),
            Some("") => self.fail(field, "must not be empty"),
            Some(v) => self.max_len(field, v, max),
        }
    }

    pub fn max_len(&mut self, field: &'static str, value: &str, max: usize) {
        if value.chars().count() > max {
            self.fail(field, format!("must be at most {max} characters"));
        }
    }

    pub fn min_len(&mut self, field: &'static str, value: &str, min: usize) {
        if value.chars().count() < min {
            self.fail(field, format!("must be at least {min} characters"));
        }
    }

    pub fn fail(&mut self, field: &'static str, reason: impl Into<String>) {
        self.errors.push(FieldError::new(field, reason));
    }

    pub fn finish(self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_str() {
        let mut v = Validator::new();
        v.required_str("a", None, 10);
        v.required_str("b", Some("   "), 10);
        v.required_str("c", Some("fine"), 10);
        v.required_str("d", Some("far too long"), 5);

        let errors = v.finish().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["a", "b", "d"]);
        assert_eq!(errors[2].reason, "must be at most 5 characters");
    }

    #[test]
    fn test_lengths_count_chars_not_bytes() {
        let mut v = Validator::new();
        v.max_len("name", "ééé", 3);
        assert!(v.finish().is_ok());
    }

    #[test]
    fn test_empty_validator_passes() {
        assert!(Validator::new().finish().is_ok());
    }
}
