//! # Form Input
//!
//! The create/update operations read their payload from a form: a set of
//! input fields looked up by id. Whatever the user typed is sent verbatim,
//! and an absent field reads as an emptied input.

use serde::Serialize;
use std::collections::HashMap;

pub const NAME_FIELD: &str = "name";
pub const EMAIL_FIELD: &str = "email";
pub const PASSWORD_FIELD: &str = "password";

/// Source of input values, keyed by field id
pub trait FormSource {
    /// Current value of the field, or `None` when the field does not exist
    fn field(&self, id: &str) -> Option<String>;
}

/// Payload of a create/update call, built fresh on every call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl UserInput {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// Snapshot the three user fields from a form
    pub fn read_from(form: &impl FormSource) -> Self {
        let read = |id: &str| form.field(id).unwrap_or_default();
        Self {
            name: read(NAME_FIELD),
            email: read(EMAIL_FIELD),
            password: read(PASSWORD_FIELD),
        }
    }
}

/// Form backed by a plain map; what the CLI and tests fill in
#[derive(Debug, Clone, Default)]
pub struct MemoryForm {
    fields: HashMap<String, String>,
}

impl MemoryForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, id: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(id.into(), value.into());
    }

    /// Builder-style `set`
    pub fn with(mut self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(id, value);
        self
    }

    /// Form with only the fields that were actually provided
    pub fn from_optional(
        name: Option<String>,
        email: Option<String>,
        password: Option<String>,
    ) -> Self {
        let mut form = Self::new();
        for (id, value) in [
            (NAME_FIELD, name),
            (EMAIL_FIELD, email),
            (PASSWORD_FIELD, password),
        ] {
            if let Some(value) = value {
                form.set(id, value);
            }
        }
        form
    }
}

impl FormSource for MemoryForm {
    fn field(&self, id: &str) -> Option<String> {
        self.fields.get(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_from_should_copy_values_verbatim() {
        let form = MemoryForm::new()
            .with(NAME_FIELD, "  Alice ")
            .with(EMAIL_FIELD, "not-an-email")
            .with(PASSWORD_FIELD, "");

        let input = UserInput::read_from(&form);
        assert_eq!(input, UserInput::new("  Alice ", "not-an-email", ""));
    }

    #[test]
    fn read_from_should_treat_missing_fields_as_empty() {
        let form = MemoryForm::new().with(EMAIL_FIELD, "alice@example.com");

        let input = UserInput::read_from(&form);
        assert_eq!(input.name, "");
        assert_eq!(input.email, "alice@example.com");
        assert_eq!(input.password, "");
    }

    #[test]
    fn serialization_should_keep_field_order() {
        let input = UserInput::new("Alice", "alice@example.com", "secret");
        let json = serde_json::to_string(&input).unwrap();
        assert_eq!(
            json,
            r#"{"name":"Alice","email":"alice@example.com","password":"secret"}"#
        );
    }

    #[test]
    fn from_optional_should_skip_absent_values() {
        let form = MemoryForm::from_optional(Some("Bob".to_string()), None, None);
        assert_eq!(form.field(NAME_FIELD), Some("Bob".to_string()));
        assert_eq!(form.field(EMAIL_FIELD), None);
    }
}
