use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Registration payload. Fields are not validated here; a missing one is
/// passed on as NULL and rejected by the `NOT NULL` columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAccount {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl NewAccount {
    /// Reads the three fields out of any JSON document. Scalars are bound as
    /// their text form, arrays and objects as JSON text. A document that is not
    /// an object yields no fields at all.
    pub fn from_json(body: &Value) -> Self {
        let field = |name: &str| body.as_object().and_then(|fields| fields.get(name)).and_then(as_column_text);
        Self {
            username: field("username"),
            email: field("email"),
            password: field("password"),
        }
    }
}

fn as_column_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
impl NewAccount {
    pub fn new(username: &str, email: &str, password: &str) -> Self {
        Self {
            username: Some(username.to_string()),
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_and_null_fields_become_none() {
        let payload = NewAccount::from_json(&json!({ "username": "alice", "email": null }));
        assert_eq!(payload.username.as_deref(), Some("alice"));
        assert!(payload.email.is_none());
        assert!(payload.password.is_none());
    }

    #[test]
    fn non_string_fields_are_bound_as_text() {
        let payload = NewAccount::from_json(&json!({
            "username": 42,
            "email": true,
            "password": ["a", 1],
        }));
        assert_eq!(payload.username.as_deref(), Some("42"));
        assert_eq!(payload.email.as_deref(), Some("true"));
        assert_eq!(payload.password.as_deref(), Some(r#"["a",1]"#));

        let payload = NewAccount::from_json(&json!({ "username": { "first": "al" } }));
        assert_eq!(payload.username.as_deref(), Some(r#"{"first":"al"}"#));
    }

    #[test]
    fn non_object_documents_have_no_fields() {
        assert_eq!(NewAccount::from_json(&json!([])), NewAccount::default());
        assert_eq!(NewAccount::from_json(&json!("alice")), NewAccount::default());
    }
}
