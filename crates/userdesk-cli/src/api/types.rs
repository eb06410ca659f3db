//! API request and response types
//!
//! Matches the users backend: plain JSON objects, no response envelope.

use crate::api::error::{ApiError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A JSON object of field name to value, sent as a request body or query
pub type Payload = Map<String, Value>;

/// Serialize any value into a [`Payload`]
///
/// Fails when the value does not serialize to a JSON object.
pub fn to_payload<T: Serialize + ?Sized>(data: &T) -> Result<Payload> {
    match serde_json::to_value(data).map_err(|e| ApiError::invalid_payload(e.to_string()))? {
        Value::Object(map) => Ok(map),
        other => Err(ApiError::invalid_payload(format!(
            "expected a JSON object, got {}",
            kind_of(&other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Identifier of a user record
///
/// Numeric on the reference backend, but any opaque key is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Numeric(u64),
    Key(String),
}

impl UserId {
    /// Path segment for this id, percent-encoded when it is a string key
    pub fn path_segment(&self) -> String {
        match self {
            UserId::Numeric(n) => n.to_string(),
            UserId::Key(key) => urlencoding::encode(key).into_owned(),
        }
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Numeric(n) => write!(f, "{n}"),
            UserId::Key(key) => f.write_str(key),
        }
    }
}

impl FromStr for UserId {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(s.parse::<u64>()
            .map(UserId::Numeric)
            .unwrap_or_else(|_| UserId::Key(s.to_string())))
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        UserId::Numeric(id)
    }
}

impl From<&str> for UserId {
    fn from(key: &str) -> Self {
        UserId::Key(key.to_string())
    }
}

impl From<String> for UserId {
    fn from(key: String) -> Self {
        UserId::Key(key)
    }
}

/// A user record as returned by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    /// Server timestamp, kept as sent
    #[serde(default)]
    pub date_joined: Option<String>,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub userprofile: Option<UserProfile>,
}

/// The profile sub-resource of a user
///
/// `GET /users/{id}/profile/` also echoes `username` next to the profile fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// `YYYY-MM-DD` or an ISO timestamp, depending on the endpoint
    #[serde(default)]
    pub birth_date: Option<String>,
    /// URL of the stored avatar
    #[serde(default)]
    pub avatar: Option<String>,
    /// URL of the generated thumbnail
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Body for creating a user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub password: String,
}

/// Partial update of a user; absent fields are left alone by the server
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Editable profile fields
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_id_from_str() {
        assert_eq!("42".parse::<UserId>().unwrap(), UserId::Numeric(42));
        assert_eq!(
            "alice".parse::<UserId>().unwrap(),
            UserId::Key("alice".to_string())
        );
        assert_eq!("-1".parse::<UserId>().unwrap(), UserId::Key("-1".to_string()));
    }

    #[test]
    fn test_user_id_path_segment_is_encoded() {
        assert_eq!(UserId::Numeric(7).path_segment(), "7");
        assert_eq!(UserId::from("a b/c").path_segment(), "a%20b%2Fc");
        assert_eq!(UserId::from("a b/c").to_string(), "a b/c");
    }

    #[test]
    fn test_to_payload_requires_object() {
        let payload = to_payload(&json!({"name": "Alice"})).unwrap();
        assert_eq!(payload["name"], "Alice");

        let err = to_payload(&json!(["not", "an", "object"])).unwrap_err();
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn test_changes_skip_absent_fields() {
        let changes = UserChanges {
            email: Some("alice@example.com".to_string()),
            ..Default::default()
        };
        let payload = to_payload(&changes).unwrap();
        assert_eq!(payload.len(), 1);
        assert_eq!(payload["email"], "alice@example.com");
    }

    #[test]
    fn test_user_deserialization() {
        let user: User = serde_json::from_value(json!({
            "id": 1,
            "username": "alice",
            "email": "alice@example.com",
            "first_name": "",
            "last_name": "",
            "date_joined": "2026-01-18T10:00:00Z",
            "is_staff": false,
            "userprofile": {
                "id": 3,
                "bio": null,
                "phone_number": null,
                "location": "Berlin",
                "birth_date": "1990-05-01",
                "avatar": null,
                "thumbnail": null,
                "user_id": 1
            }
        }))
        .unwrap();

        assert_eq!(user.id, UserId::Numeric(1));
        let profile = user.userprofile.unwrap();
        assert_eq!(profile.location.as_deref(), Some("Berlin"));
        assert_eq!(profile.user_id, Some(1));
    }
}
