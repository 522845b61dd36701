//! User domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::credential::StoredSecret;

/// A registered local account as persisted under the `users` key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub email: String,
    pub username: String,
    pub password: StoredSecret,
    /// Absent on records written before it was tracked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Identity {
    /// The part of an identity that is safe to hold in a session
    pub fn public(&self) -> User {
        User::new(self.email.clone(), self.username.clone())
    }
}

/// Public projection of an identity (never carries the password)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub username: String,
}

impl User {
    pub fn new(email: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            username: username.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new("a@x.com", "alice");
        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.username, "alice");
    }

    #[test]
    fn test_public_projection_drops_password() {
        let identity = Identity {
            email: "a@x.com".to_string(),
            username: "alice".to_string(),
            password: StoredSecret::Plain("secret1".to_string()),
            created_at: None,
        };
        let json = serde_json::to_value(identity.public()).unwrap();
        assert_eq!(json, serde_json::json!({"email": "a@x.com", "username": "alice"}));
    }

    #[test]
    fn test_reads_legacy_record() {
        let json = r#"{"email": "a@x.com", "password": "secret1", "username": "alice"}"#;
        let identity: Identity = serde_json::from_str(json).unwrap();
        assert!(identity.password.is_legacy());
        assert!(identity.created_at.is_none());
    }
}
