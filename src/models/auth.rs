//! Login state shown in the header.

use serde::{Deserialize, Serialize};

/// User blob persisted alongside the login flag.
///
/// Only `name` and `email` are interpreted; anything else the login page
/// stores is kept in `extra` and written back untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl UserData {
    /// Label for the profile control: name, then email, then "Profile".
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("Profile")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_fallbacks() {
        let mut user = UserData::default();
        assert_eq!(user.display_name(), "Profile");
        user.email = Some("reader@example.gov".to_string());
        assert_eq!(user.display_name(), "reader@example.gov");
        user.name = Some("Asha".to_string());
        assert_eq!(user.display_name(), "Asha");
    }

    #[test]
    fn test_unknown_fields_preserved() {
        let json = r#"{"name":"Asha","phone":"123"}"#;
        let user: UserData = serde_json::from_str(json).unwrap();
        assert_eq!(user.extra["phone"], "123");
        let back = serde_json::to_value(&user).unwrap();
        assert_eq!(back["phone"], "123");
        assert_eq!(back["name"], "Asha");
    }
}
