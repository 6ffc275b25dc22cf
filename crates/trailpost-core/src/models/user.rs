//! User models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A forum member as returned by the user endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Avatar URL
    #[serde(default)]
    pub img_path: Option<String>,
    #[serde(rename = "Creation_time", default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// Whole days since the account was created, if known.
    pub fn days_since_joined(&self, now: DateTime<Utc>) -> Option<i64> {
        self.created_at
            .map(|created| now.signed_duration_since(created).num_days().max(0))
    }
}

/// Author information embedded in posts and comments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub img_path: Option<String>,
}

/// Post authors arrive either as a bare id or populated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthorRef {
    Id(String),
    Profile(UserSummary),
}

impl AuthorRef {
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::Profile(profile) => &profile.id,
        }
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            Self::Id(_) => None,
            Self::Profile(profile) => Some(&profile.username),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn user_parses_backend_field_names() {
        let user: User = serde_json::from_str(
            r#"{"_id":"u1","name":"Mei","username":"mei","email":"mei@example.com",
                "img_path":"https://cdn.example.com/a.png","Creation_time":"2024-03-01T08:00:00.000Z"}"#,
        )
        .unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(user.username, "mei");
        assert_eq!(
            user.created_at,
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap())
        );
    }

    #[test]
    fn days_since_joined_counts_whole_days() {
        let user = User {
            id: "u1".to_string(),
            name: String::new(),
            username: String::new(),
            email: None,
            img_path: None,
            created_at: Some(Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()),
        };
        let now = Utc.with_ymd_and_hms(2024, 3, 11, 7, 0, 0).unwrap();
        assert_eq!(user.days_since_joined(now), Some(9));
    }

    #[test]
    fn author_ref_accepts_both_shapes() {
        let bare: AuthorRef = serde_json::from_str(r#""u1""#).unwrap();
        assert_eq!(bare.id(), "u1");
        assert_eq!(bare.username(), None);

        let populated: AuthorRef =
            serde_json::from_str(r#"{"_id":"u2","username":"kai","name":"Kai"}"#).unwrap();
        assert_eq!(populated.id(), "u2");
        assert_eq!(populated.username(), Some("kai"));
    }
}
