use serde::{Deserialize, Serialize};

/// A registered user as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub user_name: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// Payload for registering a new user. The password only travels on creation.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreate {
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

impl User {
    pub fn new(
        id: impl Into<String>,
        user_name: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            user_name: user_name.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Copy of this user with new first and last names. The username is never edited.
    pub fn renamed(&self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..self.clone()
        }
    }
}

// Password stays out of `#[instrument]` output.
impl std::fmt::Debug for UserCreate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserCreate")
            .field("user_name", &self.user_name)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_uses_api_field_names() {
        let user: User = serde_json::from_str(
            r#"{"id":"u1","userName":"alice","firstName":"Alice","lastName":"Liddell"}"#,
        )
        .unwrap();
        assert_eq!(user, User::new("u1", "alice", "Alice", "Liddell"));
    }

    #[test]
    fn renamed_keeps_identity() {
        let user = User::new("u1", "alice", "Alice", "Liddell");
        let edited = user.renamed("Alicia", "L.");
        assert_eq!(edited.id, "u1");
        assert_eq!(edited.user_name, "alice");
        assert_eq!(edited.first_name, "Alicia");
    }

    #[test]
    fn debug_output_hides_password() {
        let payload = UserCreate {
            user_name: "bob".into(),
            first_name: "Bob".into(),
            last_name: "Stone".into(),
            password: "hunter2".into(),
        };
        let rendered = format!("{:?}", payload);
        assert!(rendered.contains("bob"));
        assert!(!rendered.contains("hunter2"));
    }
}
