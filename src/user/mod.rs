//! Users, roles and permissions, plus a directory that links them.
//!
//! Each entity kind lives in its own [`KeyedStore`](crate::KeyedStore)
//! inside [`UserDirectory`]; role and permission assignments are kept as id
//! lists so a [`UserDetail`] can be assembled on demand.

mod directory;
mod error;
mod response;

use serde::{Deserialize, Serialize};

use crate::{Id, Identifiable};

pub use directory::UserDirectory;
pub use error::{DirectoryError, DirectoryResult};
pub use response::{ApiResponse, UserDetailResponse, UserListResponse};

/// An account. The id is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Identifiable)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: Id,
    pub username: String,
    pub email: String,
    pub is_active: bool,
}

impl User {
    /// Create an active user.
    pub fn new(id: Id, username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
            is_active: true,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Identifiable)]
pub struct Role {
    pub id: Id,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Role {
    pub fn new(id: Id, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A capability such as `user:read`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Identifiable)]
pub struct Permission {
    pub id: Id,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Permission {
    pub fn new(id: Id, code: impl Into<String>) -> Self {
        Self {
            id,
            code: code.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A user together with their roles and effective permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDetail {
    pub user: User,
    pub roles: Vec<Role>,
    pub permissions: Vec<Permission>,
}

impl UserDetail {
    /// Returns `true` if any effective permission has this code.
    pub fn has_permission(&self, code: &str) -> bool {
        self.permissions.iter().any(|p| p.code == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_serializes_camel_case() {
        let user = User::new(7, "ada", "ada@example.com");
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 7,
                "username": "ada",
                "email": "ada@example.com",
                "isActive": true
            })
        );
    }

    #[test]
    fn derived_identifiable_reads_id() {
        assert_eq!(Identifiable::id(&User::new(3, "u", "e")), 3);
        assert_eq!(Identifiable::id(&Role::new(4, "r")), 4);
        assert_eq!(Identifiable::id(&Permission::new(5, "p")), 5);
    }

    #[test]
    fn optional_description_is_omitted() {
        let json = serde_json::to_string(&Role::new(1, "member")).unwrap();
        assert_eq!(json, r#"{"id":1,"name":"member"}"#);

        let role: Role = serde_json::from_str(r#"{"id":2,"name":"admin"}"#).unwrap();
        assert!(role.description.is_none());
    }
}
