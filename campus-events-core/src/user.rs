//! Registered users and the session projection of a user.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CampusError;
use crate::utils::new_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Faculty,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Student, Role::Faculty];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Faculty => "faculty",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = CampusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| CampusError::UnknownRole(s.to_string()))
    }
}

/// A registered user as stored in the registry.
///
/// The password is kept in plain text; there is no hashing layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl User {
    pub fn new(name: &str, email: &str, password: &str, role: Role) -> Self {
        User {
            id: new_id(),
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role,
        }
    }

    /// The user as seen by the rest of the application (password stripped).
    pub fn to_session_user(&self) -> SessionUser {
        SessionUser {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

/// The authenticated identity: a [`User`] minus its password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl fmt::Display for SessionUser {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_and_display() {
        assert_eq!("student".parse::<Role>().unwrap(), Role::Student);
        assert_eq!("faculty".parse::<Role>().unwrap(), Role::Faculty);
        assert!("Student".parse::<Role>().is_err());
        assert_eq!(Role::Faculty.to_string(), "faculty");
    }

    #[test]
    fn test_session_user_has_no_password() {
        let user = User::new("Ana", "a@x.edu", "pw", Role::Student);
        let session = user.to_session_user();

        let json = serde_json::to_value(&session).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["role"], "student");
        assert_eq!(session.id, user.id);
    }

    #[test]
    fn test_stored_user_shape() {
        let json = r#"{"id":"1","name":"Ana","email":"a@x.edu","password":"pw","role":"faculty"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.role, Role::Faculty);
        assert_eq!(user.password, "pw");
    }
}
