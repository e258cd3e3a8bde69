use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// Error for Role validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("Role name is empty")]
    Empty,

    #[error("Role name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("Role name {0:?} contains invalid characters (only alphanumeric, '_', '-', '.' and ':' allowed)")]
    InvalidCharacters(String),
}

/// Error for Principal construction failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PrincipalError {
    #[error("Principal username is empty")]
    EmptyUsername,
}

/// Role name granted to a principal.
///
/// Validated on creation, so a role never contains separators or whitespace.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Role(String);

impl Role {
    const MAX_LENGTH: usize = 64;

    /// Create a new valid role.
    ///
    /// # Errors
    /// * `Empty` - Role name is empty
    /// * `TooLong` - Role name longer than 64 characters
    /// * `InvalidCharacters` - Contains characters outside `[A-Za-z0-9_.:-]`
    pub fn new(name: impl Into<String>) -> Result<Self, RoleError> {
        let name = name.into();
        let length = name.chars().count();

        if length == 0 {
            return Err(RoleError::Empty);
        }
        if length > Self::MAX_LENGTH {
            return Err(RoleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'))
        {
            return Err(RoleError::InvalidCharacters(name));
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Role {
    type Error = RoleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Role::new(value)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.0
    }
}

/// Authenticated identity carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    username: String,
    roles: BTreeSet<Role>,
}

impl Principal {
    /// Create a principal from a username and its roles.
    ///
    /// Duplicate roles collapse; order is irrelevant.
    ///
    /// # Errors
    /// * `EmptyUsername` - Username is empty
    pub fn new(
        username: impl Into<String>,
        roles: impl IntoIterator<Item = Role>,
    ) -> Result<Self, PrincipalError> {
        let username = username.into();
        if username.is_empty() {
            return Err(PrincipalError::EmptyUsername);
        }

        Ok(Self {
            username,
            roles: roles.into_iter().collect(),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn roles(&self) -> &BTreeSet<Role> {
        &self.roles
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r.as_str() == role)
    }
}
