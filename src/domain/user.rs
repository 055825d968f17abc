use crate::domain::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Candidate,
    Recruiter,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Candidate => "candidate",
            Role::Recruiter => "recruiter",
        }
    }

    /// Fails with `Forbidden` unless the caller holds `wanted`.
    pub fn require(self, wanted: Role) -> Result<(), DomainError> {
        if self == wanted {
            Ok(())
        } else {
            Err(DomainError::Forbidden(format!(
                "{} role required",
                wanted.as_str()
            )))
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    #[serde(default)]
    pub applied_jobs: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// The public view of a user, safe to return to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub role: Role,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub full_name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Loose `local@domain.tld` check: something, an `@`, something, a dot, something.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

impl CreateUser {
    /// Trims and lowercases fields in place, then checks them.
    pub fn normalize(mut self) -> Result<Self, DomainError> {
        self.full_name = self.full_name.trim().to_string();
        self.email = normalize_email(&self.email);

        let name_len = self.full_name.chars().count();
        if !(2..=100).contains(&name_len) {
            return Err(DomainError::Validation(
                "Full name must be between 2 and 100 characters".to_string(),
            ));
        }
        if !is_valid_email(&self.email) {
            return Err(DomainError::Validation(
                "Please fill a valid email address".to_string(),
            ));
        }
        if self.password.is_empty() {
            return Err(DomainError::Validation("Password is required".to_string()));
        }
        Ok(self)
    }
}
