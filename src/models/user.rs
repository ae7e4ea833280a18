use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{ERR_INVALID_EMAIL, ERR_INVALID_PHONE, ERR_MISSING_FIELDS};

/// User record stored in the session slot and the known-users table
///
/// Created on first registration and immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    /// Unique key for the user; also keys the per-user meal list
    pub email: String,
    pub phone: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Registration form fields: a User without its creation timestamp
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl UserProfile {
    /// Validate registration fields, returning the first failure message
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.name.trim().is_empty() || self.email.is_empty() || self.phone.is_empty() {
            return Err(ERR_MISSING_FIELDS.to_string());
        }
        if !validate_email(&self.email) {
            return Err(ERR_INVALID_EMAIL.to_string());
        }
        if !validate_phone(&self.phone) {
            return Err(ERR_INVALID_PHONE.to_string());
        }
        Ok(())
    }

    /// Stamp the profile with a creation instant, producing the stored User
    pub fn into_user(self, created_at: DateTime<Utc>) -> User {
        User {
            name: self.name,
            email: self.email,
            phone: self.phone,
            created_at,
        }
    }
}

/// Validate an email address: one `@`, no whitespace, and a dotted domain
pub fn validate_email(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
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

/// Validate a phone number: optional `+`, leading digit 1-9, at most 16 digits
///
/// Spaces are stripped before checking, so "+1 555 123 4567" is accepted.
pub fn validate_phone(phone: &str) -> bool {
    let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    let digits = compact.strip_prefix('+').unwrap_or(&compact);

    !digits.is_empty()
        && digits.len() <= 16
        && !digits.starts_with('0')
        && digits.chars().all(|c| c.is_ascii_digit())
}
