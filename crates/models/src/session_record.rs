//! Persisted projection of an `AuthenticatedSession`.
//!
//! The store holds a flat `key -> string` map. A record is either complete
//! (token plus all four user fields) or it does not exist: any missing key,
//! an empty token or an unparsable user id decodes to "no session".

use std::collections::BTreeMap;

use serde::Serialize;

use crate::AuthenticatedSession;

pub const TOKEN_KEY: &str = "jwt_token";
pub const USER_ID_KEY: &str = "user_id";
pub const USER_EMAIL_KEY: &str = "user_email";
pub const USER_NAME_KEY: &str = "user_name";
pub const USER_ROLE_KEY: &str = "user_role";

/// Every key a complete record writes.
pub const KEYS: [&str; 5] = [TOKEN_KEY, USER_ID_KEY, USER_EMAIL_KEY, USER_NAME_KEY, USER_ROLE_KEY];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSessionRecord {
    pub token: String,
    pub user_id: i64,
    pub email: String,
    pub name: String,
    pub role: String,
}

/// The user half of a stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub user_id: i64,
    pub email: String,
    pub name: String,
    pub role: String,
}

impl StoredSessionRecord {
    pub fn to_entries(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (TOKEN_KEY.to_string(), self.token.clone()),
            (USER_ID_KEY.to_string(), self.user_id.to_string()),
            (USER_EMAIL_KEY.to_string(), self.email.clone()),
            (USER_NAME_KEY.to_string(), self.name.clone()),
            (USER_ROLE_KEY.to_string(), self.role.clone()),
        ])
    }

    pub fn from_entries(entries: &BTreeMap<String, String>) -> Option<Self> {
        let token = entries.get(TOKEN_KEY).filter(|t| !t.is_empty())?;
        let user_id = entries.get(USER_ID_KEY)?.trim().parse::<i64>().ok()?;
        Some(Self {
            token: token.clone(),
            user_id,
            email: entries.get(USER_EMAIL_KEY)?.clone(),
            name: entries.get(USER_NAME_KEY)?.clone(),
            role: entries.get(USER_ROLE_KEY)?.clone(),
        })
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            user_id: self.user_id,
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role.clone(),
        }
    }
}

impl From<&AuthenticatedSession> for StoredSessionRecord {
    fn from(session: &AuthenticatedSession) -> Self {
        Self {
            token: session.token().to_string(),
            user_id: session.user_id(),
            email: session.email().to_string(),
            name: session.name().to_string(),
            role: session.role().to_string(),
        }
    }
}
