//! Credential verification against a user-record provider.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;

use crate::error::{AppError, Result};
use crate::security::identity::Identity;
use crate::security::password;

/// A user record as held by the user-record provider.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub username: String,
    pub password_hash: String,
    pub roles: Vec<String>,
}

/// Capability for looking up user records. The service consumes this; it does
/// not own user storage.
pub trait UserStore: Send + Sync {
    fn find_by_username(&self, username: &str) -> Option<UserRecord>;
}

/// User store seeded at startup and held in memory.
pub struct InMemoryUserStore {
    users: HashMap<String, UserRecord>,
}

impl InMemoryUserStore {
    pub fn new(records: Vec<UserRecord>) -> Self {
        let users = records
            .into_iter()
            .map(|record| (record.username.clone(), record))
            .collect();
        Self { users }
    }

    /// Development users: `user`/`password` (USER) and `admin`/`admin` (ADMIN).
    pub fn seeded() -> Result<Self> {
        Ok(Self::new(vec![
            UserRecord {
                username: "user".to_string(),
                password_hash: password::hash_password("password")?,
                roles: vec!["USER".to_string()],
            },
            UserRecord {
                username: "admin".to_string(),
                password_hash: password::hash_password("admin")?,
                roles: vec!["ADMIN".to_string()],
            },
        ]))
    }
}

impl UserStore for InMemoryUserStore {
    fn find_by_username(&self, username: &str) -> Option<UserRecord> {
        self.users.get(username).cloned()
    }
}

/// Verifies submitted credentials and produces the authenticated identity.
pub struct Authenticator {
    users: Arc<dyn UserStore>,
}

impl Authenticator {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Authenticate a username/password pair.
    ///
    /// Unknown usernames and wrong passwords both map to the same
    /// `InvalidCredentials` value; the caller never learns which it was.
    pub fn authenticate(&self, username: &str, raw_password: &str) -> Result<Identity> {
        let record = match self.users.find_by_username(username) {
            Some(record) => record,
            None => {
                warn!(username, "login attempt for unknown user");
                return Err(AppError::InvalidCredentials);
            }
        };

        password::verify_password(raw_password, &record.password_hash)?;

        Ok(Identity::new(record.username, record.roles))
    }
}
