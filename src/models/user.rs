//! User identity types.

use serde::{Deserialize, Serialize};

/// A user as returned by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub created_at: String,
}

/// The authenticated identity of the current user for this process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub username: String,
    pub authenticated: bool,
}

impl Session {
    /// Create a session for a user. Not yet marked authenticated; the
    /// shared state does that when the session is installed.
    pub fn new(user_id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
            authenticated: false,
        }
    }
}

impl From<&UserRecord> for Session {
    fn from(user: &UserRecord) -> Self {
        Session::new(user.id.clone(), user.username.clone())
    }
}
