//! Login credential, stored apart from the user profile.

use chrono::{DateTime, Utc};

use super::password::Password;

#[derive(Debug, Clone)]
pub struct Credential {
    pub username: String,
    pub password: Password,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
}

impl Credential {
    /// True when the account is enabled and `plain_text` matches.
    pub fn accepts(&self, plain_text: &str) -> bool {
        self.enabled && self.password.verify(plain_text)
    }
}
