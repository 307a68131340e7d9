use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

impl LoginCredentials {
    /// Presence check only; real credential validation happens server-side.
    pub fn has_email(&self) -> bool {
        !self.email.is_empty()
    }
}
