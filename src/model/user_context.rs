use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The signed-in dashboard user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserContext {
    pub session_id: Uuid,
    pub email: String,
    pub name: String,
    pub signed_in_at: DateTime<Utc>,
}

impl UserContext {
    /// Start a fresh session for a user that just passed the credential check
    pub fn signed_in(email: String, name: String) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            email,
            name,
            signed_in_at: Utc::now(),
        }
    }
}
