use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{MentorError, MentorResult};

/// A mentor profile. `id` is the mentor's user id, so it compares directly
/// against the authenticated actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mentor {
    pub id: Uuid,
    pub display_name: String,
    pub specialties: Vec<String>,
    pub bio: Option<String>,
    pub total_sessions: i32,
    pub created_at: DateTime<Utc>,
}

/// Longest accepted display name, matching the `display_name` column.
pub const MAX_DISPLAY_NAME_CHARS: usize = 255;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterMentorRequest {
    pub display_name: String,
    #[serde(default)]
    pub specialties: Vec<String>,
    pub bio: Option<String>,
}

impl RegisterMentorRequest {
    pub fn validate(&self) -> MentorResult<()> {
        let name = self.display_name.trim();
        if name.is_empty() {
            return Err(MentorError::Validation(
                "display_name must not be empty".to_string(),
            ));
        }
        if name.chars().count() > MAX_DISPLAY_NAME_CHARS {
            return Err(MentorError::Validation(format!(
                "display_name must be at most {MAX_DISPLAY_NAME_CHARS} characters"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentorResponse {
    pub mentor: Mentor,
}
