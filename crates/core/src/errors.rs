use thiserror::Error;

#[derive(Error, Debug)]
pub enum MentorError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("A mentor cannot book a session with themselves")]
    SelfBookingNotAllowed,

    #[error("Session start must be in the future")]
    PastDateNotAllowed,

    #[error("Session duration must be a positive number of minutes")]
    InvalidDuration,

    #[error("This slot is already booked or overlaps another session")]
    SlotConflict,

    #[error("Not authorized: {0}")]
    Unauthorized(String),

    #[error("Session is already {0} and can no longer change")]
    AlreadyFinalized(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl MentorError {
    /// Stable machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            MentorError::NotFound(_) => "not_found",
            MentorError::Validation(_) => "validation",
            MentorError::SelfBookingNotAllowed => "self_booking_not_allowed",
            MentorError::PastDateNotAllowed => "past_date_not_allowed",
            MentorError::InvalidDuration => "invalid_duration",
            MentorError::SlotConflict => "slot_conflict",
            MentorError::Unauthorized(_) => "unauthorized",
            MentorError::AlreadyFinalized(_) => "already_finalized",
            MentorError::Database(_) => "database",
            MentorError::Internal(_) => "internal",
        }
    }

    /// Expected, user-facing conditions as opposed to infrastructure failures.
    pub fn is_expected(&self) -> bool {
        !matches!(self, MentorError::Database(_) | MentorError::Internal(_))
    }
}

pub type MentorResult<T> = Result<T, MentorError>;
