use pollcenta_db::DbError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// The clicked action id does not match any rendered choice button.
    /// Raised before any store access; the caller leaves the message as-is.
    #[error("action_id {0} is not a rendered choice of this poll")]
    UnknownChoice(i64),
    /// The poll already carries the maximum number of choices (or voter
    /// additions were never enabled), so nothing may be appended.
    #[error("poll cannot take further choices")]
    PollFull,
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Store unavailable or the transaction failed; nothing was applied and
    /// the caller must not re-render the message.
    #[error("database error: {0}")]
    Database(#[from] DbError),
}
