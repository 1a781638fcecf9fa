use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Malformed payload: {0}")]
    Payload(String),

    #[error("Replay error: {0}")]
    Replay(String),
}

pub type EventResult<T> = Result<T, EventError>;

/// Implement From for sea_orm::DbErr
impl From<sea_orm::DbErr> for EventError {
    fn from(err: sea_orm::DbErr) -> Self {
        EventError::Database(err.to_string())
    }
}
