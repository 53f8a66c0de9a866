use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("username or email already registered")]
    Conflict,

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("password hashing failed: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    #[error("password hashing task failed: {0}")]
    HashingTask(#[from] tokio::task::JoinError),
}

impl RegistrationError {
    /// Storage errors raised by the unique indexes on `users` mean another
    /// registration won the race for the same username or email.
    pub fn from_storage(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => Self::Conflict,
            _ => Self::Storage(err),
        }
    }
}
