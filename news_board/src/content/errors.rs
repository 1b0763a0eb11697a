use thiserror::Error;

#[derive(Clone, Error, Debug)]
pub enum ContentError {
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<sqlx::Error> for ContentError {
    fn from(err: sqlx::Error) -> Self {
        ContentError::Storage(err.to_string())
    }
}
