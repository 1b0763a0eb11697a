//! Error types for the coordination layer

use thiserror::Error;

use crate::content::ContentError;
use crate::coordination::types::FormErrors;
use crate::session::SessionError;
use crate::userdb::UserError;
use crate::utils::UtilError;

/// Errors returned by the high-level operations the HTTP layer calls
#[derive(Error, Debug)]
pub enum CoordinationError {
    /// Conflict error
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Resource not found with context
    ///
    /// Also returned when the requester does not own the resource.
    #[error("Resource not found: {resource_type} {resource_id}")]
    ResourceNotFound {
        resource_type: String,
        resource_id: String,
    },

    /// Submitted form did not validate; the page is usually re-rendered with these errors
    #[error("Invalid form: {0}")]
    InvalidForm(FormErrors),

    /// Error from news and comment storage
    #[error("Content error: {0}")]
    ContentError(ContentError),

    /// Error from the user database operations
    #[error("User error: {0}")]
    UserError(UserError),

    /// Error from Session operations
    #[error("Session error: {0}")]
    SessionError(SessionError),

    /// Error from utils operations
    #[error("Utils error: {0}")]
    UtilsError(UtilError),
}

impl CoordinationError {
    pub(crate) fn not_found(resource_type: &str, resource_id: impl ToString) -> Self {
        Self::ResourceNotFound {
            resource_type: resource_type.to_string(),
            resource_id: resource_id.to_string(),
        }
    }

    /// Log the error and return self
    pub fn log(self) -> Self {
        match &self {
            Self::Conflict(message) => tracing::error!("Conflict: {}", message),
            Self::ResourceNotFound {
                resource_type,
                resource_id,
            } => tracing::error!("Resource not found: {} {}", resource_type, resource_id),
            Self::InvalidForm(errors) => tracing::debug!("Invalid form: {}", errors),
            Self::ContentError(err) => tracing::error!("Content error: {}", err),
            Self::UserError(err) => tracing::error!("User error: {}", err),
            Self::SessionError(err) => tracing::error!("Session error: {}", err),
            Self::UtilsError(err) => tracing::error!("Utils error: {}", err),
        }
        self
    }
}

// Custom From implementations that automatically log errors

impl From<ContentError> for CoordinationError {
    fn from(err: ContentError) -> Self {
        let error = Self::ContentError(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<SessionError> for CoordinationError {
    fn from(err: SessionError) -> Self {
        let error = Self::SessionError(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<UserError> for CoordinationError {
    fn from(err: UserError) -> Self {
        let error = Self::UserError(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<UtilError> for CoordinationError {
    fn from(err: UtilError) -> Self {
        let error = Self::UtilsError(err);
        tracing::error!("{}", error);
        error
    }
}
