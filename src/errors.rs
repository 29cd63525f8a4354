//! Error types shared by the stores and the containers

use thiserror::Error;

/// Failure reported by a store call.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing service answered with an error status.
    #[error("Erreur {0}")]
    Status(u16),

    #[error("Bill '{0}' not found")]
    NotFound(String),

    #[error("Corrupt value for {field} in bill '{id}': {value}")]
    Corrupt {
        id: String,
        field: &'static str,
        value: String,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A date string that could not be turned into its display form.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid date '{0}'")]
pub struct FormatError(pub String);

/// Problems with the receipt picked in the new-bill form.
#[derive(Error, Debug)]
pub enum AttachmentError {
    #[error("No file selected")]
    NoFile,

    #[error("Unsupported file '{file_name}' ({mime_type}). Accepted extensions: {accepted}")]
    UnsupportedType {
        file_name: String,
        mime_type: String,
        accepted: String,
    },

    #[error("Upload failed: {0}")]
    Upload(#[from] StoreError),
}

/// Form values that cannot form a bill.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FormError {
    #[error("Field '{0}' is required")]
    MissingField(&'static str),

    #[error("Invalid amount: '{0}'")]
    InvalidAmount(String),

    #[error("Invalid date: '{0}'")]
    InvalidDate(String),
}

/// Errors while loading the signed-in user.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("No user stored in session file {0}")]
    MissingUser(String),

    #[error("Session file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid session data: {0}")]
    Json(#[from] serde_json::Error),
}
