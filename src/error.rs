//! FIRESIGHT - Error Types

use thiserror::Error;

/// Result type for analysis operations
pub type FireResult<T> = Result<T, FireError>;

/// Analysis pipeline error types
#[derive(Error, Debug)]
pub enum FireError {
    // ═══════════════════════════════════════════════════════════════
    // INPUT ERRORS
    // ═══════════════════════════════════════════════════════════════

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Image processing error: {0}")]
    Image(String),

    // ═══════════════════════════════════════════════════════════════
    // CRYPTO ERRORS
    // ═══════════════════════════════════════════════════════════════

    #[error("Encryption failed: {0}")]
    Encryption(String),

    #[error("Authentication failed - ciphertext corrupted or wrong key")]
    Authentication,

    // ═══════════════════════════════════════════════════════════════
    // STORAGE ERRORS
    // ═══════════════════════════════════════════════════════════════

    #[error("Audit storage error: {0}")]
    Storage(String),

    #[error("Audit record not found: {0}")]
    RecordNotFound(i64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ═══════════════════════════════════════════════════════════════
    // SERIALIZATION ERRORS
    // ═══════════════════════════════════════════════════════════════

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl FireError {
    /// Check if this is a security-critical error
    pub fn is_security_critical(&self) -> bool {
        matches!(self, FireError::Authentication | FireError::Encryption(_))
    }

    /// Check if this error only affects audit persistence, not the
    /// computed analysis itself
    pub fn is_persistence_only(&self) -> bool {
        matches!(
            self,
            FireError::Storage(_) | FireError::Encryption(_) | FireError::Serialization(_)
        )
    }
}

impl From<rusqlite::Error> for FireError {
    fn from(e: rusqlite::Error) -> Self {
        FireError::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for FireError {
    fn from(e: serde_json::Error) -> Self {
        FireError::Serialization(e.to_string())
    }
}

impl From<image::ImageError> for FireError {
    fn from(e: image::ImageError) -> Self {
        FireError::Image(e.to_string())
    }
}
