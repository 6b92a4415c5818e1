/// All errors that can be returned by a QuestionStore implementation.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A record could not be converted to or from the backend's document format.
    #[error("question serialization failed: {0}")]
    Serialization(String),

    /// A backend-specific storage error (connection, query, write, etc.).
    #[error("storage backend error: {0}")]
    Backend(String),
}
