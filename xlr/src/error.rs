use thiserror::Error;

/// Result type for the `player_xlr` library
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading XLR documents
#[derive(Error, Debug)]
pub enum Error {
    /// The document is valid JSON but does not describe an XLR node
    #[error("Failed to deserialize XLR node at '{path}': {message}")]
    Deserialize {
        /// JSON path of the offending field, `.` for the document root
        path:    String,
        /// Message from the underlying deserializer
        message: String,
    },
}

impl Error {
    /// Build a deserialization error from a path-tracking serde failure
    pub(crate) fn from_path_error(error: &serde_path_to_error::Error<serde_json::Error>) -> Self {
        Self::Deserialize {
            path:    error.path().to_string(),
            message: error.inner().to_string(),
        }
    }
}
