pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid chord settings: {message}")]
    InvalidSettings { message: String },

    #[error("{style} is not a valid chord diagram style")]
    UnknownStyle { style: String },

    #[error("Chord JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid_settings(message: impl Into<String>) -> Self {
        Self::InvalidSettings {
            message: message.into(),
        }
    }
}
