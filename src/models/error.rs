use thiserror::Error;

/// Everything a view can fail with. All of these surface as an error panel;
/// none are distinguishable as fatal beyond the process exit code.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("API error ({status}) from {url}")]
    Api { status: u16, url: String },

    /// Required data absent after normalization.
    #[error("{0}")]
    Shape(String),
}

impl AppError {
    pub fn shape(message: impl Into<String>) -> Self {
        AppError::Shape(message.into())
    }
}
