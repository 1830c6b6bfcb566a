use thiserror::Error;

/// Crate wide result alias
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("LASTFM_API_KEY is not set")]
    MissingApiKey,

    #[error("LastFM API timed out: {0}")]
    LastFMTimeout(reqwest::Error),

    #[error("LastFM API is unreachable: {0}")]
    LastFMTransportError(reqwest::Error),

    #[error("LastFM API returned non-success status code {0}")]
    LastFMUnexpectedStatus(u16),

    #[error("LastFM API error {code}: {message}")]
    LastFMApiError { code: u32, message: String },

    #[error("LastFM API unexpected response: {0}")]
    LastFMUnexpectedResponse(String),

    #[error("LastFM Deserialization error: {0}")]
    LastFMDeserializationError(#[from] serde_json::Error),

    #[error("LastFM track has a malformed timestamp: {0:?}")]
    MalformedTimestamp(String),

    #[error("LastFM track is missing field `{0}`")]
    MissingField(&'static str),

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the API key
        let err = err.without_url();
        if err.is_timeout() {
            Error::LastFMTimeout(err)
        } else {
            Error::LastFMTransportError(err)
        }
    }
}
