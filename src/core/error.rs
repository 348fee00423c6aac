use std::io;

#[derive(thiserror::Error, Debug)]
pub enum SentryError {
    #[error("network error: {0}")]
    Network(String),
    #[error("timeout")]
    Timeout,
    #[error("http error: {0}")]
    Http(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("unknown error")]
    Unknown,
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<reqwest::Error> for SentryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SentryError::Timeout
        } else if err.is_connect() || err.is_request() || err.is_redirect() {
            SentryError::Network(err.to_string())
        } else if err.is_status() || err.is_body() || err.is_decode() {
            SentryError::Http(err.to_string())
        } else {
            SentryError::Unknown
        }
    }
}

impl From<toml::de::Error> for SentryError {
    fn from(err: toml::de::Error) -> Self {
        SentryError::Config(err.to_string())
    }
}
