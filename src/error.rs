//! Error types for the API client and configuration

/// Failure while talking to the Pokémon API
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("{url} returned {status}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
    #[error("response parse error for {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ApiError::Status { status, .. } if *status == reqwest::StatusCode::NOT_FOUND
        )
    }
}

/// Invalid command-line configuration
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid API base URL '{0}'")]
    InvalidApiBase(String),
    #[error("unsupported API base scheme '{0}' (expected http or https)")]
    UnsupportedScheme(String),
    #[error("invalid Pokémon id '{0}' (expected a number or a name like 'mr-mime')")]
    InvalidStartId(String),
}
