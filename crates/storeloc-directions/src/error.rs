use thiserror::Error;

/// Errors returned by the directions client.
#[derive(Debug, Error)]
pub enum DirectionsError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The request did not complete within the configured deadline.
    #[error("directions request timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    /// Non-2xx HTTP status. `message` carries the service's explanation when
    /// the body had one.
    #[error("unexpected HTTP status {status} from directions API: {message}")]
    UnexpectedStatus { status: u16, message: String },

    /// The service answered 2xx but reported a non-`Ok` response code.
    #[error("directions API error {code}: {message}")]
    Api { code: String, message: String },

    /// The response body could not be deserialized into the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The service answered successfully with zero candidate routes.
    #[error("no route found between origin and destination")]
    NoRoutes,

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Coarse classification of a [`DirectionsError`], cheap to copy into
/// notifications and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    Timeout,
    Status,
    Api,
    Malformed,
    NoRoutes,
    Config,
}

impl DirectionsError {
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            DirectionsError::Http(e) if e.is_timeout() => FailureKind::Timeout,
            DirectionsError::Http(e) if e.is_decode() => FailureKind::Malformed,
            DirectionsError::Http(_) => FailureKind::Network,
            DirectionsError::Timeout { .. } => FailureKind::Timeout,
            DirectionsError::UnexpectedStatus { .. } => FailureKind::Status,
            DirectionsError::Api { .. } => FailureKind::Api,
            DirectionsError::Deserialize { .. } => FailureKind::Malformed,
            DirectionsError::NoRoutes => FailureKind::NoRoutes,
            DirectionsError::InvalidBaseUrl { .. } => FailureKind::Config,
        }
    }
}
