use thiserror::Error;

/// Failure to obtain or decode a response.
///
/// HTTP error statuses are not errors at this layer; callers inspect
/// [`crate::HttpReply::status`] themselves.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The server could not be reached (refused, DNS failure, connect timeout).
    #[error("cannot connect to {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// Connected, but no complete response arrived in time.
    #[error("request to {url} timed out")]
    Timeout {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("response body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    /// The body hit the read cap, so the JSON was cut short.
    #[error("response body exceeded {limit} bytes and was truncated: {source}")]
    Truncated {
        limit: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl RequestError {
    pub(crate) fn from_reqwest(url: &str, source: reqwest::Error) -> Self {
        let url = url.to_string();
        // A connect timeout (client built with `connect_timeout`) reports both
        // flags and counts as unreachable.
        if source.is_connect() {
            RequestError::Connect { url, source }
        } else if source.is_timeout() {
            RequestError::Timeout { url, source }
        } else {
            RequestError::Transport { url, source }
        }
    }

    #[must_use]
    pub fn is_connect(&self) -> bool {
        matches!(self, RequestError::Connect { .. })
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            RequestError::Connect { .. } => "connect",
            RequestError::Timeout { .. } => "timeout",
            RequestError::Transport { .. } => "transport",
            RequestError::Decode(_) => "decode",
            RequestError::Truncated { .. } => "truncated",
        }
    }
}
