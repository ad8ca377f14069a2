use thiserror::Error;

/// Errors returned by feed clients.
///
/// Callers degrade to an empty contribution on any of these; none of them is
/// fatal to a refresh cycle.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("{feed} request failed: {source}")]
    Unavailable {
        feed: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{feed} API error {status}: {body}")]
    Status {
        feed: &'static str,
        status: u16,
        body: String,
    },

    #[error("{feed} returned a malformed payload: {source}")]
    MalformedPayload {
        feed: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Coarse classification used in logs and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedErrorKind {
    /// Network failure, timeout or non-2xx status
    FeedUnavailable,
    /// Body did not have the expected JSON shape
    MalformedPayload,
}

impl FeedError {
    #[must_use]
    pub const fn kind(&self) -> FeedErrorKind {
        match self {
            Self::Client(_) | Self::Unavailable { .. } | Self::Status { .. } => {
                FeedErrorKind::FeedUnavailable
            }
            Self::MalformedPayload { .. } => FeedErrorKind::MalformedPayload,
        }
    }

    /// Returns true if the request timed out.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Unavailable { source, .. } if source.is_timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_is_unavailable() {
        let err = FeedError::Status {
            feed: "defillama",
            status: 503,
            body: "Service Unavailable".to_string(),
        };
        assert_eq!(err.kind(), FeedErrorKind::FeedUnavailable);
        assert!(!err.is_timeout());
        assert_eq!(err.to_string(), "defillama API error 503: Service Unavailable");
    }

    #[test]
    fn test_malformed_payload_kind() {
        let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = FeedError::MalformedPayload {
            feed: "dexscreener",
            source,
        };
        assert_eq!(err.kind(), FeedErrorKind::MalformedPayload);
        assert!(err.to_string().starts_with("dexscreener returned a malformed payload"));
    }
}
