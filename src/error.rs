//! The single failure kind of a trip request.

use std::error::Error as StdError;

/// Anything that went wrong while sending a request or decoding its reply.
///
/// Network errors, unreadable bodies and bodies that are not JSON all land
/// here. The message is what the user gets to see, so it carries the full
/// source chain (e.g. `error sending request: connection refused`).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RequestFailure {
    message: String,
}

impl RequestFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    fn from_chain(err: &(dyn StdError + 'static)) -> Self {
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            let text = cause.to_string();
            if !message.contains(&text) {
                message.push_str(": ");
                message.push_str(&text);
            }
            source = cause.source();
        }
        Self { message }
    }
}

impl From<reqwest::Error> for RequestFailure {
    fn from(err: reqwest::Error) -> Self {
        Self::from_chain(&err)
    }
}

impl From<serde_json::Error> for RequestFailure {
    fn from(err: serde_json::Error) -> Self {
        Self::from_chain(&err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("outer")]
    struct Outer(#[source] Inner);

    #[derive(Debug, thiserror::Error)]
    #[error("inner")]
    struct Inner;

    #[test]
    fn display_is_the_message() {
        let failure = RequestFailure::new("Network Error");
        assert_eq!(failure.to_string(), "Network Error");
        assert_eq!(failure.message(), "Network Error");
    }

    #[test]
    fn chain_is_flattened() {
        let failure = RequestFailure::from_chain(&Outer(Inner));
        assert_eq!(failure.message(), "outer: inner");
    }

    #[test]
    fn from_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let failure = RequestFailure::from(err);
        assert!(failure.message().contains("expected value"));
    }
}
