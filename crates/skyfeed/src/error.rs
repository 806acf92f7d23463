//! Error types for the feed skeleton service.
//!
//! [`Error`] captures every way a feed request can terminate early, plus the
//! startup-time registration failures. It implements [`IntoResponse`] so the
//! dispatch handler can return it directly; the status mapping is:
//!
//! - `MalformedFeedUri`, `ConfigNotSet`, `Algorithm`: `500`, plain text body
//!   carrying the error message.
//! - `FeedNotFound`: `404`, empty body. Wrong authority, wrong collection and
//!   unknown record key all collapse into this variant.
//! - `InvalidShortName`: only produced while building a registry; `500` if it
//!   ever reaches a response.

use crate::syntax::SyntaxError;
use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for feed dispatch.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The `feed` parameter is not a valid AT-URI.
    #[error(transparent)]
    MalformedFeedUri(#[from] SyntaxError),

    /// No [`FeedGeneratorConfig`](crate::FeedGeneratorConfig) was attached to
    /// the handler's context.
    #[error("config not set")]
    ConfigNotSet,

    /// The feed is not hosted here, or no algorithm has that name.
    #[error("feed not found")]
    FeedNotFound,

    /// The feed algorithm failed. The message is the algorithm's own.
    #[error("{0}")]
    Algorithm(String),

    /// A feed algorithm was registered with an unusable short name.
    #[error("invalid feed short name {name:?}: {reason}")]
    InvalidShortName { name: String, reason: String },
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::FeedNotFound => StatusCode::NOT_FOUND,
            Self::MalformedFeedUri(_)
            | Self::ConfigNotSet
            | Self::Algorithm(_)
            | Self::InvalidShortName { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            Self::FeedNotFound => status.into_response(),
            err => (
                status,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                format!("{err}\n"),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(Error::FeedNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            Error::ConfigNotSet.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            Error::Algorithm("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        let malformed = Error::from(SyntaxError::InvalidScheme {
            input: "a2://foo.bar".into(),
        });
        assert_eq!(malformed.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn algorithm_message_is_verbatim() {
        assert_eq!(
            Error::Algorithm("db unavailable".into()).to_string(),
            "db unavailable"
        );
    }
}
