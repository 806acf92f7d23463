use crate::syntax::AtUri;
use tokio_util::sync::CancellationToken;

/// Data made available to a feed algorithm for a single request.
///
/// `limit` and `cursor` are handed over exactly as the caller sent them (with
/// an unparseable `limit` read as `0`). Bounds checks and cursor semantics are
/// the algorithm's business.
#[derive(Clone, Debug, Default)]
pub struct FeedInput {
    /// The requesting user, if one was verified upstream. Request
    /// authentication is not performed here, so this is currently always
    /// `None` when built by the dispatch handler.
    pub verified_user: Option<AtUri>,
    /// The record key of the requested feed.
    pub feed_name: String,
    pub limit: i64,
    pub cursor: String,
    /// Cancelled when the request is abandoned or the server shuts down.
    /// Long-running algorithms should watch it and bail out early.
    pub cancellation: CancellationToken,
}

impl FeedInput {
    pub fn new(feed_name: impl Into<String>) -> Self {
        Self {
            feed_name: feed_name.into(),
            ..Self::default()
        }
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = cursor.into();
        self
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }
}

/// Best-effort integer parse of the `limit` query parameter. Anything that is
/// not a plain base-10 integer is treated as absent (`0`).
pub fn parse_limit(raw: Option<&str>) -> i64 {
    raw.and_then(|raw| raw.parse().ok()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_parsing_never_fails() {
        assert_eq!(parse_limit(Some("25")), 25);
        assert_eq!(parse_limit(Some("-3")), -3);
        assert_eq!(parse_limit(Some("+7")), 7);
        assert_eq!(parse_limit(Some("ten")), 0);
        assert_eq!(parse_limit(Some("2.5")), 0);
        assert_eq!(parse_limit(Some(" 5")), 0);
        assert_eq!(parse_limit(Some("")), 0);
        assert_eq!(parse_limit(Some("99999999999999999999999")), 0);
        assert_eq!(parse_limit(None), 0);
    }

    #[test]
    fn builder_sets_fields() {
        let input = FeedInput::new("testFeed").with_limit(10).with_cursor("abc");
        assert_eq!(input.feed_name, "testFeed");
        assert_eq!(input.limit, 10);
        assert_eq!(input.cursor, "abc");
        assert!(input.verified_user.is_none());
        assert!(!input.is_cancelled());
    }
}
