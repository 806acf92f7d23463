use super::{FeedInput, FeedSkeleton};
use async_trait::async_trait;

pub use axum::BoxError;

/// Protocol limit on the length of a feed's short name (its record key).
pub const MAX_SHORT_NAME_LEN: usize = 16;

/// A feed algorithm.
///
/// Implementations are shared across concurrent requests without any
/// serialization, so they must handle their own synchronization.
#[async_trait]
pub trait FeedAlgorithm: Send + Sync {
    /// The record key this feed is published under. Must be at most
    /// [`MAX_SHORT_NAME_LEN`] characters.
    fn short_name(&self) -> &str;

    /// Produces a page of the feed. An error is reported to the caller as an
    /// internal error with its message verbatim.
    async fn generate_feed(&self, input: FeedInput) -> Result<FeedSkeleton, BoxError>;
}
