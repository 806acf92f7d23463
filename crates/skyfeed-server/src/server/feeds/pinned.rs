//! A feed serving a fixed, ordered list of posts.
//!
//! Pages through the list with a decimal offset cursor. Useful as a smoke test
//! of a deployment and for announcement feeds.

use async_trait::async_trait;
use skyfeed::{BoxError, FeedAlgorithm, FeedInput, FeedSkeleton};
use std::sync::Arc;

/// Page size used when the caller sends no (or a non-positive) `limit`.
pub const DEFAULT_LIMIT: usize = 50;
/// Upper bound on the page size, matching the protocol's maximum.
pub const MAX_LIMIT: usize = 100;

#[derive(Clone, Debug)]
pub struct PinnedFeed {
    name: String,
    posts: Arc<[String]>,
}

impl PinnedFeed {
    pub fn new(name: impl Into<String>, posts: impl Into<Arc<[String]>>) -> Self {
        Self {
            name: name.into(),
            posts: posts.into(),
        }
    }
}

fn page_size(limit: i64) -> usize {
    if limit <= 0 {
        return DEFAULT_LIMIT;
    }
    usize::try_from(limit).map_or(MAX_LIMIT, |limit| limit.min(MAX_LIMIT))
}

#[async_trait]
impl FeedAlgorithm for PinnedFeed {
    fn short_name(&self) -> &str {
        &self.name
    }

    async fn generate_feed(&self, input: FeedInput) -> Result<FeedSkeleton, BoxError> {
        let offset = if input.cursor.is_empty() {
            0
        } else {
            input
                .cursor
                .parse::<usize>()
                .map_err(|_| format!("invalid cursor: {:?}", input.cursor))?
        };

        let page: FeedSkeleton = self
            .posts
            .iter()
            .skip(offset)
            .take(page_size(input.limit))
            .cloned()
            .collect();

        let next = offset.saturating_add(page.feed.len());
        if next < self.posts.len() {
            Ok(page.with_cursor(next.to_string()))
        } else {
            Ok(page)
        }
    }
}
