use serde::{Deserialize, Serialize};

/// A reference to a single post in a feed skeleton.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkeletonFeedPost {
    /// AT-URI of the post.
    pub post: String,
}

impl SkeletonFeedPost {
    pub fn new(post: impl Into<String>) -> Self {
        Self { post: post.into() }
    }
}

/// Output of `app.bsky.feed.getFeedSkeleton`.
///
/// Served exactly as the algorithm returns it: order is preserved and nothing
/// is deduplicated or truncated.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSkeleton {
    pub feed: Vec<SkeletonFeedPost>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

impl FeedSkeleton {
    pub fn new(feed: Vec<SkeletonFeedPost>) -> Self {
        Self { feed, cursor: None }
    }

    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }
}

impl<S: Into<String>> FromIterator<S> for FeedSkeleton {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(SkeletonFeedPost::new).collect())
    }
}
