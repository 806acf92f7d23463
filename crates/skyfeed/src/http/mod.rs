//! XRPC endpoints of a feed generator, served through axum.
//!
//! ## Structure
//!
//! - [`handler`] - `app.bsky.feed.getFeedSkeleton` dispatch (`FeedHandler`).
//! - [`describe`] - `app.bsky.feed.describeFeedGenerator`.

pub mod describe;
pub mod handler;

pub use describe::*;
pub use handler::*;
