//! `app.bsky.feed.describeFeedGenerator`: lists the feeds this server hosts.
//!
//! Feed URIs are built from the configured publisher identity, since feed
//! generator records live in the publisher's repository.

use crate::config::Context;
use crate::registry::FeedRegistry;
use crate::syntax::{AtUri, FEED_GENERATOR_NSID, Nsid, RecordKey};
use crate::Result;
use serde::{Deserialize, Serialize};

/// Fixed XRPC path of the describe endpoint.
pub const DESCRIBE_FEED_GENERATOR_PATH: &str = "/xrpc/app.bsky.feed.describeFeedGenerator";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescribedFeed {
    pub uri: String,
}

/// Output of `app.bsky.feed.describeFeedGenerator`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedGeneratorDescription {
    /// The service DID (or handle) of this server.
    pub did: String,
    pub feeds: Vec<DescribedFeed>,
}

/// Describes every registered feed, in registration order.
pub fn describe_feed_generator(
    ctx: &Context,
    registry: &FeedRegistry,
) -> Result<FeedGeneratorDescription> {
    let config = ctx.config()?;
    let collection = Nsid::parse(FEED_GENERATOR_NSID)?;

    let feeds = registry
        .iter()
        .map(|feed| -> Result<DescribedFeed> {
            let uri = AtUri::from_parts(
                config.publisher_authority().clone(),
                collection.clone(),
                RecordKey::parse(feed.short_name())?,
            );
            Ok(DescribedFeed {
                uri: uri.to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(FeedGeneratorDescription {
        did: config.service_authority().to_string(),
        feeds,
    })
}
