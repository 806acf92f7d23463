//! The set of feed algorithms served by this instance.
//!
//! The set is fixed once the registry is built and is shared read-only by all
//! requests.

use crate::algos::{FeedAlgorithm, MAX_SHORT_NAME_LEN};
use crate::syntax::is_valid_record_key;
use crate::{Error, Result};
use std::sync::Arc;

/// Ordered collection of registered feed algorithms.
#[derive(Clone, Default)]
pub struct FeedRegistry {
    feeds: Vec<Arc<dyn FeedAlgorithm>>,
}

impl FeedRegistry {
    /// Builds a registry, rejecting any algorithm whose short name is empty,
    /// longer than [`MAX_SHORT_NAME_LEN`], or not usable as a record key.
    ///
    /// Duplicate names are accepted; [`Self::lookup`] returns the first one
    /// registered.
    pub fn new<I>(feeds: I) -> Result<Self>
    where
        I: IntoIterator<Item = Arc<dyn FeedAlgorithm>>,
    {
        let feeds: Vec<_> = feeds.into_iter().collect();
        for feed in &feeds {
            validate_short_name(feed.short_name())?;
        }
        Ok(Self { feeds })
    }

    /// Finds the first algorithm registered under `name`.
    pub fn lookup(&self, name: &str) -> Option<&Arc<dyn FeedAlgorithm>> {
        lookup(&self.feeds, name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn FeedAlgorithm>> {
        self.feeds.iter()
    }

    pub fn len(&self) -> usize {
        self.feeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feeds.is_empty()
    }
}

impl core::fmt::Debug for FeedRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list()
            .entries(self.feeds.iter().map(|feed| feed.short_name()))
            .finish()
    }
}

/// Linear scan by exact short name, in slice order.
pub fn lookup<'a>(
    feeds: &'a [Arc<dyn FeedAlgorithm>],
    name: &str,
) -> Option<&'a Arc<dyn FeedAlgorithm>> {
    feeds.iter().find(|feed| feed.short_name() == name)
}

fn validate_short_name(name: &str) -> Result<()> {
    let reason = if name.chars().count() > MAX_SHORT_NAME_LEN {
        format!("longer than {MAX_SHORT_NAME_LEN} characters")
    } else if !is_valid_record_key(name) {
        "not a valid record key".to_string()
    } else {
        return Ok(());
    };
    Err(Error::InvalidShortName {
        name: name.to_owned(),
        reason,
    })
}
