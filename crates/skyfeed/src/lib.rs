#![doc = include_str!("../README.md")]

pub mod algos;
pub mod config;
mod error;
pub mod http;
pub mod registry;
pub mod syntax;

pub use crate::algos::*;
pub use crate::config::{Context, FeedGeneratorConfig};
pub use crate::error::*;
pub use crate::http::*;
pub use crate::registry::FeedRegistry;
pub use crate::syntax::{AtIdentifier, AtUri, FEED_GENERATOR_NSID, Nsid, RecordKey, SyntaxError};
// Re-exported so algorithm crates don't need a direct `tokio-util` dependency
pub use tokio_util::sync::CancellationToken;
