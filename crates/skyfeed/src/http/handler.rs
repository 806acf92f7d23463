//! Dispatch of `app.bsky.feed.getFeedSkeleton` requests.
//!
//! [`FeedHandler`] validates the requested feed URI against the server's own
//! identity, resolves the named algorithm and runs it. It does basic
//! validation only:
//!
//! 1. the feed URI authority must match the configured service DID;
//! 2. the feed URI collection must be `app.bsky.feed.generator`.
//!
//! `limit` and `cursor` are NOT validated (beyond reading `limit` as an
//! integer when possible); that is left to the individual algorithm.

use super::describe::{DESCRIBE_FEED_GENERATOR_PATH, describe_feed_generator};
use crate::algos::{FeedAlgorithm, FeedInput, FeedSkeleton, parse_limit};
use crate::config::Context;
use crate::registry::FeedRegistry;
use crate::syntax::{AtUri, FEED_GENERATOR_NSID};
use crate::{Error, Result};
use axum::{
    Json, Router,
    extract::Query,
    extract::rejection::QueryRejection,
    response::{IntoResponse, Response},
    routing::get,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Fixed XRPC path of the feed skeleton endpoint.
pub const FEED_SKELETON_PATH: &str = "/xrpc/app.bsky.feed.getFeedSkeleton";

type RawQuery = core::result::Result<Query<Vec<(String, String)>>, QueryRejection>;

/// Raw query parameters of a feed skeleton request.
///
/// Missing parameters are `None`; the handler treats a missing `feed` the same
/// as an empty one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeedSkeletonParams {
    pub feed: Option<String>,
    pub cursor: Option<String>,
    pub limit: Option<String>,
}

impl FeedSkeletonParams {
    pub fn new(feed: impl Into<String>) -> Self {
        Self {
            feed: Some(feed.into()),
            ..Self::default()
        }
    }

    /// Collects parameters from decoded query pairs. When a key repeats, the
    /// first value wins; unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "feed" => &mut params.feed,
                "cursor" => &mut params.cursor,
                "limit" => &mut params.limit,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        params
    }
}

/// Request handler for the feed skeleton endpoint.
///
/// Cloning is cheap and every clone serves the same feeds, so a single handler
/// can be attached to several routers.
#[derive(Clone, Debug)]
pub struct FeedHandler {
    ctx: Context,
    registry: Arc<FeedRegistry>,
    shutdown: CancellationToken,
}

impl FeedHandler {
    /// Creates a handler serving `registry` under the identity attached to
    /// `ctx`.
    ///
    /// A context without a config is accepted here; every request then fails
    /// with [`Error::ConfigNotSet`].
    pub fn new(ctx: Context, registry: FeedRegistry) -> Self {
        Self {
            ctx,
            registry: Arc::new(registry),
            shutdown: CancellationToken::new(),
        }
    }

    /// Uses `token` as the parent of every per-request cancellation token, so
    /// cancelling it (e.g. on shutdown) signals all in-flight algorithms.
    pub fn with_shutdown(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn registry(&self) -> &FeedRegistry {
        &self.registry
    }

    /// Runs the full validation and dispatch chain for one request.
    ///
    /// Every step either succeeds or ends the request; nothing is retried and
    /// no timeout is applied around the algorithm.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            skip_all,
            fields(feed = params.feed.as_deref().unwrap_or_default())
        )
    )]
    pub async fn get_feed_skeleton(&self, params: FeedSkeletonParams) -> Result<FeedSkeleton> {
        let feed_uri = AtUri::parse(params.feed.as_deref().unwrap_or_default())?;
        let config = self.ctx.config()?;

        // Deliberately indistinguishable to the caller
        let hosted_here = feed_uri.authority() == config.service_authority()
            && feed_uri
                .collection()
                .is_some_and(|collection| collection == FEED_GENERATOR_NSID);
        if !hosted_here {
            return Err(Error::FeedNotFound);
        }

        let cancellation = self.shutdown.child_token();
        let input = FeedInput {
            verified_user: None,
            feed_name: feed_uri
                .record_key()
                .map(|rkey| rkey.as_str().to_owned())
                .unwrap_or_default(),
            limit: parse_limit(params.limit.as_deref()),
            cursor: params.cursor.unwrap_or_default(),
            cancellation: cancellation.clone(),
        };

        let algorithm = self
            .registry
            .lookup(&input.feed_name)
            .ok_or(Error::FeedNotFound)?;

        invoke(&**algorithm, input, cancellation).await
    }

    async fn handle(self, query: RawQuery) -> Response {
        let params = match query {
            Ok(Query(pairs)) => FeedSkeletonParams::from_pairs(pairs),
            Err(_rejection) => {
                #[cfg(feature = "tracing")]
                tracing::debug!("Unreadable query string: {}", _rejection);
                FeedSkeletonParams::default()
            }
        };

        match self.get_feed_skeleton(params).await {
            Ok(skeleton) => Json(skeleton).into_response(),
            Err(err) => {
                #[cfg(feature = "tracing")]
                {
                    match &err {
                        Error::FeedNotFound => tracing::debug!("Feed not found"),
                        _ => tracing::warn!("Feed request failed: {}", err),
                    }
                }
                err.into_response()
            }
        }
    }

    /// Attaches the feed skeleton endpoint to `router`.
    ///
    /// # Panics
    ///
    /// Like [`Router::route`], panics if `router` already serves
    /// [`FEED_SKELETON_PATH`].
    pub fn route<S>(&self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        let handler = self.clone();
        router.route(
            FEED_SKELETON_PATH,
            get(move |query: RawQuery| handler.clone().handle(query)),
        )
    }

    /// Attaches the `describeFeedGenerator` endpoint listing this handler's
    /// feeds. Kept apart from [`route`](Self::route) so routers that describe
    /// their feeds elsewhere can still take the skeleton endpoint.
    pub fn route_describe<S>(&self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        let handler = self.clone();
        router.route(
            DESCRIBE_FEED_GENERATOR_PATH,
            get(move || {
                let handler = handler.clone();
                async move {
                    describe_feed_generator(handler.context(), handler.registry())
                        .map(Json)
                        .into_response()
                }
            }),
        )
    }

    /// A stand-alone router serving both the skeleton and describe endpoints.
    pub fn into_router(self) -> Router {
        self.route_describe(self.route(Router::new()))
    }
}

/// Runs the algorithm. If the surrounding future is dropped before the
/// algorithm finishes (the client went away), `cancellation` fires.
async fn invoke(
    algorithm: &dyn FeedAlgorithm,
    input: FeedInput,
    cancellation: CancellationToken,
) -> Result<FeedSkeleton> {
    let guard = cancellation.drop_guard();
    let output = algorithm.generate_feed(input).await;
    guard.disarm();
    output.map_err(|err| Error::Algorithm(err.to_string()))
}

/// Builds a [`FeedHandler`] for `feeds` and attaches its skeleton endpoint to
/// every router in `routers`. When `routers` is empty, a fresh router is created and
/// returned instead.
pub fn serve_feeds<S, I>(
    ctx: &Context,
    feeds: I,
    routers: Vec<Router<S>>,
) -> Result<Vec<Router<S>>>
where
    S: Clone + Send + Sync + 'static,
    I: IntoIterator<Item = Arc<dyn FeedAlgorithm>>,
{
    let handler = FeedHandler::new(ctx.clone(), FeedRegistry::new(feeds)?);
    let routers = if routers.is_empty() {
        vec![Router::new()]
    } else {
        routers
    };
    Ok(routers
        .into_iter()
        .map(|router| handler.route(router))
        .collect())
}
