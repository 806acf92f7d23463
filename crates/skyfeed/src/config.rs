//! Identity of the feed generator server and the request context carrying it.
//!
//! A [`Context`] is an immutable handle passed to the dispatch handler when it
//! is built. Deriving a context with [`attach`] (or [`Context::with_config`])
//! never touches the base, so independent configurations can coexist in one
//! process.

use crate::syntax::{AtIdentifier, AtUri, SyntaxError};
use crate::{Error, Result};
use std::sync::Arc;

/// Configurable information about a feed generator server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedGeneratorConfig {
    /// The server's own identity. Only feeds whose AT-URI authority matches
    /// this authority are served.
    pub service_did: AtUri,
    /// The account publishing the feed generator records.
    pub publisher_did: AtUri,
}

impl FeedGeneratorConfig {
    /// Creates a config whose publisher is the service itself. Use
    /// [`Self::with_publisher`] when the feeds are published by another
    /// account.
    pub fn new(service_did: AtUri) -> Self {
        Self {
            publisher_did: service_did.clone(),
            service_did,
        }
    }

    pub fn with_publisher(mut self, publisher_did: AtUri) -> Self {
        self.publisher_did = publisher_did;
        self
    }

    /// Parses both identities. Each may be an AT-URI (`at://did:plc:...`) or a
    /// bare DID or handle.
    pub fn from_identifiers(
        service: &str,
        publisher: &str,
    ) -> core::result::Result<Self, SyntaxError> {
        Ok(Self {
            service_did: parse_identity(service)?,
            publisher_did: parse_identity(publisher)?,
        })
    }

    pub fn service_authority(&self) -> &AtIdentifier {
        self.service_did.authority()
    }

    pub fn publisher_authority(&self) -> &AtIdentifier {
        self.publisher_did.authority()
    }
}

/// Accepts `at://<authority>[...]` or a bare `<authority>`.
pub fn parse_identity(input: &str) -> core::result::Result<AtUri, SyntaxError> {
    if input.starts_with("at://") {
        AtUri::parse(input)
    } else {
        AtIdentifier::parse(input).map(AtUri::from_authority)
    }
}

/// Request-processing context handed to the dispatch handler.
#[derive(Clone, Debug, Default)]
pub struct Context {
    config: Option<Arc<FeedGeneratorConfig>>,
}

impl Context {
    /// The root context. Nothing is attached to it.
    pub fn background() -> Self {
        Self::default()
    }

    /// Derives a context carrying `config`. `self` is left untouched.
    pub fn with_config(&self, config: FeedGeneratorConfig) -> Self {
        Self {
            config: Some(Arc::new(config)),
        }
    }

    /// Returns the attached config, or [`Error::ConfigNotSet`] if this context
    /// was never derived through [`Self::with_config`].
    pub fn config(&self) -> Result<&FeedGeneratorConfig> {
        self.config.as_deref().ok_or(Error::ConfigNotSet)
    }
}

/// Free-function form of [`Context::with_config`].
pub fn attach(base: &Context, config: FeedGeneratorConfig) -> Context {
    base.with_config(config)
}

/// Free-function form of [`Context::config`].
pub fn retrieve(ctx: &Context) -> Result<&FeedGeneratorConfig> {
    ctx.config()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> FeedGeneratorConfig {
        FeedGeneratorConfig::new(AtUri::parse("at://jaygles.bsky.social").unwrap())
    }

    #[test]
    fn persists_the_config_in_the_context() {
        let base = Context::background();
        let ctx = attach(&base, config());

        assert_eq!(retrieve(&ctx).unwrap(), &config());
        // the base is not modified
        assert_eq!(retrieve(&base), Err(Error::ConfigNotSet));
    }

    #[test]
    fn missing_config_is_an_error() {
        let err = Context::background().config().unwrap_err();
        assert_eq!(err, Error::ConfigNotSet);
        assert_eq!(err.to_string(), "config not set");
    }

    #[test]
    fn independent_contexts_coexist() {
        let a = Context::background().with_config(config());
        let b = Context::background().with_config(
            FeedGeneratorConfig::from_identifiers("did:plc:abc", "did:plc:def").unwrap(),
        );
        assert_eq!(a.config().unwrap().service_authority().as_str(), "jaygles.bsky.social");
        assert_eq!(b.config().unwrap().service_authority().as_str(), "did:plc:abc");
        assert_eq!(b.config().unwrap().publisher_authority().as_str(), "did:plc:def");
    }

    #[test]
    fn publisher_defaults_to_service() {
        let cfg = config();
        assert_eq!(cfg.publisher_did, cfg.service_did);
    }

    #[test]
    fn parse_identity_accepts_bare_and_uri_forms() {
        let bare = parse_identity("did:plc:e2fun4xcfwtcrqfdwhfnghxk").unwrap();
        let uri = parse_identity("at://did:plc:e2fun4xcfwtcrqfdwhfnghxk").unwrap();
        assert_eq!(bare, uri);
        assert!(parse_identity("not an identity").is_err());
    }
}
