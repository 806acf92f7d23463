use anyhow::{Context as _, bail};
use clap::Parser;
use skyfeed::{AtUri, FeedGeneratorConfig, MAX_SHORT_NAME_LEN, RecordKey};

/// Runtime configuration for the `skyfeed-server` binary.
///
/// All values are parsed from CLI arguments or environment variables (a
/// `.env` file in the working directory is loaded first).
#[derive(Parser, Debug, Clone)]
#[command(
    name = "skyfeed-server",
    version,
    about = "A Bluesky feed generator serving app.bsky.feed.getFeedSkeleton"
)]
pub struct CliArgs {
    /// Identity of this feed generator service.
    ///
    /// Only feed URIs whose authority matches this identity are served.
    /// Accepts a bare DID (`did:web:feeds.example.com`) or an AT-URI
    /// (`at://did:web:feeds.example.com`).
    ///
    /// Environment variable: `SERVICE_DID`
    #[arg(long, env = "SERVICE_DID")]
    pub service_did: String,

    /// Account that publishes the feed generator records. Defaults to the
    /// service DID.
    ///
    /// Environment variable: `PUBLISHER_DID`
    #[arg(long, env = "PUBLISHER_DID")]
    pub publisher_did: Option<String>,

    /// Address to listen on (TCP or Unix socket path; use --uds for Unix socket).
    ///
    /// Example: "0.0.0.0:3000" or "/tmp/skyfeed.sock"
    ///
    /// Environment variable: `SERVER_ADDR`
    #[arg(long, env = "SERVER_ADDR", default_value_t = String::from("0.0.0.0:3000"))]
    pub server_addr: String,

    /// Listen on a Unix socket instead of TCP. If set, `SERVER_ADDR` must be a file path.
    #[arg(short, long, default_value_t = false)]
    pub uds: bool,

    /// Short name of the built-in pinned-posts feed.
    ///
    /// Environment variable: `PINNED_FEED_NAME`
    #[arg(long, env = "PINNED_FEED_NAME", default_value_t = String::from("pinned"))]
    pub pinned_feed_name: String,

    /// Comma separated post AT-URIs served, in order, by the pinned feed.
    ///
    /// Environment variable: `PINNED_POSTS`
    #[arg(long, env = "PINNED_POSTS", value_delimiter = ',')]
    pub pinned_posts: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub feed_generator: FeedGeneratorConfig,
    pub server_addr: String,
    pub uds: bool,
    pub pinned_feed_name: String,
    pub pinned_posts: Vec<String>,
}

impl TryFrom<CliArgs> for ServerConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let publisher = args.publisher_did.as_deref().unwrap_or(&args.service_did);
        let feed_generator = FeedGeneratorConfig::from_identifiers(&args.service_did, publisher)
            .context("invalid SERVICE_DID or PUBLISHER_DID")?;

        if args.server_addr.trim().is_empty() {
            bail!("SERVER_ADDR must not be empty");
        }

        if args.pinned_feed_name.chars().count() > MAX_SHORT_NAME_LEN {
            bail!(
                "PINNED_FEED_NAME ({}) exceeds {} characters",
                args.pinned_feed_name,
                MAX_SHORT_NAME_LEN
            );
        }
        RecordKey::parse(&args.pinned_feed_name).context("invalid PINNED_FEED_NAME")?;

        let pinned_posts = args
            .pinned_posts
            .into_iter()
            .map(|post| post.trim().to_owned())
            .filter(|post| !post.is_empty())
            .map(|post| -> anyhow::Result<String> {
                AtUri::parse(&post)
                    .with_context(|| format!("invalid PINNED_POSTS entry {post:?}"))?;
                Ok(post)
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Self {
            feed_generator,
            server_addr: args.server_addr,
            uds: args.uds,
            pinned_feed_name: args.pinned_feed_name,
            pinned_posts,
        })
    }
}
