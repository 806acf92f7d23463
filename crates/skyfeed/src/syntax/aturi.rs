use super::{AtIdentifier, Nsid, RecordKey, SyntaxError};
use core::fmt;
use core::str::FromStr;

const AT_URI_MAX_LEN: usize = 8 * 1024;
const SCHEME: &str = "at://";

/// A parsed `at://` URI.
///
/// ```text
/// at://did:plc:e2fun4xcfwtcrqfdwhfnghxk/app.bsky.feed.generator/testFeed
///      └────────── authority ─────────┘ └────── collection ────┘ └ rkey ┘
/// ```
///
/// Only the authority is mandatory. A record key can only be present when a
/// collection is.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AtUri {
    authority: AtIdentifier,
    collection: Option<Nsid>,
    record_key: Option<RecordKey>,
    fragment: Option<String>,
}

impl AtUri {
    pub fn parse(input: &str) -> Result<Self, SyntaxError> {
        if input.len() > AT_URI_MAX_LEN {
            return Err(SyntaxError::TooLong {
                len: input.len(),
                max: AT_URI_MAX_LEN,
            });
        }
        let Some(rest) = input.strip_prefix(SCHEME) else {
            return Err(SyntaxError::InvalidScheme {
                input: input.to_owned(),
            });
        };
        if rest.contains('?') {
            return Err(SyntaxError::QueryNotAllowed {
                input: input.to_owned(),
            });
        }

        let (path, fragment) = match rest.split_once('#') {
            Some((path, fragment)) => {
                if !fragment.starts_with('/') {
                    return Err(SyntaxError::InvalidFragment {
                        input: input.to_owned(),
                    });
                }
                (path, Some(fragment.to_owned()))
            }
            None => (rest, None),
        };

        let mut segments = path.split('/');
        let authority = AtIdentifier::parse(segments.next().unwrap_or_default())?;
        let collection = segments.next().map(Nsid::parse).transpose()?;
        let record_key = segments.next().map(RecordKey::parse).transpose()?;
        if segments.next().is_some() {
            return Err(SyntaxError::TooManySegments {
                input: input.to_owned(),
            });
        }

        Ok(Self {
            authority,
            collection,
            record_key,
            fragment,
        })
    }

    /// Builds the URI of a record from its parts.
    pub fn from_parts(authority: AtIdentifier, collection: Nsid, record_key: RecordKey) -> Self {
        Self {
            authority,
            collection: Some(collection),
            record_key: Some(record_key),
            fragment: None,
        }
    }

    /// Builds a URI naming only an authority, e.g. `at://did:plc:abc`.
    pub fn from_authority(authority: AtIdentifier) -> Self {
        Self {
            authority,
            collection: None,
            record_key: None,
            fragment: None,
        }
    }

    pub fn authority(&self) -> &AtIdentifier {
        &self.authority
    }

    pub fn collection(&self) -> Option<&Nsid> {
        self.collection.as_ref()
    }

    pub fn record_key(&self) -> Option<&RecordKey> {
        self.record_key.as_ref()
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }
}

impl fmt::Display for AtUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{SCHEME}{}", self.authority)?;
        if let Some(collection) = &self.collection {
            write!(f, "/{collection}")?;
        }
        if let Some(record_key) = &self.record_key {
            write!(f, "/{record_key}")?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}

impl FromStr for AtUri {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
