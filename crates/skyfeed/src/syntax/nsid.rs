use super::SyntaxError;
use core::fmt;
use core::str::FromStr;

const NSID_MAX_LEN: usize = 317;
const DOMAIN_MAX_LEN: usize = 253;
const SEGMENT_MAX_LEN: usize = 63;

/// The NSID of feed generator declaration records.
pub const FEED_GENERATOR_NSID: &str = "app.bsky.feed.generator";

/// A namespaced identifier naming a lexicon schema, e.g.
/// `app.bsky.feed.generator`.
///
/// An NSID is a reversed domain authority followed by a name segment. At least
/// three segments are required.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Nsid(String);

impl Nsid {
    pub fn parse(input: &str) -> Result<Self, SyntaxError> {
        if is_valid_nsid(input) {
            Ok(Self(input.to_owned()))
        } else {
            Err(SyntaxError::InvalidNsid {
                input: input.to_owned(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The final segment, e.g. `generator`.
    pub fn name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or_default()
    }

    /// The reversed domain authority, e.g. `app.bsky.feed`.
    pub fn authority(&self) -> &str {
        self.0
            .rsplit_once('.')
            .map(|(authority, _)| authority)
            .unwrap_or_default()
    }
}

fn is_valid_nsid(input: &str) -> bool {
    if input.len() > NSID_MAX_LEN {
        return false;
    }
    let Some((domain, name)) = input.rsplit_once('.') else {
        return false;
    };
    if domain.len() > DOMAIN_MAX_LEN {
        return false;
    }
    let segments: Vec<&str> = domain.split('.').collect();
    if segments.len() < 2 {
        return false;
    }
    let domain_ok = segments.iter().enumerate().all(|(i, segment)| {
        let bytes = segment.as_bytes();
        let Some(&first) = bytes.first() else {
            return false;
        };
        let first_ok = if i == 0 {
            first.is_ascii_alphabetic()
        } else {
            first.is_ascii_alphanumeric()
        };
        first_ok
            && bytes.len() <= SEGMENT_MAX_LEN
            && bytes.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'-')
    });
    let name_ok = name.len() <= SEGMENT_MAX_LEN
        && name.bytes().next().is_some_and(|b| b.is_ascii_alphabetic())
        && name.bytes().all(|b| b.is_ascii_alphanumeric());
    domain_ok && name_ok
}

impl fmt::Display for Nsid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Nsid {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl PartialEq<str> for Nsid {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Nsid {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_generator_nsid_is_valid() {
        let nsid = Nsid::parse(FEED_GENERATOR_NSID).unwrap();
        assert_eq!(nsid.authority(), "app.bsky.feed");
        assert_eq!(nsid.name(), "generator");
        assert_eq!(nsid, FEED_GENERATOR_NSID);
    }

    #[test]
    fn accepts_valid_nsids() {
        for nsid in [
            "com.example.fooBar",
            "app.sky.invalid.generator",
            "net.users.bob.ping",
            "a-0.b-1.c",
            "cn.8.lex.stuff",
            "com-.example.foo",
            "com.example-.foo",
        ] {
            assert!(Nsid::parse(nsid).is_ok(), "{nsid}");
        }
    }

    #[test]
    fn rejects_invalid_nsids() {
        for nsid in [
            "1234",
            "com.example",
            "com.example.3",
            "com.example.foo-bar",
            "-com.example.foo",
            "com.-example.foo",
            "com..example.foo",
            "1com.example.foo",
            "com.example.",
            "com.ex ample.foo",
            "",
        ] {
            assert!(Nsid::parse(nsid).is_err(), "{nsid}");
        }
    }
}
