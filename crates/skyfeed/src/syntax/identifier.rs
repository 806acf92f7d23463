use super::SyntaxError;
use core::fmt;
use core::str::FromStr;

const DID_MAX_LEN: usize = 2048;
const HANDLE_MAX_LEN: usize = 253;
const LABEL_MAX_LEN: usize = 63;

/// A syntactically valid decentralized identifier, e.g. `did:plc:abc123`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Did(String);

impl Did {
    pub fn parse(input: &str) -> Result<Self, SyntaxError> {
        if is_valid_did(input) {
            Ok(Self(input.to_owned()))
        } else {
            Err(SyntaxError::InvalidDid {
                input: input.to_owned(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The DID method, e.g. `plc` for `did:plc:abc123`.
    pub fn method(&self) -> &str {
        // Validated on construction: `did:<method>:<id>`
        self.0[4..].split(':').next().unwrap_or_default()
    }
}

fn is_valid_did(input: &str) -> bool {
    if input.len() > DID_MAX_LEN {
        return false;
    }
    let Some(rest) = input.strip_prefix("did:") else {
        return false;
    };
    let Some((method, id)) = rest.split_once(':') else {
        return false;
    };
    if method.is_empty() || !method.bytes().all(|b| b.is_ascii_lowercase()) {
        return false;
    }
    if id.is_empty() || id.ends_with(':') || id.ends_with('%') {
        return false;
    }
    id.bytes()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b':' | b'%' | b'-'))
}

/// A syntactically valid handle (a DNS name), e.g. `alice.bsky.social`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Handle(String);

impl Handle {
    pub fn parse(input: &str) -> Result<Self, SyntaxError> {
        if is_valid_handle(input) {
            Ok(Self(input.to_owned()))
        } else {
            Err(SyntaxError::InvalidHandle {
                input: input.to_owned(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_valid_handle(input: &str) -> bool {
    if input.is_empty() || input.len() > HANDLE_MAX_LEN {
        return false;
    }
    let labels: Vec<&str> = input.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let valid_labels = labels.iter().all(|label| {
        let bytes = label.as_bytes();
        !bytes.is_empty()
            && bytes.len() <= LABEL_MAX_LEN
            && bytes.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'-')
            && bytes[0] != b'-'
            && bytes[bytes.len() - 1] != b'-'
    });
    // TLDs may not start with a digit
    let tld_ok = labels
        .last()
        .and_then(|tld| tld.bytes().next())
        .is_some_and(|b| b.is_ascii_alphabetic());
    valid_labels && tld_ok
}

/// The authority component of an AT-URI: either a DID or a handle.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AtIdentifier {
    Did(Did),
    Handle(Handle),
}

impl AtIdentifier {
    pub fn parse(input: &str) -> Result<Self, SyntaxError> {
        let parsed = if input.starts_with("did:") {
            Did::parse(input).map(Self::Did)
        } else {
            Handle::parse(input).map(Self::Handle)
        };
        parsed.map_err(|_| SyntaxError::InvalidAuthority {
            input: input.to_owned(),
        })
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Did(did) => did.as_str(),
            Self::Handle(handle) => handle.as_str(),
        }
    }

    pub fn is_did(&self) -> bool {
        matches!(self, Self::Did(_))
    }
}

impl fmt::Display for Did {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for AtIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AtIdentifier {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_dids() {
        for did in [
            "did:plc:e2fun4xcfwtcrqfdwhfnghxk",
            "did:web:example.com",
            "did:web:localhost%3A1234",
            "did:method:val:two",
        ] {
            assert!(Did::parse(did).is_ok(), "{did}");
        }
        assert_eq!(Did::parse("did:web:example.com").unwrap().method(), "web");
    }

    #[test]
    fn rejects_invalid_dids() {
        for did in [
            "did:",
            "did:plc",
            "did:plc:",
            "did:PLC:abc",
            "did:plc:abc:",
            "did:plc:abc%",
            "did:plc:a/b",
            "plc:abc",
        ] {
            assert!(Did::parse(did).is_err(), "{did}");
        }
    }

    #[test]
    fn accepts_valid_handles() {
        for handle in [
            "jaygles.bsky.social",
            "did.plc.directory",
            "a.co",
            "xn--ls8h.test",
            "john-doe.example.org",
        ] {
            assert!(Handle::parse(handle).is_ok(), "{handle}");
        }
    }

    #[test]
    fn rejects_invalid_handles() {
        let long_label = format!("{}.com", "a".repeat(64));
        for handle in [
            "x",
            "",
            "example.",
            ".example.com",
            "-bad.example.com",
            "bad-.example.com",
            "example.123",
            "under_score.com",
            long_label.as_str(),
        ] {
            assert!(Handle::parse(handle).is_err(), "{handle}");
        }
    }

    #[test]
    fn at_identifier_dispatches_on_prefix() {
        let did = AtIdentifier::parse("did:plc:abc").unwrap();
        assert!(did.is_did());
        let handle = AtIdentifier::parse("alice.test").unwrap();
        assert!(!handle.is_did());
        assert_eq!(handle.to_string(), "alice.test");

        assert_eq!(
            AtIdentifier::parse("did:plc:").unwrap_err(),
            SyntaxError::InvalidAuthority {
                input: "did:plc:".to_string()
            }
        );
    }
}
