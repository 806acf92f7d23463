use super::SyntaxError;
use core::fmt;
use core::str::FromStr;

const RECORD_KEY_MAX_LEN: usize = 512;

/// The key of a record within a collection. For feed generators this is the
/// feed's short name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RecordKey(String);

impl RecordKey {
    pub fn parse(input: &str) -> Result<Self, SyntaxError> {
        if is_valid_record_key(input) {
            Ok(Self(input.to_owned()))
        } else {
            Err(SyntaxError::InvalidRecordKey {
                input: input.to_owned(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub(crate) fn is_valid_record_key(input: &str) -> bool {
    !input.is_empty()
        && input.len() <= RECORD_KEY_MAX_LEN
        && input != "."
        && input != ".."
        && input
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'~' | b':' | b'-'))
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RecordKey {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
