/// Errors produced while validating AT Protocol identifiers.
///
/// Messages are surfaced verbatim to callers of the feed endpoint, so they
/// name the offending input.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    #[error("AT-URI too long: {len} bytes (max {max})")]
    TooLong { len: usize, max: usize },

    #[error("AT-URI must start with \"at://\": {input:?}")]
    InvalidScheme { input: String },

    #[error("AT-URI may not contain a query string: {input:?}")]
    QueryNotAllowed { input: String },

    #[error("AT-URI has too many path segments: {input:?}")]
    TooManySegments { input: String },

    #[error("AT-URI fragment must start with \"/\": {input:?}")]
    InvalidFragment { input: String },

    #[error("AT-URI authority is not a valid DID or handle: {input:?}")]
    InvalidAuthority { input: String },

    #[error("invalid DID: {input:?}")]
    InvalidDid { input: String },

    #[error("invalid handle: {input:?}")]
    InvalidHandle { input: String },

    #[error("invalid NSID: {input:?}")]
    InvalidNsid { input: String },

    #[error("invalid record key: {input:?}")]
    InvalidRecordKey { input: String },
}
