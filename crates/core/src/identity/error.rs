use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("malformed authorization code: expected {expected} segments, found {found}")]
    SegmentCount { expected: usize, found: usize },

    #[error("malformed authorization code: field `{field}` is not unpadded url-safe base64: {source}")]
    InvalidBase64 {
        field: &'static str,
        #[source]
        source: base64::DecodeError,
    },

    #[error("malformed authorization code: field `{field}` is not valid UTF-8")]
    InvalidUtf8 { field: &'static str },
}
