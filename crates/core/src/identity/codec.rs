//! Authorization code codec.
//!
//! A code is the ordered fields of an [`IdentityRecord`], each encoded with
//! the unpadded URL-safe base64 alphabet and joined with [`SEPARATOR`].
//! The format is intentionally transparent: anyone holding a code can read
//! the identity back out of it, and the code is the only state the mock
//! provider keeps.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

use super::{Code, CodecError};

/// Joins the encoded fields of a code.
///
/// Never produced by the URL-safe alphabet, so field content cannot change
/// the segment count.
pub const SEPARATOR: char = '.';

/// An ordered, fixed-arity set of string fields that round-trips through a [`Code`].
///
/// `FIELDS` names the fields in wire order. `to_fields` and `from_fields`
/// must follow that same order, which keeps both directions of the codec
/// defined by a single type.
pub trait IdentityRecord: Sized {
    /// Field names in encoding order. Its length is the code arity.
    const FIELDS: &'static [&'static str];

    /// Field values in `FIELDS` order.
    fn to_fields(&self) -> Vec<&str>;

    /// Rebuild the record from values in `FIELDS` order.
    ///
    /// Only called with exactly `FIELDS.len()` values.
    fn from_fields(fields: Vec<String>) -> Self;

    fn arity() -> usize {
        Self::FIELDS.len()
    }
}

/// Encode a record into an authorization code.
///
/// # Examples
///
/// ```
/// use msls_core::identity::{encode, SlsIdentity};
///
/// let identity = SlsIdentity {
///     sub: "alice".to_string(),
///     ..Default::default()
/// };
/// assert_eq!(encode(&identity).as_str(), "YWxpY2U......");
/// ```
pub fn encode<R: IdentityRecord>(record: &R) -> Code {
    let segments: Vec<String> = record
        .to_fields()
        .into_iter()
        .map(|field| URL_SAFE_NO_PAD.encode(field.as_bytes()))
        .collect();

    Code::new(segments.join(&SEPARATOR.to_string()))
}

/// Decode an authorization code back into a record.
///
/// Fails if the segment count does not match the record arity, or if any
/// segment is not unpadded URL-safe base64 of UTF-8 text.
pub fn decode<R: IdentityRecord>(code: &str) -> Result<R, CodecError> {
    let segments = split_segments::<R>(code)?;

    let fields = segments
        .into_iter()
        .zip(R::FIELDS.iter().copied())
        .map(|(segment, field)| decode_field(segment, field))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(R::from_fields(fields))
}

/// Decode only the subject (first field) of an authorization code.
///
/// The arity is still checked so a truncated code is never accepted here and
/// rejected later.
pub fn decode_subject<R: IdentityRecord>(code: &str) -> Result<String, CodecError> {
    let segments = split_segments::<R>(code)?;
    decode_field(segments[0], R::FIELDS[0])
}

fn split_segments<R: IdentityRecord>(code: &str) -> Result<Vec<&str>, CodecError> {
    let segments: Vec<&str> = code.split(SEPARATOR).collect();

    if segments.len() != R::arity() {
        return Err(CodecError::SegmentCount {
            expected: R::arity(),
            found: segments.len(),
        });
    }

    Ok(segments)
}

fn decode_field(segment: &str, field: &'static str) -> Result<String, CodecError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|source| CodecError::InvalidBase64 { field, source })?;

    String::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8 { field })
}
