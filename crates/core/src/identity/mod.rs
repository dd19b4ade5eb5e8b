mod codec;
mod error;
mod types;

pub use codec::{decode, decode_subject, encode, IdentityRecord, SEPARATOR};
pub use error::CodecError;
pub use types::{Code, IdentityType, SlsIdentity, SlsxIdentity};
