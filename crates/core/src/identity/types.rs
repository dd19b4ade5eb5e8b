use serde::{Deserialize, Serialize};

use super::IdentityRecord;

/// Opaque authorization code handed to the client after login.
///
/// Also serves as the bearer token for the userinfo endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Code(String);

impl Code {
    pub fn new(code: String) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity returned by the SLS userinfo endpoint.
///
/// Serializes to the flat userinfo document, so field names here are the
/// public names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlsIdentity {
    pub sub: String,
    pub name: String,
    pub given_name: String,
    pub family_name: String,
    pub email: String,
    pub pt_identity: String,
    pub identity_type: String,
}

impl IdentityRecord for SlsIdentity {
    const FIELDS: &'static [&'static str] = &[
        "sub",
        "name",
        "given_name",
        "family_name",
        "email",
        "pt_identity",
        "identity_type",
    ];

    fn to_fields(&self) -> Vec<&str> {
        vec![
            self.sub.as_str(),
            self.name.as_str(),
            self.given_name.as_str(),
            self.family_name.as_str(),
            self.email.as_str(),
            self.pt_identity.as_str(),
            self.identity_type.as_str(),
        ]
    }

    fn from_fields(fields: Vec<String>) -> Self {
        let mut fields = fields.into_iter();
        let mut next = || fields.next().unwrap_or_default();

        Self {
            sub: next(),
            name: next(),
            given_name: next(),
            family_name: next(),
            email: next(),
            pt_identity: next(),
            identity_type: next(),
        }
    }
}

/// Identity carried by SLSx request tokens.
///
/// Public names are assigned by the userinfo handler, which nests them
/// under `data.user`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlsxIdentity {
    pub usr: String,
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub hicn: String,
    pub mbi: String,
}

impl IdentityRecord for SlsxIdentity {
    const FIELDS: &'static [&'static str] = &[
        "usr",
        "name",
        "first_name",
        "last_name",
        "email",
        "hicn",
        "mbi",
    ];

    fn to_fields(&self) -> Vec<&str> {
        vec![
            self.usr.as_str(),
            self.name.as_str(),
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.email.as_str(),
            self.hicn.as_str(),
            self.mbi.as_str(),
        ]
    }

    fn from_fields(fields: Vec<String>) -> Self {
        let mut fields = fields.into_iter();
        let mut next = || fields.next().unwrap_or_default();

        Self {
            usr: next(),
            name: next(),
            first_name: next(),
            last_name: next(),
            email: next(),
            hicn: next(),
            mbi: next(),
        }
    }
}

/// Beneficiary identity discriminator offered on the SLS login form.
///
/// The form value is encoded as-is; this enum only drives rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityType {
    Hicn,
    HicnHash,
    Mbi,
    MbiHash,
    BeneId,
}

impl IdentityType {
    pub const ALL: [IdentityType; 5] = [
        Self::Hicn,
        Self::HicnHash,
        Self::Mbi,
        Self::MbiHash,
        Self::BeneId,
    ];

    /// Value submitted by the form.
    pub fn code(self) -> &'static str {
        match self {
            Self::Hicn => "H",
            Self::HicnHash => "HH",
            Self::Mbi => "M",
            Self::MbiHash => "MH",
            Self::BeneId => "S",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Hicn => "HICN",
            Self::HicnHash => "HICN Hash",
            Self::Mbi => "MBI",
            Self::MbiHash => "MBI Hash",
            Self::BeneId => "BENE ID",
        }
    }

    /// Whether the real provider accepts this discriminator from the login form.
    pub fn is_selectable(self) -> bool {
        matches!(self, Self::Hicn | Self::Mbi)
    }
}
