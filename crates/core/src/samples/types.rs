use serde::{Deserialize, Serialize};

/// A synthetic beneficiary suggested on the login page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleBeneficiary {
    pub subject: String,
    pub hicn: String,
    pub mbi: String,
}

/// A synthetic user row from a sample users CSV file.
///
/// Columns are matched by header name; missing columns are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleUser {
    pub username: String,
    pub hicn: String,
    pub mbi: String,
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<SampleBeneficiary> for SampleUser {
    fn from(sample: SampleBeneficiary) -> Self {
        Self {
            username: sample.subject,
            hicn: sample.hicn,
            mbi: sample.mbi,
            ..Self::default()
        }
    }
}
