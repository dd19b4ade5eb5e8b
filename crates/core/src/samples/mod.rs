mod error;
mod functions;
mod types;

pub use error::SampleError;
pub use functions::{parse_list, parse_users_csv, zip_samples};
pub use types::{SampleBeneficiary, SampleUser};
