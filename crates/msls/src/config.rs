use std::path::Path;

use msls_core::samples::{parse_list, parse_users_csv, zip_samples, SampleUser};

/// Which identity provider protocol the server speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Flavor {
    /// Classic SLS: `/`, `/login`, `/token`, `/userinfo`.
    #[default]
    Sls,
    /// SLSx: `/sso/authorize`, `/login/`, `/sso/session`, `/v1/users/{id}`.
    Slsx,
}

impl std::fmt::Display for Flavor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sls => write!(f, "sls"),
            Self::Slsx => write!(f, "slsx"),
        }
    }
}

/// Server configuration, built once at start-up and never mutated.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub flavor: Flavor,
    /// Sample users for the login page, from the comma-separated lists
    /// and the users CSV. Sources that fail to load contribute nothing.
    pub samples: Vec<SampleUser>,
}

impl Config {
    pub fn new(flavor: Flavor) -> Self {
        Self {
            flavor,
            samples: Vec::new(),
        }
    }

    /// Attach sample beneficiaries from comma-separated subject, HICN and
    /// MBI lists.
    ///
    /// Lists of unequal length are logged and dropped; the login page then
    /// renders without sample help.
    pub fn with_sample_lists(mut self, subjects: &str, hicns: &str, mbis: &str) -> Self {
        match zip_samples(parse_list(subjects), parse_list(hicns), parse_list(mbis)) {
            Ok(samples) => self.samples.extend(samples.into_iter().map(SampleUser::from)),
            Err(e) => tracing::warn!(error = %e, "Ignoring sample beneficiary lists"),
        }
        self
    }

    /// Attach sample users read from a CSV file with a header row.
    ///
    /// A missing, unreadable or malformed file is logged and skipped.
    pub fn with_sample_users_csv(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let users = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|raw| parse_users_csv(&raw).map_err(|e| e.to_string()));

        match users {
            Ok(users) => {
                tracing::debug!(path = %path.display(), count = users.len(), "Loaded sample users");
                self.samples.extend(users);
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), error = %error, "Ignoring sample users CSV");
            }
        }
        self
    }
}
