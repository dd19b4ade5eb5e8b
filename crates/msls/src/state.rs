//! Shared application state.

use std::sync::Arc;

use msls_core::samples::SampleUser;

use crate::config::{Config, Flavor};

/// State handed to every request handler.
///
/// Holds only the immutable start-up configuration; all per-login state
/// travels inside the authorization code.
#[derive(Clone, Default)]
pub struct AppState {
    config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn flavor(&self) -> Flavor {
        self.config.flavor
    }

    pub fn samples(&self) -> &[SampleUser] {
        &self.config.samples
    }
}
