//! Embeddable mock SLS server.
//!
//! Lets client applications start the mock provider in-process, for example
//! from their own integration tests.

use std::future::Future;

use axum::Router;
use tokio::net::TcpListener;

use crate::{app::create_app, config::Config, state::AppState};

/// Mock SLS server for the configured flavor.
pub struct MockSlsServer {
    config: Config,
}

impl MockSlsServer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// The fully layered router, without binding a socket.
    pub fn router(&self) -> Router {
        create_app(AppState::new(self.config.clone()))
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tracing::info!(
            flavor = %self.config.flavor,
            samples = self.config.samples.len(),
            "Mock SLS server listening on http://{}",
            listener.local_addr()?
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
    }
}
