//! Local mock of the SLS identity provider.
//!
//! Serves the login page, issues transparent authorization codes, exchanges
//! them for bearer tokens and answers userinfo requests, so client
//! applications can run their login flow without the real provider.
//!
//! Both protocol flavors are supported, see [`Flavor`].

mod app;
mod config;
mod error;
mod handlers;
mod middleware;
mod server;
mod state;
mod templates;

pub use app::create_app;
pub use config::{Config, Flavor};
pub use error::FlowError;
pub use server::MockSlsServer;
pub use state::AppState;
