//! Functional core for the msls mock identity provider.
//!
//! Everything here is pure: no I/O, no shared state. The HTTP layer in the
//! `msls` crate builds on these types.
//!
//! - [`identity`]: identity records and the authorization code codec
//! - [`samples`]: sample beneficiaries and users shown on the login page

pub mod identity;
pub mod samples;
