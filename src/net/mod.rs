//! Networking modules for the weekly-reports REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` owns the shared client (bearer token, 401 hook, envelope decoding),
//! `types` defines the wire schema, and one module per backend area maps
//! typed calls onto requests. `fetch` is the browser transport.

pub mod auth;
pub mod entries;
pub mod enums;
pub mod error;
#[cfg(test)]
pub(crate) mod fake;
#[cfg(feature = "csr")]
pub mod fetch;
pub mod http;
pub mod pdf;
pub mod types;
pub mod weekly_reports;
