//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! The session is the only long-lived client state; entries and reports are
//! fetched per page and discarded.

#[cfg(test)]
pub(crate) mod fake_auth;
pub mod session;
