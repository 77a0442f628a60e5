//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (loading, actions, navigation)
//! and keeps its pure input/label logic in plain functions next to the
//! component so it can be tested without a browser.


pub mod daily_entries;
pub mod login;
pub mod weekly_reports;

use crate::net::error::ApiError;

/// Text to show for a failed call: the backend's message when it sent one.
pub(crate) fn error_text(error: &ApiError) -> String {
    error.server_message().map_or_else(|| error.to_string(), str::to_owned)
}
