//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render page chrome shared by the authenticated routes while
//! reading session state from Leptos context.

pub mod app_header;
