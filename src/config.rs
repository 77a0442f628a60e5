//! Client configuration baked in at build time.
//!
//! SYSTEM CONTEXT
//! ==============
//! The WASM bundle has no process environment at runtime, so deploy-specific
//! values are read with `option_env!` when the crate is compiled. Parsing is
//! kept in plain functions so defaults and overrides are unit-testable.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_ROUTER_BASE: &str = "/weekly-reports";
pub const DEFAULT_LOG_LEVEL: log::Level = log::Level::Info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend REST root, without a trailing slash.
    pub api_base_url: String,
    /// Path prefix the SPA is served under, without a trailing slash.
    pub router_base: String,
    pub log_level: log::Level,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_values(None, None, None)
    }
}

impl ClientConfig {
    /// Build config from compile-time environment.
    ///
    /// Optional:
    /// - `API_BASE_URL`: default `http://localhost:8000/api`
    /// - `ROUTER_BASE`: default `/weekly-reports`
    /// - `LOG_LEVEL`: `error`, `warn`, `info` (default), `debug`, `trace`
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::from_values(option_env!("API_BASE_URL"), option_env!("ROUTER_BASE"), option_env!("LOG_LEVEL"))
    }

    /// Build config from raw optional values; blanks count as absent.
    #[must_use]
    pub fn from_values(api_base_url: Option<&str>, router_base: Option<&str>, log_level: Option<&str>) -> Self {
        Self {
            api_base_url: normalize_base_url(api_base_url),
            router_base: normalize_router_base(router_base),
            log_level: parse_log_level(log_level),
        }
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|v| !v.is_empty())
}

fn normalize_base_url(raw: Option<&str>) -> String {
    non_blank(raw)
        .unwrap_or(DEFAULT_API_BASE_URL)
        .trim_end_matches('/')
        .to_owned()
}

fn normalize_router_base(raw: Option<&str>) -> String {
    let base = non_blank(raw).unwrap_or(DEFAULT_ROUTER_BASE).trim_matches('/');
    if base.is_empty() { String::new() } else { format!("/{base}") }
}

fn parse_log_level(raw: Option<&str>) -> log::Level {
    non_blank(raw)
        .and_then(|v| v.parse::<log::Level>().ok())
        .unwrap_or(DEFAULT_LOG_LEVEL)
}
