//! Route table and per-route access rules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Paths here are relative to the router base (`ClientConfig::router_base`).
//! The guard in [`guard`] reads [`RouteMeta`] for every navigation.

pub mod guard;


pub const ROOT_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const WEEKLY_REPORTS_PATH: &str = "/weekly-reports";
pub const DAILY_ENTRIES_PATH: &str = "/daily-entries";

/// Where authenticated users land when they hit a guest-only route.
pub const LANDING_PATH: &str = WEEKLY_REPORTS_PATH;
/// Where `/` sends everyone.
pub const ROOT_REDIRECT: &str = DAILY_ENTRIES_PATH;

/// Static access flags attached to a route.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
    pub requires_guest: bool,
}

impl RouteMeta {
    pub const PUBLIC: Self = Self { requires_auth: false, requires_guest: false };
    pub const AUTH: Self = Self { requires_auth: true, requires_guest: false };
    pub const GUEST: Self = Self { requires_auth: false, requires_guest: true };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteDef {
    pub path: &'static str,
    pub name: &'static str,
    pub meta: RouteMeta,
}

pub const ROUTES: &[RouteDef] = &[
    RouteDef { path: LOGIN_PATH, name: "Login", meta: RouteMeta::GUEST },
    RouteDef { path: WEEKLY_REPORTS_PATH, name: "WeeklyReports", meta: RouteMeta::AUTH },
    RouteDef { path: DAILY_ENTRIES_PATH, name: "DailyEntries", meta: RouteMeta::AUTH },
];

/// Look up a route by path, ignoring a trailing slash and any query string.
#[must_use]
pub fn find_route(path: &str) -> Option<&'static RouteDef> {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let path = if path.len() > 1 { path.trim_end_matches('/') } else { path };
    ROUTES.iter().find(|r| r.path == path)
}

/// Access flags for `path`; unknown paths carry none.
#[must_use]
pub fn route_meta(path: &str) -> RouteMeta {
    find_route(path).map_or(RouteMeta::PUBLIC, |r| r.meta)
}

/// Join the router base and an app path into a browser path.
#[must_use]
pub fn full_path(router_base: &str, path: &str) -> String {
    let base = router_base.trim_end_matches('/');
    if path == ROOT_PATH { format!("{base}/") } else { format!("{base}{path}") }
}
