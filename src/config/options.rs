// src/config/options.rs
use std::path::PathBuf;

use super::consts::*;

/// Which action handle an aggregation entry keeps when the same
/// (seller, price) shows up again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HandlePolicy {
    /// Every repeat overwrites the stored handle.
    #[default]
    LastSeen,
    /// The handle of the listing that created the entry is kept.
    FirstSeen,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppOptions {
    pub page: PageOptions,
    pub aggregate: AggregateOptions,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            page: PageOptions::default(),
            aggregate: AggregateOptions::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageOptions {
    /// Saved trade page scanned at startup.
    pub path: Option<PathBuf>,
    /// Directory polled for newly appearing result fragments.
    pub watch_dir: Option<PathBuf>,
    /// Overrides the account name read from the page header.
    pub own_account: Option<String>,
    pub poll_ms: u64,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            path: None,
            watch_dir: None,
            own_account: None,
            poll_ms: POLL_MS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AggregateOptions {
    pub top_n: usize,
    pub handle_policy: HandlePolicy,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            top_n: TOP_SELLERS,
            handle_policy: HandlePolicy::LastSeen,
        }
    }
}
