// src/config/consts.rs

// Local store
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = ".store/debug.log";

// Overlay visibility flag
pub const VISIBILITY_KEY: &str = "aggregatorState";
pub const VISIBILITY_OPEN: &str = "open";
pub const VISIBILITY_CLOSED: &str = "closed";

// Aggregation
pub const TOP_SELLERS: usize = 10;

// Feed
pub const POLL_MS: u64 = 500;
pub const FRAGMENT_EXT: &str = "html";

// Page markup
pub const RESULTSET_CLASS: &str = "resultset";
pub const ERROR_CLASS: &str = "error";
pub const PROFILE_LINK_CLASS: &str = "profile-link";
pub const WHISPER_BUTTON_CLASS: &str = "direct-btn";
pub const LOGGED_IN_CLASS: &str = "loggedInStatus";
pub const PRICE_FIELD: &str = "price";
pub const PRICE_QUANTITY_CHILD: usize = 1;
pub const PRICE_CURRENCY_CHILD: usize = 3;
