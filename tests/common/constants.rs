//! Shared constants for end-to-end tests
//!
//! The seeded catalog is created by `fixtures::seed_catalog` in this order,
//! so ids are stable.

// ============================================================================
// Seeded Catalog
// ============================================================================

pub const AUTHOR_1_ID: i64 = 1;
pub const AUTHOR_1_NAME: &str = "Aeon";

pub const TRACK_1_ID: i64 = 1;
pub const TRACK_1_TITLE: &str = "Sunrise Walk";
pub const TRACK_1_PATH: &str = "/static/uploads/sunrise.mp3";

pub const TRACK_2_ID: i64 = 2;
pub const TRACK_2_TITLE: &str = "Night Drive";
pub const TRACK_2_PATH: &str = "/static/uploads/night.ogg";

pub const USER_1_ID: i64 = 1;
pub const USER_1_NAME: &str = "alice";
pub const USER_1_EMAIL: &str = "alice@example.com";

// ============================================================================
// Timeouts
// ============================================================================

pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 20;
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
