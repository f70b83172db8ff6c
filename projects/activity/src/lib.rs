//! GitHub commit streak and health service
//!
//! - REST API endpoints in `endpoints/`
//! - Streak aggregation over a trailing 31-day window in `activity/`
//! - Requires GITHUB_CLIENT_ID / GITHUB_CLIENT_SECRET env vars for the OAuth exchange

pub mod activity;
pub mod config;
pub mod endpoints;
