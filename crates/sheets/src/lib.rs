//! certify Sheets — read-only client for the Google Sheets v4 `values` endpoint.

pub mod client;
pub mod models;
