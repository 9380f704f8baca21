//! certify core — configuration, sheet data model, row resolution and the lookup pipeline.

pub mod config;
pub mod error;
pub mod lookup;
pub mod models;
pub mod resolver;
