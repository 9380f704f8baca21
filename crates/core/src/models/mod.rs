//! Data model for certificate lookups.

pub mod grid;
pub mod mapping;
pub mod query;
pub mod record;
