//! certify web — certificate verification page, JSON API and QR rendering.

pub mod presenter;
pub mod qr;
pub mod routes;
