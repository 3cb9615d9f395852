//! Request-level middleware (authentication extractors).

pub mod auth;
