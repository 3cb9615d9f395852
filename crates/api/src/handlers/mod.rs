//! Request handlers.
//!
//! Each submodule provides async handler functions for a single resource.
//! Handlers delegate to the corresponding repository in `promptlens_db` and
//! map errors via [`crate::error::AppError`].

pub mod auth;
pub mod credits;
pub mod generate;
pub mod history;
pub mod prompts;
