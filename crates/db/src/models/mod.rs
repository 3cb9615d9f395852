//! Row structs and DTOs for the Postgres layer.

pub mod credits;
pub mod generated_prompt;
pub mod prompt;
pub mod refresh_token;
pub mod user;
