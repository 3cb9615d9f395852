//! Credit policy constants.
//!
//! A new user materializes with [`STARTING_CREDITS`] on their first balance
//! query; each successful generation consumes [`GENERATION_COST`]. The
//! balance itself is guarded by a conditional decrement at the database
//! layer, so these constants are the whole policy.

/// Allowance granted when a user's credit row is first created.
pub const STARTING_CREDITS: i32 = 10;

/// Credits consumed by one successful prompt generation.
pub const GENERATION_COST: i32 = 1;
