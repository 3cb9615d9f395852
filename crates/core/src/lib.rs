//! Pure domain logic shared by the repository, client, and API layers.
//!
//! Nothing in this crate performs I/O: it holds the shared ID/timestamp
//! types, the domain error taxonomy, image payload validation, generated
//! text sanitization, credit and trending policy, and pagination math.

pub mod credits;
pub mod error;
pub mod image;
pub mod pagination;
pub mod sanitize;
pub mod search;
pub mod trending;
pub mod types;
