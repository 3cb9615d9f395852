//! Authentication building blocks: JWT issuance/validation and the Google
//! OAuth code exchange.

pub mod google;
pub mod jwt;
