//! Repository layer: one zero-sized struct per table, methods take the
//! pool explicitly.

pub mod credit_repo;
pub mod generated_prompt_repo;
pub mod prompt_repo;
pub mod refresh_token_repo;
pub mod user_repo;

pub use credit_repo::CreditRepo;
pub use generated_prompt_repo::GeneratedPromptRepo;
pub use prompt_repo::PromptRepo;
pub use refresh_token_repo::RefreshTokenRepo;
pub use user_repo::UserRepo;
