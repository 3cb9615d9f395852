//! REST client for the Google Gemini `generateContent` endpoint.
//!
//! The service makes exactly one kind of upstream call: submit an inline
//! image plus a fixed instructional template, and get back a descriptive
//! generation prompt. [`client::GeminiClient`] wraps that call with a hard
//! timeout; [`error::GeminiError`] classifies upstream failures so the API
//! layer can map each one to a distinct HTTP status.

pub mod client;
pub mod error;

pub use client::GeminiClient;
pub use error::GeminiError;
