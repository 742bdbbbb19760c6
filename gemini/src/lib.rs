//! # Arealens Gemini
//!
//! Thin client for Google's Gemini `generateContent` REST endpoint: one
//! prompt in, one block of text out. Running without an API key is a valid,
//! handled state; callers check [`GeminiClient::is_configured`] and keep
//! their own fallback text. The client itself never retries and always
//! bounds the request with a timeout.

mod client;
mod error;

pub use client::GeminiClient;
pub use client::GeminiConfig;
pub use error::GeminiError;
pub use error::Result;
