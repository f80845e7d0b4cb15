pub mod client;

pub use client::{LlmQuery, OllamaClient, CONNECT_APOLOGY};
