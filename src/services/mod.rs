// src/services/mod.rs
pub mod assistant;
pub mod fallback;
pub mod field_extractor;
pub mod groq_client;
pub mod knowledge;
pub mod prompts;
pub mod suggestions;
