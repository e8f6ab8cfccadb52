//! Core library components.
//!
//! Reusable logic for parsing, redacting, encrypting and storing .env
//! files. Nothing here prompts or prints; the CLI layer drives it.

pub mod cipher;
pub mod config;
pub mod constants;
pub mod domain;
pub mod manifest;
pub mod redact;
pub mod repo;
pub mod store;
