//! Live adapters for real external interactions.

pub mod anthropic;
pub mod console;
pub mod filesystem;
pub mod github;
pub mod gitignore_io;
pub mod ollama;
pub mod openai;
