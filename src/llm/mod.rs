// file: src/llm/mod.rs
// description: completion service module exports
// reference: internal module structure

pub mod chat;

pub use chat::{ChatCompletionClient, CompletionService};
