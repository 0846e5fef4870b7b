//! Shared client for OpenAI-compatible chat completion endpoints.

mod client;
mod dto;

pub use client::OpenAiCompatibleClient;
pub use dto::{ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
