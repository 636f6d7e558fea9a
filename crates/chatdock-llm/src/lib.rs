//! Completion API client for the chatdock proxy.
//!
//! One trait, one vendor implementation. The trait keeps the proxy route
//! testable without a live upstream.

pub mod client;

pub use client::{
    AnthropicClient, ChatSettings, CompletionClient, CompletionError, DEFAULT_ENDPOINT,
    DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECS,
};
