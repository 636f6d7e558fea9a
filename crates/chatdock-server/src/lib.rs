//! Preview server with the chat proxy for injected documentation sites.
//!
//! Serves the built site and bridges widget messages to the external
//! completion API over a single `POST /chatbot` route.

pub mod proxy;
pub mod server;

pub use proxy::{chat_handler, ChatRequest, ChatResponse, ErrorBody, ProxyState};
pub use server::{PreviewConfig, PreviewServer, ServerError};
