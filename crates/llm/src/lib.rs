//! # Advisor LLM
//!
//! Thin client for the hosted text-generation service, consumed strictly as
//! prompt-in/text-out: a system message and a user message go over the wire,
//! the assistant's text comes back. Everything the advisor delegates to the
//! service (preference extraction, question phrasing, re-ranking) goes
//! through [`ChatClient::complete`]; interpreting the reply is the caller's
//! concern.

mod client;
mod error;

pub use client::{ChatClient, ChatConfig};
pub use error::{LlmError, Result};
