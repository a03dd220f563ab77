//! Error handling module for bashcomp.
//!
//! This module provides the crate-wide error types:
//! - A single top-level [`BashcompError`] wrapping more specific kinds
//! - A crate-wide [`Result`] alias
//!
//! Only one failure mode is loud: asking the resolver for the completer of
//! an empty command name. Everything the external bash process can do wrong
//! (spawn failure, timeout, garbage output) degrades to an empty candidate
//! list at the engine boundary, because an interactive completion provider
//! must never crash the host shell's input loop.

pub mod kinds;

// Re-export commonly used types
pub use kinds::{BashcompError, ConfigError, InvokeError, ResolveError, Result};
