//! Interactive demo shell for bashcomp
//!
//! A small reedline-based shell that shows the bridge end to end: Tab asks
//! [`BashPredictor`](crate::completion::BashPredictor) for candidates
//! computed by bash's own completion scripts, Enter hands the line to bash
//! for execution. This is the crate's stand-in for a real host shell; the
//! library surface does not depend on it.

mod completer;
mod engine;
mod prompt;

pub use completer::BridgeCompleter;
pub use engine::ReplEngine;
pub use prompt::BridgePrompt;
