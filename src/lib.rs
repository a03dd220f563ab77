//! Bash Completion Bridge Library
//!
//! This library reuses bash's native programmable-completion machinery from
//! Rust: it discovers which bash function completes a command, rebuilds
//! bash's completion environment for the line being edited, runs the
//! function in a bounded, cancellable bash subprocess, and hands the host a
//! normalized candidate list.
//!
//! # Modules
//!
//! - `cli`: Command-line interface and argument parsing
//! - `completion`: Completion bridge core (resolver, script builder,
//!   engine, predictor, known-utility registry)
//! - `config`: Configuration management
//! - `error`: Error types and handling
//! - `invoker`: Bash subprocess invocation with timeout and cancellation
//! - `parser`: Host-side command-line model
//! - `repl`: Interactive demo shell
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//! use bashcomp::completion::{BashPredictor, CompletionEngine, Predictor, ScriptBuilder};
//! use bashcomp::invoker::BashInvoker;
//! use bashcomp::parser::PredictionContext;
//!
//! #[tokio::main]
//! async fn main() {
//!     let invoker = Arc::new(BashInvoker::new("/bin/bash", Duration::from_secs(2)));
//!     let scripts = ScriptBuilder::new("/usr/share/bash-completion/bash_completion", true);
//!     let predictor = BashPredictor::new(CompletionEngine::new(invoker, scripts));
//!
//!     let context = PredictionContext::new("git ch", 6);
//!     if let Some(candidates) = predictor.suggest(&context, &CancellationToken::new()).await {
//!         for candidate in candidates {
//!             println!("{candidate}");
//!         }
//!     }
//! }
//! ```

pub mod cli;
pub mod completion;
pub mod config;
pub mod error;
pub mod invoker;
pub mod parser;
pub mod repl;

// Re-export commonly used types
pub use completion::{BashPredictor, CompletionEngine, Predictor, ScriptBuilder};
pub use config::Config;
pub use error::{BashcompError, Result};
pub use invoker::{BashInvoker, ShellInvoker};
pub use parser::{CommandLine, PredictionContext};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
///
/// # Returns
/// * `&str` - Version string
pub fn version() -> &'static str {
    VERSION
}
