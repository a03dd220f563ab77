//! Completion bridge core for bashcomp
//!
//! This module turns a host-side prediction request into candidates
//! computed by bash's own programmable-completion machinery.
//!
//! # Architecture
//!
//! The bridge consists of several components:
//!
//! - **ScriptBuilder**: renders the two bash scripts the bridge needs: one
//!   that asks bash which function completes a command, and one that
//!   rebuilds bash's completion environment (`COMP_LINE`, `COMP_WORDS`,
//!   `COMP_CWORD`, `COMP_POINT`) and calls that function
//! - **CompleterResolver**: memoizes, per command name, which completer
//!   function bash reports; one subprocess per distinct name, ever
//! - **CompletionEngine**: orchestrates resolution, script construction,
//!   invocation, and candidate normalization
//! - **registry**: the static set of native utilities the bridge answers
//!   for, plus the predictor's identity
//! - **Predictor / BashPredictor**: the capability contract the host shell
//!   composes, with "not applicable" distinct from "zero candidates"
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//! use bashcomp::completion::{BashPredictor, CompletionEngine, Predictor, ScriptBuilder};
//! use bashcomp::invoker::BashInvoker;
//! use bashcomp::parser::PredictionContext;
//!
//! # async fn demo() {
//! let invoker = Arc::new(BashInvoker::new("/bin/bash", Duration::from_secs(2)));
//! let scripts = ScriptBuilder::new("/usr/share/bash-completion/bash_completion", true);
//! let predictor = BashPredictor::new(CompletionEngine::new(invoker, scripts));
//!
//! let context = PredictionContext::new("git ch", 6);
//! let candidates = predictor.suggest(&context, &CancellationToken::new()).await;
//! # let _ = candidates;
//! # }
//! ```

mod engine;
mod predictor;
pub mod registry;
mod resolver;
mod script;

pub use engine::CompletionEngine;
pub use predictor::{BashPredictor, Predictor};
pub use resolver::CompleterResolver;
pub use script::{CompletionRequest, ScriptBuilder};
