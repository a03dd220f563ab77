//! Prediction-provider contract and the bash-backed implementation
//!
//! [`Predictor`] is the seam the host shell composes: suggestion retrieval
//! plus feedback hooks with provided no-op defaults. Returning `None` from
//! [`Predictor::suggest`] means "not applicable here", a different signal
//! from `Some(vec![])`, which means the provider was applicable but bash
//! produced nothing.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use super::engine::CompletionEngine;
use super::registry;
use crate::parser::PredictionContext;

/// Capability contract for a suggestion provider
#[async_trait]
pub trait Predictor: Send + Sync {
    /// Fixed identifier the host registers the provider under
    fn id(&self) -> &'static str;

    /// Short provider name
    fn name(&self) -> &'static str;

    /// Human-readable provider description
    fn description(&self) -> &'static str;

    /// Compute suggestions for a prediction context
    ///
    /// # Arguments
    /// * `context` - Cursor-aware view of the command line
    /// * `cancel` - Cancellation token honored across subprocess calls
    ///
    /// # Returns
    /// * `Option<Vec<String>>` - `None` when the provider does not apply to
    ///   this input; otherwise the (possibly empty) candidate list
    async fn suggest(
        &self,
        context: &PredictionContext,
        cancel: &CancellationToken,
    ) -> Option<Vec<String>>;

    /// Called when the host accepted a suggestion. No-op by default.
    fn suggestion_accepted(&self, _suggestion: &str) {}

    /// Called when the host dismissed the last suggestion. No-op by default.
    fn suggestion_denied(&self) {}

    /// Called with session history for warm-up. No-op by default.
    fn process_history(&self, _history: &[String]) {}
}

/// Predictor backed by bash's native completion machinery
pub struct BashPredictor {
    /// Bridge engine performing the actual work
    engine: CompletionEngine,
}

impl BashPredictor {
    /// Create a new bash predictor
    ///
    /// # Arguments
    /// * `engine` - Completion engine
    ///
    /// # Returns
    /// * `Self` - New predictor
    pub fn new(engine: CompletionEngine) -> Self {
        Self { engine }
    }

    /// Access the underlying engine
    pub fn engine(&self) -> &CompletionEngine {
        &self.engine
    }
}

#[async_trait]
impl Predictor for BashPredictor {
    fn id(&self) -> &'static str {
        registry::PREDICTOR_ID
    }

    fn name(&self) -> &'static str {
        registry::PREDICTOR_NAME
    }

    fn description(&self) -> &'static str {
        registry::PREDICTOR_DESCRIPTION
    }

    async fn suggest(
        &self,
        context: &PredictionContext,
        cancel: &CancellationToken,
    ) -> Option<Vec<String>> {
        let line = context.line();
        let command = line.command_name()?.to_string();
        if !registry::is_known_util(&command) {
            return None;
        }

        let command_name_end = line.elements()[0].span.end;
        let mut cursor = context.cursor();
        let mut word_to_complete = context.word_at_cursor().to_string();

        if line.elements().len() == 1 && cursor == line.extent_end() {
            // Cursor at the end of a bare command name: ask for the first
            // argument with nothing typed yet.
            cursor += 1;
            word_to_complete = String::new();
        } else if cursor <= command_name_end {
            // The cursor is still inside the command name; completing the
            // command itself is the host's job, not this provider's.
            return None;
        }

        match self
            .engine
            .complete(&command, &word_to_complete, line, cursor, cancel)
            .await
        {
            Ok(candidates) => Some(candidates),
            Err(e) => {
                warn!(command = %command, error = %e, "prediction failed");
                None
            }
        }
    }
}
