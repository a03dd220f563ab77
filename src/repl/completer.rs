//! Completer for reedline - bridges Tab to the bash predictor

use std::sync::Arc;

use reedline::{Completer, Span, Suggestion};
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

use crate::completion::Predictor;
use crate::parser::PredictionContext;

/// reedline completer backed by a [`Predictor`]
pub struct BridgeCompleter {
    /// Predictor computing the candidates
    predictor: Arc<dyn Predictor>,
}

impl BridgeCompleter {
    /// Create a new bridge completer
    ///
    /// # Arguments
    /// * `predictor` - Predictor computing the candidates
    ///
    /// # Returns
    /// * `Self` - New completer
    pub fn new(predictor: Arc<dyn Predictor>) -> Self {
        Self { predictor }
    }

    /// Fetch candidates for a context from the async predictor
    ///
    /// reedline completers are synchronous; when called inside a tokio
    /// runtime this blocks in place on the predictor, and without a
    /// runtime it returns no candidates rather than panicking.
    fn fetch(&self, context: &PredictionContext) -> Vec<String> {
        if Handle::try_current().is_ok() {
            let predictor = self.predictor.clone();
            let context = context.clone();
            tokio::task::block_in_place(move || {
                Handle::current().block_on(async move {
                    predictor
                        .suggest(&context, &CancellationToken::new())
                        .await
                        .unwrap_or_default()
                })
            })
        } else {
            Vec::new()
        }
    }
}

impl Completer for BridgeCompleter {
    /// Complete the input at the given cursor position
    ///
    /// # Arguments
    /// * `line` - The input line
    /// * `pos` - Cursor position (byte index)
    ///
    /// # Returns
    /// * `Vec<Suggestion>` - List of completion suggestions
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let context = PredictionContext::new(line, pos);
        let start = context.completion_start();
        let candidates = self.fetch(&context);

        candidates
            .into_iter()
            .map(|value| Suggestion {
                value,
                description: None,
                style: None,
                extra: None,
                span: Span::new(start, pos),
                append_whitespace: false,
                match_indices: None,
            })
            .collect()
    }
}
