//! Custom prompt implementation for the demo shell

use reedline::{Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus};

/// Prompt for the bashcomp demo shell
pub struct BridgePrompt {
    /// Name shown at the left edge
    name: String,
}

impl BridgePrompt {
    /// Create a new prompt
    ///
    /// # Arguments
    /// * `name` - Name shown at the left edge
    ///
    /// # Returns
    /// * `Self` - New prompt
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Prompt for BridgePrompt {
    fn render_prompt_left(&self) -> std::borrow::Cow<'_, str> {
        format!("{}> ", self.name).into()
    }

    fn render_prompt_right(&self) -> std::borrow::Cow<'_, str> {
        "".into()
    }

    fn render_prompt_indicator(&self, _prompt_mode: PromptEditMode) -> std::borrow::Cow<'_, str> {
        "".into()
    }

    fn render_prompt_multiline_indicator(&self) -> std::borrow::Cow<'_, str> {
        "... ".into()
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> std::borrow::Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };
        format!("({}reverse-search: {}) ", prefix, history_search.term).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_prompt_carries_name() {
        let prompt = BridgePrompt::new("bashcomp");
        assert_eq!(prompt.render_prompt_left(), "bashcomp> ");
    }

    #[test]
    fn test_right_prompt_is_empty() {
        let prompt = BridgePrompt::new("bashcomp");
        assert_eq!(prompt.render_prompt_right(), "");
    }
}
