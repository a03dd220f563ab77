//! Command line model with span-carrying elements

use std::ops::Range;

/// One whitespace-delimited element of a command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandElement {
    /// Element text
    pub text: String,
    /// Byte span of the element within the raw input
    pub span: Range<usize>,
}

/// A parsed command line: the raw input plus its ordered elements
#[derive(Debug, Clone)]
pub struct CommandLine {
    /// Raw input text
    input: String,
    /// Ordered command elements with byte spans into `input`
    elements: Vec<CommandElement>,
}

impl CommandLine {
    /// Parse a raw input line into command elements
    ///
    /// Elements are maximal runs of non-whitespace bytes; quoting is not
    /// interpreted here (a token like `O'Brien` stays one element, and its
    /// quoting is handled when the completion script is rendered).
    ///
    /// # Arguments
    /// * `input` - Raw command line text
    ///
    /// # Returns
    /// * `Self` - Parsed command line
    pub fn parse(input: &str) -> Self {
        let mut elements = Vec::new();
        let mut start: Option<usize> = None;

        for (idx, ch) in input.char_indices() {
            if ch.is_whitespace() {
                if let Some(s) = start.take() {
                    elements.push(CommandElement {
                        text: input[s..idx].to_string(),
                        span: s..idx,
                    });
                }
            } else if start.is_none() {
                start = Some(idx);
            }
        }

        if let Some(s) = start {
            elements.push(CommandElement {
                text: input[s..].to_string(),
                span: s..input.len(),
            });
        }

        Self {
            input: input.to_string(),
            elements,
        }
    }

    /// Get the raw input text
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Get the ordered command elements
    pub fn elements(&self) -> &[CommandElement] {
        &self.elements
    }

    /// Check whether the line has no elements
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Get the command name (the first element), if any
    pub fn command_name(&self) -> Option<&str> {
        self.elements.first().map(|e| e.text.as_str())
    }

    /// End offset of the command extent (end of the last element)
    ///
    /// For `"ls "` this is 2, not 3: trailing whitespace is outside the
    /// extent, which is what makes the cursor-at-end test meaningful.
    pub fn extent_end(&self) -> usize {
        self.elements.last().map(|e| e.span.end).unwrap_or(0)
    }

    /// The command extent text: from the first element's start to the last
    /// element's end, excluding surrounding whitespace
    pub fn extent_text(&self) -> &str {
        match (self.elements.first(), self.elements.last()) {
            (Some(first), Some(last)) => &self.input[first.span.start..last.span.end],
            _ => "",
        }
    }
}
