//! Cursor-aware prediction context

use super::command_line::CommandLine;

/// Per-request view of a command line as seen from the cursor
///
/// Built once per completion request and discarded afterwards. The word
/// under the cursor is the element whose interior or right edge the cursor
/// touches; a cursor hanging in whitespace has an empty word.
#[derive(Debug, Clone)]
pub struct PredictionContext {
    /// Parsed command line
    line: CommandLine,
    /// Absolute byte offset of the cursor within the raw input
    cursor: usize,
    /// Text of the element under the cursor (possibly empty)
    word_at_cursor: String,
}

impl PredictionContext {
    /// Create a prediction context for an input line and cursor position
    ///
    /// # Arguments
    /// * `input` - Raw command line text
    /// * `cursor` - Byte offset of the cursor; clamped to the input length
    ///
    /// # Returns
    /// * `Self` - New prediction context
    pub fn new(input: &str, cursor: usize) -> Self {
        let cursor = cursor.min(input.len());
        let line = CommandLine::parse(input);
        let word_at_cursor = Self::word_at(&line, cursor);

        Self {
            line,
            cursor,
            word_at_cursor,
        }
    }

    /// Get the parsed command line
    pub fn line(&self) -> &CommandLine {
        &self.line
    }

    /// Get the cursor offset
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Get the word under the cursor (empty when hanging in whitespace)
    pub fn word_at_cursor(&self) -> &str {
        &self.word_at_cursor
    }

    /// Where a completion candidate should be spliced into the line:
    /// the start of the word under the cursor, or the cursor itself when
    /// no word is under it
    pub fn completion_start(&self) -> usize {
        for element in self.line.elements() {
            if element.span.start < self.cursor && self.cursor <= element.span.end {
                return element.span.start;
            }
        }
        self.cursor
    }

    fn word_at(line: &CommandLine, cursor: usize) -> String {
        for element in line.elements() {
            if element.span.start < cursor && cursor <= element.span.end {
                return element.text.clone();
            }
        }
        String::new()
    }
}
