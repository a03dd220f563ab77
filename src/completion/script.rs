//! Bash script construction for completion requests
//!
//! Everything the bridge ever says to bash is rendered here. Two scripts
//! exist: the resolver script (ask the completion registry which function
//! completes a command) and the completion script (rebuild the completion
//! environment and call that function). Both are pure string functions of
//! their inputs and are rebuilt on every request.
//!
//! The completion script ends with `IFS=$'\n'; echo """${COMPREPLY[*]}"""`:
//! setting IFS first makes `${COMPREPLY[*]}` join candidates with newlines,
//! so multi-word candidates survive the host's split-by-newline step, and
//! the doubled-up quoting keeps an empty array printing as an empty line
//! instead of tripping a syntax error.

/// Inputs for one completion-script render
///
/// Field names mirror bash's completion environment: `comp_line`,
/// `comp_words`, `comp_cword`, and `comp_point` become `COMP_LINE`,
/// `COMP_WORDS`, `COMP_CWORD`, and `COMP_POINT`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    /// Command name the completer is registered for
    pub command: String,
    /// Quoted command line text (`'ls -a'`, or `'ls '` with a hanging cursor)
    pub comp_line: String,
    /// Rendered word array literal (`('ls' '-a')`)
    pub comp_words: String,
    /// Index of the word containing the cursor
    pub comp_cword: usize,
    /// Absolute cursor offset within the line
    pub comp_point: usize,
    /// Resolved completer function name
    pub completer: String,
    /// Word currently being completed (possibly empty)
    pub word_to_complete: String,
    /// Word immediately preceding the cursor
    pub previous_word: String,
}

/// Renders the bash scripts used by the resolver and the engine
#[derive(Debug, Clone)]
pub struct ScriptBuilder {
    /// Path of the bash-completion definitions file to source
    init_script: String,
    /// Emit `bind 'set completion-ignore-case on'` before completing
    ignore_case: bool,
}

impl ScriptBuilder {
    /// Create a new script builder
    ///
    /// # Arguments
    /// * `init_script` - Path of the bash-completion definitions file
    /// * `ignore_case` - Whether completion should ignore case
    ///
    /// # Returns
    /// * `Self` - New builder
    pub fn new(init_script: impl Into<String>, ignore_case: bool) -> Self {
        Self {
            init_script: init_script.into(),
            ignore_case,
        }
    }

    /// Render the resolver script for a command
    ///
    /// Sources the completion definitions, triggers the lazy loader for the
    /// command, and dumps its `complete -p` registration. Every stage has
    /// stderr suppressed so a missing definition degrades to empty output.
    ///
    /// # Arguments
    /// * `command` - Command name to look up
    ///
    /// # Returns
    /// * `String` - Script text
    pub fn resolver_script(&self, command: &str) -> String {
        format!(
            ". {init} 2>/dev/null; _completion_loader {cmd} 2>/dev/null; complete -p {cmd} 2>/dev/null",
            init = self.init_script,
            cmd = command,
        )
    }

    /// Render the completion script for a request
    ///
    /// # Arguments
    /// * `request` - Completion request values
    ///
    /// # Returns
    /// * `String` - Script text
    pub fn completion_script(&self, request: &CompletionRequest) -> String {
        let bind = if self.ignore_case {
            "bind 'set completion-ignore-case on' 2>/dev/null; "
        } else {
            ""
        };

        format!(
            ". {init} 2>/dev/null; \
             _completion_loader {cmd} 2>/dev/null; \
             COMP_LINE={line}; \
             COMP_WORDS={words}; \
             COMP_CWORD={cword}; \
             COMP_POINT={point}; \
             {bind}{completer} {cmd_arg} {word_arg} {prev_arg} 2>/dev/null; \
             IFS=$'\\n'; \
             echo \"\"\"${{COMPREPLY[*]}}\"\"\"",
            init = self.init_script,
            cmd = request.command,
            line = request.comp_line,
            words = request.comp_words,
            cword = request.comp_cword,
            point = request.comp_point,
            bind = bind,
            completer = request.completer,
            cmd_arg = quote_word(&request.command),
            word_arg = quote_word(&request.word_to_complete),
            prev_arg = quote_word(&request.previous_word),
        )
    }
}

/// Wrap a word in single quotes, escaping embedded single quotes as `\'`
pub fn quote_word(word: &str) -> String {
    format!("'{}'", word.replace('\'', "\\'"))
}

/// Render the `COMP_WORDS` array literal for a command line
///
/// The line is split on runs of whitespace. When the cursor hangs after a
/// trailing separator rather than sitting at the end of the last word, an
/// explicit empty element is appended: the completer function must see the
/// in-progress empty word or its word count is off by one.
///
/// # Arguments
/// * `line` - Command extent text
/// * `cursor_at_end` - Whether the cursor sits exactly at the extent end
///
/// # Returns
/// * `String` - Array literal, e.g. `('ls' '-a')`
pub fn comp_words_array(line: &str, cursor_at_end: bool) -> String {
    let words: Vec<String> = line.split_whitespace().map(quote_word).collect();

    if words.is_empty() {
        return if cursor_at_end {
            "()".to_string()
        } else {
            "('')".to_string()
        };
    }

    let body = words.join(" ");
    if cursor_at_end {
        format!("({body})")
    } else {
        format!("({body} '')")
    }
}

/// Compute the index of the word containing the cursor
///
/// With the cursor exactly at the extent end the current word is the last
/// real element; anywhere past it a new, not-yet-materialized word is being
/// typed.
///
/// # Arguments
/// * `element_count` - Number of command elements
/// * `cursor_at_end` - Whether the cursor sits exactly at the extent end
///
/// # Returns
/// * `usize` - Zero-based index of the current word
pub fn cursor_word_index(element_count: usize, cursor_at_end: bool) -> usize {
    if cursor_at_end {
        element_count.saturating_sub(1)
    } else {
        element_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_array_cursor_at_end() {
        assert_eq!(comp_words_array("ls -a", true), "('ls' '-a')");
    }

    #[test]
    fn test_words_array_hanging_cursor_appends_empty_word() {
        assert_eq!(comp_words_array("ls", false), "('ls' '')");
    }

    #[test]
    fn test_words_array_single_word() {
        assert_eq!(comp_words_array("git", true), "('git')");
    }

    #[test]
    fn test_words_array_collapses_whitespace() {
        assert_eq!(
            comp_words_array("git   checkout  main", true),
            "('git' 'checkout' 'main')"
        );
    }

    #[test]
    fn test_words_array_escapes_single_quote() {
        assert_eq!(
            comp_words_array("grep O'Brien", true),
            "('grep' 'O\\'Brien')"
        );
    }

    #[test]
    fn test_words_array_empty_line() {
        assert_eq!(comp_words_array("", true), "()");
        assert_eq!(comp_words_array("", false), "('')");
    }

    #[test]
    fn test_cursor_word_index_at_end() {
        // "ls -a" with the cursor right after "-a": current word is "-a"
        assert_eq!(cursor_word_index(2, true), 1);
    }

    #[test]
    fn test_cursor_word_index_hanging() {
        // "ls " with the cursor after the space: a new word is being typed
        assert_eq!(cursor_word_index(1, false), 1);
    }

    #[test]
    fn test_cursor_word_index_does_not_underflow() {
        assert_eq!(cursor_word_index(0, true), 0);
    }

    #[test]
    fn test_quote_word_plain() {
        assert_eq!(quote_word("checkout"), "'checkout'");
        assert_eq!(quote_word(""), "''");
    }

    #[test]
    fn test_quote_word_embedded_quote() {
        assert_eq!(quote_word("O'Brien"), "'O\\'Brien'");
    }

    #[test]
    fn test_resolver_script_shape() {
        let builder = ScriptBuilder::new("/usr/share/bash-completion/bash_completion", true);
        let script = builder.resolver_script("git");

        assert!(script.starts_with(". /usr/share/bash-completion/bash_completion 2>/dev/null"));
        assert!(script.contains("_completion_loader git 2>/dev/null"));
        assert!(script.contains("complete -p git 2>/dev/null"));
    }

    #[test]
    fn test_completion_script_shape() {
        let builder = ScriptBuilder::new("/usr/share/bash-completion/bash_completion", true);
        let request = CompletionRequest {
            command: "ls".to_string(),
            comp_line: "'ls -a'".to_string(),
            comp_words: "('ls' '-a')".to_string(),
            comp_cword: 1,
            comp_point: 5,
            completer: "_longopt".to_string(),
            word_to_complete: "-a".to_string(),
            previous_word: "ls".to_string(),
        };

        let script = builder.completion_script(&request);

        assert!(script.contains("COMP_LINE='ls -a'; "));
        assert!(script.contains("COMP_WORDS=('ls' '-a'); "));
        assert!(script.contains("COMP_CWORD=1; "));
        assert!(script.contains("COMP_POINT=5; "));
        assert!(script.contains("bind 'set completion-ignore-case on' 2>/dev/null; "));
        assert!(script.contains("_longopt 'ls' '-a' 'ls' 2>/dev/null; "));
        assert!(script.ends_with("IFS=$'\\n'; echo \"\"\"${COMPREPLY[*]}\"\"\""));
    }

    #[test]
    fn test_completion_script_without_ignore_case() {
        let builder = ScriptBuilder::new("/usr/share/bash-completion/bash_completion", false);
        let request = CompletionRequest {
            command: "ls".to_string(),
            comp_line: "'ls '".to_string(),
            comp_words: "('ls' '')".to_string(),
            comp_cword: 1,
            comp_point: 3,
            completer: "_longopt".to_string(),
            word_to_complete: String::new(),
            previous_word: "ls".to_string(),
        };

        let script = builder.completion_script(&request);
        assert!(!script.contains("completion-ignore-case"));
        assert!(script.contains("_longopt 'ls' '' 'ls' 2>/dev/null; "));
    }
}
