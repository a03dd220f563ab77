//! Completion engine - orchestrates one bridge request
//!
//! One request flows resolve -> build script -> invoke -> normalize. The
//! engine is where the degrade-to-silence policy lives: a command with no
//! known completer, a cursor position with no previous word, a failed or
//! timed-out subprocess: all of them come back as an empty candidate
//! list, never as an error the host's input loop would have to handle.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::resolver::CompleterResolver;
use super::script::{CompletionRequest, ScriptBuilder, comp_words_array, cursor_word_index, quote_word};
use crate::error::Result;
use crate::invoker::ShellInvoker;
use crate::parser::CommandLine;

/// Main completion engine
pub struct CompletionEngine {
    /// Invoker for the completion subprocess call
    invoker: Arc<dyn ShellInvoker>,
    /// Per-command completer-function resolution
    resolver: CompleterResolver,
    /// Script renderer
    scripts: ScriptBuilder,
}

impl CompletionEngine {
    /// Create a new completion engine
    ///
    /// # Arguments
    /// * `invoker` - Shell invoker shared with the resolver
    /// * `scripts` - Script renderer
    ///
    /// # Returns
    /// * `Self` - New engine with an empty resolution cache
    pub fn new(invoker: Arc<dyn ShellInvoker>, scripts: ScriptBuilder) -> Self {
        let resolver = CompleterResolver::new(invoker.clone(), scripts.clone());
        Self {
            invoker,
            resolver,
            scripts,
        }
    }

    /// Access the resolver (exposed for cache inspection)
    pub fn resolver(&self) -> &CompleterResolver {
        &self.resolver
    }

    /// Compute completion candidates for a command
    ///
    /// # Arguments
    /// * `command` - Command name; must be non-empty
    /// * `word_to_complete` - Word under the cursor (possibly empty)
    /// * `line` - Parsed command line
    /// * `cursor` - Absolute cursor offset
    /// * `cancel` - Cancellation token for subprocess calls
    ///
    /// # Returns
    /// * `Result<Vec<String>>` - Deduplicated, ordinally sorted candidates;
    ///   empty on any degradable failure
    pub async fn complete(
        &self,
        command: &str,
        word_to_complete: &str,
        line: &CommandLine,
        cursor: usize,
        cancel: &CancellationToken,
    ) -> Result<Vec<String>> {
        let completer = self.resolver.resolve(command, cancel).await?;
        if completer.is_empty() {
            debug!(command, "no completer known, no candidates");
            return Ok(Vec::new());
        }

        let cursor_at_end = cursor == line.extent_end();
        let comp_cword = cursor_word_index(line.elements().len(), cursor_at_end);
        if comp_cword == 0 {
            // The cursor is on the command name itself; there is no
            // previous word to hand to the completer.
            debug!(command, "cursor word index 0, no candidates");
            return Ok(Vec::new());
        }

        let previous_word = line.elements()[comp_cword - 1].text.clone();
        let extent = line.extent_text();
        let comp_line = if cursor_at_end {
            quote_word(extent)
        } else {
            quote_word(&format!("{extent} "))
        };

        let request = CompletionRequest {
            command: command.to_string(),
            comp_line,
            comp_words: comp_words_array(extent, cursor_at_end),
            comp_cword,
            comp_point: cursor,
            completer,
            word_to_complete: word_to_complete.to_string(),
            previous_word,
        };

        let script = self.scripts.completion_script(&request);
        let stdout = match self.invoker.invoke(&script, cancel).await {
            Ok(stdout) => stdout,
            Err(e) => {
                warn!(command, error = %e, "completion invocation failed");
                return Ok(Vec::new());
            }
        };

        Ok(normalize_candidates(&stdout))
    }
}

/// Normalize raw subprocess output into the final candidate list
///
/// Splits on newlines, drops blank lines (an empty `COMPREPLY` prints one),
/// deduplicates on exact equality, and sorts by byte comparison.
///
/// # Arguments
/// * `raw` - Raw subprocess stdout
///
/// # Returns
/// * `Vec<String>` - Final candidate list
pub fn normalize_candidates(raw: &str) -> Vec<String> {
    let mut candidates: Vec<String> = raw
        .split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    candidates.sort_unstable();
    candidates.dedup();
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BashcompError, InvokeError, ResolveError};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Invoker stand-in replaying queued responses and recording scripts
    struct ReplayInvoker {
        responses: Mutex<VecDeque<Result<String>>>,
        scripts: Mutex<Vec<String>>,
    }

    impl ReplayInvoker {
        fn new(responses: Vec<Result<String>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                scripts: Mutex::new(Vec::new()),
            })
        }

        fn recorded_scripts(&self) -> Vec<String> {
            self.scripts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ShellInvoker for ReplayInvoker {
        async fn invoke(&self, script: &str, _cancel: &CancellationToken) -> Result<String> {
            self.scripts.lock().unwrap().push(script.to_string());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(String::new()))
        }
    }

    fn test_engine(invoker: Arc<ReplayInvoker>) -> CompletionEngine {
        CompletionEngine::new(
            invoker,
            ScriptBuilder::new("/usr/share/bash-completion/bash_completion", true),
        )
    }

    #[tokio::test]
    async fn test_complete_returns_sorted_deduped_candidates() {
        let invoker = ReplayInvoker::new(vec![
            Ok("complete -F _git git\n".to_string()),
            Ok("checkout\ncherry\ncheckout\n".to_string()),
        ]);
        let engine = test_engine(invoker.clone());

        let line = CommandLine::parse("git ch");
        let candidates = engine
            .complete("git", "ch", &line, 6, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(candidates, vec!["checkout", "cherry"]);
        assert_eq!(invoker.recorded_scripts().len(), 2);
    }

    #[tokio::test]
    async fn test_complete_builds_expected_environment() {
        let invoker = ReplayInvoker::new(vec![
            Ok("complete -F _longopt ls\n".to_string()),
            Ok(String::new()),
        ]);
        let engine = test_engine(invoker.clone());

        let line = CommandLine::parse("ls -a");
        engine
            .complete("ls", "-a", &line, 5, &CancellationToken::new())
            .await
            .unwrap();

        let scripts = invoker.recorded_scripts();
        let completion = &scripts[1];
        assert!(completion.contains("COMP_LINE='ls -a'; "));
        assert!(completion.contains("COMP_WORDS=('ls' '-a'); "));
        assert!(completion.contains("COMP_CWORD=1; "));
        assert!(completion.contains("COMP_POINT=5; "));
        assert!(completion.contains("_longopt 'ls' '-a' 'ls' 2>/dev/null; "));
    }

    #[tokio::test]
    async fn test_complete_hanging_cursor_appends_empty_word() {
        let invoker = ReplayInvoker::new(vec![
            Ok("complete -F _longopt ls\n".to_string()),
            Ok(String::new()),
        ]);
        let engine = test_engine(invoker.clone());

        // "ls " with the cursor after the trailing space
        let line = CommandLine::parse("ls ");
        engine
            .complete("ls", "", &line, 3, &CancellationToken::new())
            .await
            .unwrap();

        let scripts = invoker.recorded_scripts();
        let completion = &scripts[1];
        assert!(completion.contains("COMP_LINE='ls '; "));
        assert!(completion.contains("COMP_WORDS=('ls' ''); "));
        assert!(completion.contains("COMP_CWORD=1; "));
        assert!(completion.contains("COMP_POINT=3; "));
        // The previous word is the command itself
        assert!(completion.contains("_longopt 'ls' '' 'ls' 2>/dev/null; "));
    }

    #[tokio::test]
    async fn test_complete_without_completer_skips_invocation() {
        let invoker = ReplayInvoker::new(vec![Ok(String::new())]);
        let engine = test_engine(invoker.clone());

        let line = CommandLine::parse("mycmd --fl");
        let candidates = engine
            .complete("mycmd", "--fl", &line, 10, &CancellationToken::new())
            .await
            .unwrap();

        assert!(candidates.is_empty());
        // Only the resolution script ran
        assert_eq!(invoker.recorded_scripts().len(), 1);
    }

    #[tokio::test]
    async fn test_complete_invocation_failure_degrades_to_empty() {
        let invoker = ReplayInvoker::new(vec![
            Ok("complete -F _git git\n".to_string()),
            Err(BashcompError::Invoke(InvokeError::Timeout(2000))),
        ]);
        let engine = test_engine(invoker);

        let line = CommandLine::parse("git ch");
        let candidates = engine
            .complete("git", "ch", &line, 6, &CancellationToken::new())
            .await
            .unwrap();

        assert!(candidates.is_empty());
    }

    #[tokio::test]
    async fn test_complete_cursor_word_index_zero_yields_no_candidates() {
        let invoker = ReplayInvoker::new(vec![Ok("complete -F _git git\n".to_string())]);
        let engine = test_engine(invoker.clone());

        // Single element with the cursor at its end and no shift applied:
        // the current word is the command name, there is no previous word
        let line = CommandLine::parse("git");
        let candidates = engine
            .complete("git", "git", &line, 3, &CancellationToken::new())
            .await
            .unwrap();

        assert!(candidates.is_empty());
        assert_eq!(invoker.recorded_scripts().len(), 1);
    }

    #[tokio::test]
    async fn test_complete_empty_command_is_an_error() {
        let invoker = ReplayInvoker::new(vec![]);
        let engine = test_engine(invoker);

        let line = CommandLine::parse("");
        let result = engine
            .complete("", "", &line, 0, &CancellationToken::new())
            .await;
        assert!(matches!(
            result,
            Err(BashcompError::Resolve(ResolveError::EmptyCommandName))
        ));
    }

    #[test]
    fn test_normalize_dedups_and_sorts() {
        assert_eq!(
            normalize_candidates("beta\nalpha\nbeta\n"),
            vec!["alpha", "beta"]
        );
    }

    #[test]
    fn test_normalize_is_order_independent() {
        let a = normalize_candidates("x\ny\nx\n");
        let b = normalize_candidates("y\nx\nx\n");
        assert_eq!(a, b);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_candidates("b\na\n");
        let twice = normalize_candidates(&once.join("\n"));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_drops_blank_lines() {
        assert_eq!(normalize_candidates("\n"), Vec::<String>::new());
        assert_eq!(normalize_candidates(""), Vec::<String>::new());
        assert_eq!(normalize_candidates("a\n\nb\n"), vec!["a", "b"]);
    }

    #[test]
    fn test_normalize_sorts_ordinally() {
        // Byte order: uppercase before lowercase
        assert_eq!(
            normalize_candidates("apple\nBanana\n"),
            vec!["Banana", "apple"]
        );
    }

    #[test]
    fn test_normalize_preserves_inner_whitespace() {
        assert_eq!(
            normalize_candidates("show tables\nshow dbs\n"),
            vec!["show dbs", "show tables"]
        );
    }
}
