//! Bash subprocess invocation for bashcomp
//!
//! This module owns the process boundary between the host and bash. Every
//! completion request funnels through [`ShellInvoker::invoke`]: run bash
//! non-interactively with a script argument, capture stdout, and hand the
//! raw text back. The invoker enforces the two properties the host's
//! interactive loop depends on:
//!
//! 1. A deadline: a hung completer function must not hang the prompt. The
//!    child is raced against a timeout and killed when it loses.
//! 2. Cancellation: the host can abandon an in-flight request (e.g. the
//!    user kept typing); the child is killed rather than orphaned.
//!
//! Non-zero exit status is not an error. Completion scripts routinely fail
//! half-way with their stderr suppressed, and whatever made it to stdout is
//! still the answer.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{InvokeError, Result};

/// Well-known bash locations, probed in order.
const BASH_LOCATIONS: &[&str] = &[
    "/bin/bash",
    "/usr/bin/bash",
    "/usr/local/bin/bash",
    "/opt/homebrew/bin/bash",
];

/// Trait for running a shell script and capturing its stdout
///
/// The completion engine and resolver depend on this seam instead of a
/// concrete process type so tests can substitute a scripted invoker.
#[async_trait]
pub trait ShellInvoker: Send + Sync {
    /// Run the interpreter with the given script, returning captured stdout
    ///
    /// # Arguments
    /// * `script` - Script text passed as the `-c` argument
    /// * `cancel` - Cancellation token honored while the child runs
    ///
    /// # Returns
    /// * `Result<String>` - Captured stdout, or an invocation error
    async fn invoke(&self, script: &str, cancel: &CancellationToken) -> Result<String>;
}

/// Shell invoker backed by a real bash process
#[derive(Debug, Clone)]
pub struct BashInvoker {
    /// Path to the bash binary
    bash_path: PathBuf,
    /// Deadline for a single invocation
    timeout: Duration,
}

impl BashInvoker {
    /// Create a new bash invoker
    ///
    /// # Arguments
    /// * `bash_path` - Path to the bash binary
    /// * `timeout` - Deadline for a single invocation
    ///
    /// # Returns
    /// * `Self` - New invoker
    pub fn new(bash_path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            bash_path: bash_path.into(),
            timeout,
        }
    }

    /// Get the bash binary path
    pub fn bash_path(&self) -> &Path {
        &self.bash_path
    }

    /// Get the invocation deadline
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl ShellInvoker for BashInvoker {
    async fn invoke(&self, script: &str, cancel: &CancellationToken) -> Result<String> {
        debug!(script_len = script.len(), "invoking bash");

        // -l -i -c: login + interactive so the user's dotfiles load and the
        // programmable-completion machinery (complete, bind) is available.
        let child = Command::new(&self.bash_path)
            .args(["-lic", script])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| InvokeError::Spawn(e.to_string()))?;

        // Race the child against the deadline and the host's cancellation.
        // Losing branches drop the output future, and kill_on_drop reaps
        // the child.
        tokio::select! {
            result = child.wait_with_output() => {
                let output = result.map_err(|e| InvokeError::Spawn(e.to_string()))?;
                Ok(String::from_utf8_lossy(&output.stdout).into_owned())
            }
            _ = tokio::time::sleep(self.timeout) => {
                Err(InvokeError::Timeout(self.timeout.as_millis() as u64).into())
            }
            _ = cancel.cancelled() => {
                Err(InvokeError::Cancelled.into())
            }
        }
    }
}

/// Locate the bash binary
///
/// The `BASHCOMP_BASH` environment variable wins; otherwise well-known
/// locations are probed in order.
///
/// # Returns
/// * `Option<PathBuf>` - Path to bash, or None when nothing was found
pub fn locate_bash() -> Option<PathBuf> {
    if let Ok(overridden) = std::env::var("BASHCOMP_BASH") {
        let path = PathBuf::from(overridden);
        if path.exists() {
            return Some(path);
        }
    }

    BASH_LOCATIONS
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BashcompError;

    #[test]
    fn test_invoker_accessors() {
        let invoker = BashInvoker::new("/bin/bash", Duration::from_millis(1500));
        assert_eq!(invoker.bash_path(), Path::new("/bin/bash"));
        assert_eq!(invoker.timeout(), Duration::from_millis(1500));
    }

    #[tokio::test]
    async fn test_invoke_captures_stdout() {
        let Some(bash) = locate_bash() else {
            return; // no bash on this machine, nothing to exercise
        };

        let invoker = BashInvoker::new(bash, Duration::from_secs(10));
        let output = invoker
            .invoke("printf 'one\\ntwo\\n'", &CancellationToken::new())
            .await
            .unwrap();
        // Login shells may print profile noise first; the script output ends the stream
        assert!(output.ends_with("one\ntwo\n"));
    }

    #[tokio::test]
    async fn test_invoke_nonzero_exit_still_returns_stdout() {
        let Some(bash) = locate_bash() else {
            return;
        };

        let invoker = BashInvoker::new(bash, Duration::from_secs(10));
        let output = invoker
            .invoke("printf 'partial'; exit 3", &CancellationToken::new())
            .await
            .unwrap();
        assert!(output.ends_with("partial"));
    }

    #[tokio::test]
    async fn test_invoke_times_out() {
        let Some(bash) = locate_bash() else {
            return;
        };

        let invoker = BashInvoker::new(bash, Duration::from_millis(100));
        let result = invoker.invoke("sleep 10", &CancellationToken::new()).await;
        assert!(matches!(
            result,
            Err(BashcompError::Invoke(InvokeError::Timeout(_)))
        ));
    }

    #[tokio::test]
    async fn test_invoke_honors_cancellation() {
        let Some(bash) = locate_bash() else {
            return;
        };

        let invoker = BashInvoker::new(bash, Duration::from_secs(10));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = invoker.invoke("sleep 10", &cancel).await;
        assert!(matches!(
            result,
            Err(BashcompError::Invoke(InvokeError::Cancelled))
        ));
    }

    #[tokio::test]
    async fn test_spawn_failure_is_an_error() {
        let invoker = BashInvoker::new("/nonexistent/bash", Duration::from_secs(1));
        let result = invoker.invoke("true", &CancellationToken::new()).await;
        assert!(matches!(
            result,
            Err(BashcompError::Invoke(InvokeError::Spawn(_)))
        ));
    }
}
