//! Completer-function resolution with per-command memoization
//!
//! Bash registers one completer function per command (`complete -F _git
//! git`). Discovering that binding costs a subprocess, so the resolver
//! caches the answer per command name for the lifetime of the engine: at
//! most one resolution spawn per distinct name, zero on every later
//! request. A failed or empty resolution is cached too, as an empty string
//! meaning "no completer known": retrying a command with no completion
//! definition would burn a subprocess per keypress.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::script::ScriptBuilder;
use crate::error::{ResolveError, Result};
use crate::invoker::ShellInvoker;

/// Resolves and memoizes the bash completer function per command name
pub struct CompleterResolver {
    /// Invoker used for resolution subprocess calls
    invoker: Arc<dyn ShellInvoker>,
    /// Script renderer
    scripts: ScriptBuilder,
    /// Command name -> completer function name ("" when none is known).
    /// Grows monotonically; concurrent misses for one name may both spawn
    /// and last-write-wins with identical values.
    cache: Mutex<HashMap<String, String>>,
}

impl CompleterResolver {
    /// Create a new resolver
    ///
    /// # Arguments
    /// * `invoker` - Shell invoker for resolution calls
    /// * `scripts` - Script renderer
    ///
    /// # Returns
    /// * `Self` - New resolver with an empty cache
    pub fn new(invoker: Arc<dyn ShellInvoker>, scripts: ScriptBuilder) -> Self {
        Self {
            invoker,
            scripts,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Resolve the completer function registered for a command
    ///
    /// # Arguments
    /// * `command` - Command name; must be non-empty
    /// * `cancel` - Cancellation token for the resolution subprocess
    ///
    /// # Returns
    /// * `Result<String>` - Completer function name, empty when bash knows
    ///   no completer for the command
    pub async fn resolve(&self, command: &str, cancel: &CancellationToken) -> Result<String> {
        if command.is_empty() {
            return Err(ResolveError::EmptyCommandName.into());
        }

        if let Some(cached) = self.cache.lock().unwrap().get(command) {
            debug!(command, completer = %cached, "resolver cache hit");
            return Ok(cached.clone());
        }

        let script = self.scripts.resolver_script(command);
        let output = match self.invoker.invoke(&script, cancel).await {
            Ok(output) => output,
            Err(e) => {
                warn!(command, error = %e, "completer resolution failed");
                String::new()
            }
        };

        let completer = extract_completer_function(&output)
            .unwrap_or_default()
            .trim()
            .to_string();
        debug!(command, completer = %completer, "resolver cache fill");

        self.cache
            .lock()
            .unwrap()
            .insert(command.to_string(), completer.clone());

        Ok(completer)
    }

    /// Number of cached resolutions (including "no completer" entries)
    pub fn cached_len(&self) -> usize {
        self.cache.lock().unwrap().len()
    }
}

/// Extract the completer function name from `complete -p` output
///
/// Expected input shape: a line of the form
/// `complete [options] -F <function> <command>`, as printed by bash's
/// `complete -p <command>`. The first `complete` line carrying a `-F`
/// option wins. Registrations without a function (`-W`, `-C`, aliases) and
/// arbitrary other output yield `None`, which callers treat as "no
/// completer known".
///
/// # Arguments
/// * `output` - Raw `complete -p` stdout
///
/// # Returns
/// * `Option<String>` - Function name, or None when the shape doesn't match
pub fn extract_completer_function(output: &str) -> Option<String> {
    for line in output.lines() {
        let line = line.trim();
        if !line.starts_with("complete") {
            continue;
        }

        let mut tokens = line.split_whitespace();
        while let Some(token) = tokens.next() {
            if token == "-F" {
                if let Some(function) = tokens.next() {
                    return Some(function.to_string());
                }
            }
        }
    }

    None
}
