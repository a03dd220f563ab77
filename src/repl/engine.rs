//! REPL engine for the demo shell

use std::path::PathBuf;
use std::sync::Arc;

use reedline::{
    ColumnarMenu, Emacs, FileBackedHistory, KeyCode, KeyModifiers, MenuBuilder, Reedline,
    ReedlineEvent, ReedlineMenu, Signal, default_emacs_keybindings,
};
use tokio::process::Command;

use super::completer::BridgeCompleter;
use super::prompt::BridgePrompt;
use crate::completion::Predictor;
use crate::config::HistoryConfig;
use crate::error::{BashcompError, Result};

const COMPLETION_MENU: &str = "completion_menu";

/// Interactive shell loop with bridge-backed Tab completion
pub struct ReplEngine {
    /// Line editor
    editor: Reedline,

    /// Prompt
    prompt: BridgePrompt,

    /// Bash binary used to execute entered lines
    bash_path: PathBuf,

    /// Whether to continue running
    running: bool,
}

impl ReplEngine {
    /// Create a new REPL engine
    ///
    /// # Arguments
    /// * `predictor` - Predictor serving Tab completion
    /// * `bash_path` - Bash binary used to execute entered lines
    /// * `history_config` - History configuration
    ///
    /// # Returns
    /// * `Result<Self>` - New REPL engine or error
    pub fn new(
        predictor: Arc<dyn Predictor>,
        bash_path: PathBuf,
        history_config: &HistoryConfig,
    ) -> Result<Self> {
        let completer = Box::new(BridgeCompleter::new(predictor));
        let completion_menu = Box::new(ColumnarMenu::default().with_name(COMPLETION_MENU));

        let mut keybindings = default_emacs_keybindings();
        keybindings.add_binding(
            KeyModifiers::NONE,
            KeyCode::Tab,
            ReedlineEvent::UntilFound(vec![
                ReedlineEvent::Menu(COMPLETION_MENU.to_string()),
                ReedlineEvent::MenuNext,
            ]),
        );

        let mut editor = Reedline::create()
            .with_completer(completer)
            .with_menu(ReedlineMenu::EngineCompleter(completion_menu))
            .with_edit_mode(Box::new(Emacs::new(keybindings)));

        if history_config.persist {
            let history = FileBackedHistory::with_file(
                history_config.max_size,
                history_config.file_path.clone(),
            )
            .map_err(|e| BashcompError::Generic(format!("History setup failed: {e}")))?;
            editor = editor.with_history(Box::new(history));
        }

        Ok(Self {
            editor,
            prompt: BridgePrompt::new("bashcomp"),
            bash_path,
            running: true,
        })
    }

    /// Read a single line of input
    ///
    /// # Returns
    /// * `Result<Option<String>>` - Input line, or None on EOF
    pub fn read_line(&mut self) -> Result<Option<String>> {
        match self.editor.read_line(&self.prompt) {
            Ok(Signal::Success(line)) => Ok(Some(line)),
            Ok(Signal::CtrlC) => Ok(Some(String::new())),
            Ok(Signal::CtrlD) => Ok(None),
            Err(err) => Err(BashcompError::Generic(format!("Read error: {err}"))),
        }
    }

    /// Check if the REPL is still running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Run the interactive loop until EOF or an exit command
    ///
    /// # Returns
    /// * `Result<()>` - Success or error
    pub async fn run(&mut self) -> Result<()> {
        while self.running {
            let line = match self.read_line()? {
                Some(line) => line,
                None => break,
            };

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if trimmed == "exit" || trimmed == "quit" {
                self.running = false;
                break;
            }

            self.execute(trimmed).await;
        }

        Ok(())
    }

    /// Execute an entered line with bash, inheriting stdio
    async fn execute(&self, line: &str) {
        let status = Command::new(&self.bash_path)
            .args(["-lc", line])
            .status()
            .await;

        if let Err(err) = status {
            eprintln!("bash: {err}");
        }
    }
}
