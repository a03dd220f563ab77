//! Command-line interface for bashcomp
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Configuration loading and overrides
//! - Subcommand dispatch (version, one-shot completion, registry listing,
//!   shell-completion generation)

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use nu_ansi_term::Color;
use tokio_util::sync::CancellationToken;

use crate::completion::{BashPredictor, CompletionEngine, Predictor, ScriptBuilder, registry};
use crate::config::Config;
use crate::error::{ConfigError, Result};
use crate::invoker::{BashInvoker, locate_bash};
use crate::parser::PredictionContext;

pub mod completion;

/// Bash completion bridge - bash-native Tab completion for Rust line editors
#[derive(Parser, Debug)]
#[command(
    name = "bashcomp",
    version,
    about = "Bridge bash's programmable completion into Rust line editors",
    long_about = "Reuses the completion functions bash already ships for native
utilities: the bridge asks bash which function completes a command, rebuilds
bash's completion environment for the current line, and turns the function's
output into candidates for the host line editor."
)]
pub struct CliArgs {
    /// Path to the bash binary
    #[arg(long, value_name = "PATH")]
    pub bash: Option<PathBuf>,

    /// Deadline for a single bash invocation, in milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout: Option<u64>,

    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Quiet mode (no banner)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose mode (detailed logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Very verbose mode (debug logging)
    #[arg(long = "vv")]
    pub very_verbose: bool,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands for bashcomp
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show version information
    Version,

    /// Complete a command line once and print the candidates
    Complete {
        /// Command line text to complete
        #[arg(value_name = "LINE")]
        line: String,

        /// Cursor position (byte offset); defaults to the end of the line
        #[arg(long, value_name = "OFFSET")]
        cursor: Option<usize>,

        /// Print candidates as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// List the native utilities the bridge answers for
    Commands,

    /// Generate shell completion script for bashcomp itself
    Completion {
        /// Shell type (bash, zsh, fish)
        #[arg(value_name = "SHELL")]
        shell: String,
    },
}

/// CLI interface combining parsed arguments and loaded configuration
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Effective configuration (file values with CLI overrides applied)
    config: Config,
}

impl CliInterface {
    /// Parse arguments and load configuration
    ///
    /// # Returns
    /// * `Result<Self>` - New CLI interface or error
    pub fn new() -> Result<Self> {
        let args = CliArgs::parse();
        Self::with_args(args)
    }

    /// Build an interface from pre-parsed arguments
    ///
    /// # Arguments
    /// * `args` - Parsed arguments
    ///
    /// # Returns
    /// * `Result<Self>` - New CLI interface or error
    pub fn with_args(args: CliArgs) -> Result<Self> {
        let mut config = match &args.config_file {
            Some(path) => Config::from_file(path)?,
            None => Config::load_or_default()?,
        };

        // Command-line arguments take precedence over the config file
        if let Some(bash) = &args.bash {
            config.bash.path = Some(bash.clone());
        }
        if let Some(timeout) = args.timeout {
            config.completion.timeout_ms = timeout;
        }

        config.validate()?;
        Ok(Self { args, config })
    }

    /// Get the effective configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the parsed arguments
    pub fn args(&self) -> &CliArgs {
        &self.args
    }

    /// Handle subcommands
    ///
    /// # Returns
    /// * `Result<bool>` - True when a subcommand was handled and the
    ///   process should exit
    pub async fn handle_subcommand(&self) -> Result<bool> {
        match &self.args.command {
            Some(Commands::Version) => {
                println!("bashcomp {}", env!("CARGO_PKG_VERSION"));
                Ok(true)
            }
            Some(Commands::Complete { line, cursor, json }) => {
                self.run_one_shot(line, *cursor, *json).await?;
                Ok(true)
            }
            Some(Commands::Commands) => {
                for name in registry::known_utils() {
                    println!("{name}");
                }
                Ok(true)
            }
            Some(Commands::Completion { shell }) => {
                completion::generate_completion(shell)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Run a single completion request and print the candidates
    async fn run_one_shot(&self, line: &str, cursor: Option<usize>, json: bool) -> Result<()> {
        let predictor = build_predictor(&self.config)?;
        let context = PredictionContext::new(line, cursor.unwrap_or(line.len()));

        let candidates = predictor
            .suggest(&context, &CancellationToken::new())
            .await
            .unwrap_or_default();

        if json {
            let rendered = serde_json::to_string(&candidates)
                .map_err(|e| ConfigError::Generic(format!("JSON encoding failed: {e}")))?;
            println!("{rendered}");
        } else {
            for candidate in candidates {
                println!("{candidate}");
            }
        }

        Ok(())
    }

    /// Print the startup banner unless in quiet mode
    pub fn print_banner(&self) {
        if self.args.quiet {
            return;
        }

        let name = if self.args.no_color {
            "bashcomp".to_string()
        } else {
            Color::Green.bold().paint("bashcomp").to_string()
        };

        println!("{} {}", name, env!("CARGO_PKG_VERSION"));
        println!("Tab completes through bash; type 'exit' to leave.");
    }
}

/// Resolve the bash binary path from configuration
///
/// # Arguments
/// * `config` - Effective configuration
///
/// # Returns
/// * `Result<PathBuf>` - Bash path, or a configuration error when no bash
///   could be located
pub fn resolve_bash_path(config: &Config) -> Result<PathBuf> {
    config
        .bash
        .path
        .clone()
        .or_else(locate_bash)
        .ok_or_else(|| {
            ConfigError::Generic(
                "bash binary not found; set bash.path in the config, --bash, or BASHCOMP_BASH"
                    .to_string(),
            )
            .into()
        })
}

/// Build a bash predictor from configuration
///
/// # Arguments
/// * `config` - Effective configuration
///
/// # Returns
/// * `Result<Arc<BashPredictor>>` - Wired predictor or error
pub fn build_predictor(config: &Config) -> Result<Arc<BashPredictor>> {
    let bash_path = resolve_bash_path(config)?;
    let invoker = Arc::new(BashInvoker::new(bash_path, config.completion_timeout()));
    let scripts = ScriptBuilder::new(&config.bash.init_script, config.completion.ignore_case);
    Ok(Arc::new(BashPredictor::new(CompletionEngine::new(
        invoker, scripts,
    ))))
}
