//! Shell completion generation for bashcomp itself
//!
//! The bridge's own CLI gets completions the ordinary way: static scripts
//! generated by clap_complete for bash, zsh, and fish.

use clap::CommandFactory;
use clap_complete::{Shell, generate};
use std::io;

use crate::cli::CliArgs;
use crate::error::{BashcompError, ConfigError, Result};

/// Generate a shell completion script on stdout
///
/// # Arguments
/// * `shell_name` - Shell type (bash, zsh, fish)
///
/// # Returns
/// * `Result<()>` - Success or error
pub fn generate_completion(shell_name: &str) -> Result<()> {
    let shell = parse_shell(shell_name)?;
    let mut cmd = CliArgs::command();
    generate(shell, &mut cmd, "bashcomp", &mut io::stdout());
    Ok(())
}

/// Parse shell name string to Shell enum
fn parse_shell(shell_name: &str) -> Result<Shell> {
    match shell_name.to_lowercase().as_str() {
        "bash" => Ok(Shell::Bash),
        "zsh" => Ok(Shell::Zsh),
        "fish" => Ok(Shell::Fish),
        _ => Err(BashcompError::Config(ConfigError::Generic(format!(
            "Unsupported shell: {shell_name}. Supported shells: bash, zsh, fish"
        )))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shell() {
        assert!(matches!(parse_shell("bash"), Ok(Shell::Bash)));
        assert!(matches!(parse_shell("zsh"), Ok(Shell::Zsh)));
        assert!(matches!(parse_shell("fish"), Ok(Shell::Fish)));
        assert!(parse_shell("invalid").is_err());
    }

    #[test]
    fn test_parse_shell_case_insensitive() {
        assert!(matches!(parse_shell("BASH"), Ok(Shell::Bash)));
        assert!(matches!(parse_shell("Zsh"), Ok(Shell::Zsh)));
        assert!(matches!(parse_shell("FiSh"), Ok(Shell::Fish)));
    }
}
