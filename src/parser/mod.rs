//! Host-side command-line parsing for bashcomp
//!
//! This module is the crate's stand-in for the host shell's parser. It
//! produces the representation the completion engine consumes:
//!
//! - **CommandLine**: the raw input plus its ordered command elements, each
//!   carrying a byte span into the input
//! - **PredictionContext**: a cursor-aware view over a `CommandLine` that
//!   knows the word under the cursor and where a completion should be
//!   spliced into the line
//!
//! Splitting is whitespace-based on purpose: it mirrors how bash itself
//! counts `COMP_WORDS` for the default `COMP_WORDBREAKS`-free case, which
//! is what keeps the engine's word indices aligned with what a completer
//! function expects.

mod command_line;
mod context;

pub use command_line::{CommandElement, CommandLine};
pub use context::PredictionContext;
