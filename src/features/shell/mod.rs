//! Shell integration: completion scripts for the `pomotrack` binary.

pub mod completions;

pub use completions::{completion_install_instructions, generate_completions, shell_from_str};
