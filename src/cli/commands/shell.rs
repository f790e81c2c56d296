//! Shell integration commands.

use crate::error::PomoError;
use crate::features::shell::{completion_install_instructions, generate_completions, shell_from_str};

/// Print a completion script, or how to install one.
///
/// # Errors
///
/// Returns `PomoError::InvalidInput` for an unsupported shell.
pub fn completions(shell: &str, install: bool) -> Result<String, PomoError> {
    let shell_type = shell_from_str(shell).ok_or_else(|| {
        PomoError::InvalidInput(format!(
            "Unknown shell: {shell}. Supported: bash, zsh, fish, powershell, elvish"
        ))
    })?;

    if install {
        Ok(completion_install_instructions(shell_type))
    } else {
        generate_completions(shell_type)
    }
}
