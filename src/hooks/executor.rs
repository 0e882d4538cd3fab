use crate::error::{ReleaseError, Result};
use crate::hooks::{HookContext, HookSlot};
use crate::template;
use std::collections::HashMap;
use std::process::Command;

/// Captured result of one external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// External command boundary
///
/// The orchestrator only sees exit code and captured output; swapping
/// in a scripted fake makes hook behavior fully testable.
pub trait CommandRunner {
    /// Run a command, blocking until it exits
    fn run(&self, command: &str) -> Result<CommandOutput>;
}

/// Runs commands through `sh -c` with the current environment
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str) -> Result<CommandOutput> {
        let output = Command::new("sh").arg("-c").arg(command).output()?;

        Ok(CommandOutput {
            code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Executes configured lifecycle hook scripts
pub struct HookExecutor<'a> {
    runner: &'a dyn CommandRunner,
    scripts: &'a HashMap<String, String>,
}

impl<'a> HookExecutor<'a> {
    pub fn new(runner: &'a dyn CommandRunner, scripts: &'a HashMap<String, String>) -> Self {
        HookExecutor { runner, scripts }
    }

    /// Run the script configured for a slot, if any.
    ///
    /// The command template goes through placeholder substitution with
    /// the hook context before execution. A non-zero exit code fails
    /// with the command's output attached verbatim.
    ///
    /// # Returns
    /// * `Ok(Some(output))` - script ran and exited 0
    /// * `Ok(None)` - no script configured for this slot
    /// * `Err` - script failed to spawn or exited non-zero
    pub fn run_slot(&self, slot: HookSlot, ctx: &HookContext) -> Result<Option<CommandOutput>> {
        let Some(script) = self.scripts.get(slot.name()) else {
            return Ok(None);
        };

        let command = template::render(script, &ctx.to_vars());
        let output = self.runner.run(&command)?;

        if output.code != 0 {
            return Err(ReleaseError::Hook {
                name: slot.name().to_string(),
                code: output.code,
                stdout: output.stdout,
                stderr: output.stderr,
            });
        }

        Ok(Some(output))
    }
}
