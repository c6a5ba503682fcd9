//! External command execution (`uv`, `gh`, `git`).

use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use log::debug;

use crate::error::{Error, Result};

/// Captured result of one command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Trimmed stderr, or stdout when stderr is empty.
    pub fn message(&self) -> String {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            self.stdout.trim().to_string()
        } else {
            stderr.to_string()
        }
    }
}

/// Runs external programs.
pub trait CommandRunner {
    /// Runs `program` with `args` and waits for it.
    ///
    /// # Arguments
    /// * `program` - Executable looked up on `PATH`
    /// * `args` - Arguments
    /// * `cwd` - Working directory, or the current one
    /// * `stdin` - Text written to the child's stdin
    ///
    /// # Errors
    /// * `Error::ToolMissing` if `program` is not installed
    /// * `Error::IoError` for any other spawn failure
    fn run(
        &self,
        program: &str,
        args: &[&str],
        cwd: Option<&Path>,
        stdin: Option<&str>,
    ) -> Result<CommandOutput>;
}

/// Install hint shown when `program` is missing.
pub fn install_hint(program: &str) -> String {
    match program {
        "uv" => "Install it from https://docs.astral.sh/uv/".to_string(),
        "gh" => "Install it from https://cli.github.com/".to_string(),
        "git" => "Install it from https://git-scm.com/".to_string(),
        other => format!("Install {other} and make sure it is on PATH."),
    }
}

/// Runs commands on the host system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        cwd: Option<&Path>,
        stdin: Option<&str>,
    ) -> Result<CommandOutput> {
        debug!("Running {program} {}", args.join(" "));
        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = cwd {
            command.current_dir(dir);
        }

        let mut child = command.spawn().map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::ToolMissing {
                tool: program.to_string(),
                hint: install_hint(program),
            },
            _ => Error::IoError(e),
        })?;

        if let (Some(input), Some(mut pipe)) = (stdin, child.stdin.take()) {
            pipe.write_all(input.as_bytes())?;
        }

        let output = child.wait_with_output()?;
        debug!("{program} exited with {}", output.status);
        Ok(CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
