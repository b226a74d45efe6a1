//! Child processes: editor, ssh client, git and the clipboard helper.
//!
//! Commands go through [`ProcessRunner`] so the launcher, note editor and
//! sync code can be exercised without spawning real programs.

use anyhow::{bail, Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// A single external program invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    /// Text fed to the child's stdin
    pub stdin: Option<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            stdin: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.cwd = Some(dir.to_path_buf());
        self
    }

    pub fn stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }
        cmd
    }
}

pub trait ProcessRunner {
    /// Runs in the foreground with inherited stdio and waits for exit.
    /// Returns whether the program exited successfully.
    fn run(&self, invocation: &Invocation) -> Result<bool>;

    /// Runs to completion and returns stdout. A non-zero exit is an error.
    fn capture(&self, invocation: &Invocation) -> Result<String>;

    /// Starts the program and forgets about it: never waits, never reports failure.
    fn launch_detached(&self, invocation: &Invocation);
}

/// Runs real programs via `std::process::Command`
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<bool> {
        tracing::debug!(program = %invocation.program, args = ?invocation.args, "running");
        let status = invocation
            .command()
            .status()
            .with_context(|| format!("Failed to start {}. Is it installed and in PATH?", invocation.program))?;
        Ok(status.success())
    }

    fn capture(&self, invocation: &Invocation) -> Result<String> {
        tracing::debug!(program = %invocation.program, args = ?invocation.args, "capturing");
        let output = invocation
            .command()
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("Failed to start {}. Is it installed and in PATH?", invocation.program))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "{} {} failed: {}",
                invocation.program,
                invocation.args.join(" "),
                stderr.trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn launch_detached(&self, invocation: &Invocation) {
        let mut cmd = invocation.command();
        cmd.stdout(Stdio::null()).stderr(Stdio::null());
        cmd.stdin(if invocation.stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        });

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                tracing::debug!(program = %invocation.program, error = %e, "detached launch failed");
                return;
            }
        };

        if let (Some(input), Some(mut pipe)) = (&invocation.stdin, child.stdin.take()) {
            let _ = pipe.write_all(input.as_bytes());
            // Dropping the pipe closes stdin so the helper can finish on its own
        }
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::cell::RefCell;

    /// Records invocations instead of running them
    #[derive(Default)]
    pub struct RecordingRunner {
        pub calls: RefCell<Vec<Invocation>>,
        pub detached: RefCell<Vec<Invocation>>,
        /// Returned by `capture`
        pub captured: String,
        /// `run` reports failure when the program or its first argument matches
        pub fail_on: Option<&'static str>,
    }

    impl RecordingRunner {
        pub fn programs(&self) -> Vec<String> {
            self.calls.borrow().iter().map(|c| c.program.clone()).collect()
        }

        pub fn command_lines(&self) -> Vec<String> {
            self.calls
                .borrow()
                .iter()
                .map(|c| format!("{} {}", c.program, c.args.join(" ")))
                .collect()
        }
    }

    impl ProcessRunner for RecordingRunner {
        fn run(&self, invocation: &Invocation) -> Result<bool> {
            self.calls.borrow_mut().push(invocation.clone());
            let failed = self.fail_on.is_some_and(|name| {
                invocation.program == name || invocation.args.first().is_some_and(|a| a == name)
            });
            Ok(!failed)
        }

        fn capture(&self, invocation: &Invocation) -> Result<String> {
            self.calls.borrow_mut().push(invocation.clone());
            Ok(self.captured.clone())
        }

        fn launch_detached(&self, invocation: &Invocation) {
            self.detached.borrow_mut().push(invocation.clone());
        }
    }
}
