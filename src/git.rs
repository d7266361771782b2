use anyhow::{Context, Result};
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};

/// Exit code used when git could not be started or died without reporting one.
pub const FALLBACK_EXIT_CODE: i32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captured {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl Captured {
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// The one seam between vibe and the wrapped tool. Handlers only ever talk to
/// git through this, so tests can substitute a recorder.
pub trait GitRunner {
    /// Runs git with inherited stdio and returns its exit code.
    fn stream(&self, args: &[OsString]) -> Result<i32>;

    /// Runs git with piped output and a null stdin.
    fn capture(&self, args: &[&str]) -> Result<Captured>;
}

pub struct SystemGit {
    program: PathBuf,
    dir: Option<PathBuf>,
}

impl SystemGit {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            dir: None,
        }
    }

    /// Runs git in `dir` instead of the process's working directory.
    #[cfg(test)]
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        if let Some(dir) = &self.dir {
            cmd.current_dir(dir);
        }
        cmd
    }
}

impl GitRunner for SystemGit {
    fn stream(&self, args: &[OsString]) -> Result<i32> {
        log::debug!("stream: {} {:?}", self.program.display(), args);
        let status = self
            .command()
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .with_context(|| format!("failed to run {} {:?}", self.program.display(), args))?;

        Ok(exit_code(status))
    }

    fn capture(&self, args: &[&str]) -> Result<Captured> {
        log::debug!("capture: {} {:?}", self.program.display(), args);
        let output = self
            .command()
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .with_context(|| format!("failed to run {} {:?}", self.program.display(), args))?;

        let captured = Captured {
            code: exit_code(output.status),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        log::debug!("capture: exit code {}", captured.code);
        Ok(captured)
    }
}

pub fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(FALLBACK_EXIT_CODE)
}

/// Builds `verb... rest...` as an owned argv.
pub fn argv<S: AsRef<OsStr>>(verb: &[&str], rest: &[S]) -> Vec<OsString> {
    verb.iter()
        .map(OsString::from)
        .chain(rest.iter().map(|a| a.as_ref().to_os_string()))
        .collect()
}
