#![cfg(test)]

use anyhow::{bail, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

use crate::git::{Captured, GitRunner, SystemGit};

/// A throwaway git repository with one empty commit.
pub struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let env = Self { dir };
        env.run(&["init", "-q"]);
        env.run(&["commit", "-q", "--allow-empty", "-m", "initial"]);
        env
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn git(&self) -> SystemGit {
        SystemGit::new("git").in_dir(self.path())
    }

    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path().join(name);
        std::fs::write(&path, contents).expect("failed to write file");
        path
    }

    pub fn run(&self, args: &[&str]) {
        let output = Command::new("git")
            .args(args)
            .current_dir(self.path())
            .env("GIT_AUTHOR_NAME", "Test")
            .env("GIT_AUTHOR_EMAIL", "test@test.com")
            .env("GIT_COMMITTER_NAME", "Test")
            .env("GIT_COMMITTER_EMAIL", "test@test.com")
            .output()
            .expect("failed to run git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

/// Records every argv it is handed and replays scripted results.
#[derive(Default)]
pub struct RecordingGit {
    calls: RefCell<Vec<Vec<String>>>,
    captures: HashMap<String, Captured>,
    stream_code: i32,
    fail_spawn: bool,
}

impl RecordingGit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the result of `capture(args)`; unscripted captures succeed
    /// with empty output.
    pub fn on(mut self, args: &[&str], code: i32, stdout: &str) -> Self {
        self.captures.insert(
            args.join(" "),
            Captured {
                code,
                stdout: stdout.to_string(),
                stderr: String::new(),
            },
        );
        self
    }

    pub fn stream_exits(mut self, code: i32) -> Self {
        self.stream_code = code;
        self
    }

    pub fn unspawnable(mut self) -> Self {
        self.fail_spawn = true;
        self
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().clone()
    }

    fn record(&self, args: Vec<String>) -> Result<()> {
        self.calls.borrow_mut().push(args);
        if self.fail_spawn {
            bail!("failed to run git: No such file or directory");
        }
        Ok(())
    }
}

impl GitRunner for RecordingGit {
    fn stream(&self, args: &[OsString]) -> Result<i32> {
        self.record(
            args.iter()
                .map(|a| a.to_string_lossy().into_owned())
                .collect(),
        )?;
        Ok(self.stream_code)
    }

    fn capture(&self, args: &[&str]) -> Result<Captured> {
        self.record(args.iter().map(|a| a.to_string()).collect())?;
        Ok(self
            .captures
            .get(&args.join(" "))
            .cloned()
            .unwrap_or(Captured {
                code: 0,
                stdout: String::new(),
                stderr: String::new(),
            }))
    }
}

pub fn strings(args: &[&str]) -> Vec<String> {
    args.iter().map(|a| a.to_string()).collect()
}

pub fn os(args: &[&str]) -> Vec<OsString> {
    args.iter().map(OsString::from).collect()
}

pub fn has_ansi(text: &str) -> bool {
    text.contains('\u{1b}')
}

/// True if any char falls in the emoji/symbol ranges used by the decorations.
pub fn has_emoji(text: &str) -> bool {
    text.chars()
        .any(|c| matches!(c as u32, 0x2190..=0x2BFF | 0x1F000..=0x1FAFF))
}
