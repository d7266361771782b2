use anyhow::Result;
use std::ffi::OsString;

use crate::git::{argv, GitRunner};

pub const LOG_FORMAT: &str =
    "--pretty=format:%C(yellow)%h%C(reset) - %C(cyan)%an%C(reset) %C(green)(%ar)%C(reset)%n  %s%n";

/// Forwards an invocation vibe does not know, argv untouched.
pub fn cmd_passthrough(git: &dyn GitRunner, args: &[OsString]) -> Result<i32> {
    git.stream(args)
}

pub fn cmd_commit(git: &dyn GitRunner, args: &[OsString]) -> Result<i32> {
    git.stream(&argv(&["commit"], args))
}

/// User arguments come after the injected format, so a later `--pretty` from
/// the user still wins.
pub fn cmd_log(git: &dyn GitRunner, args: &[OsString]) -> Result<i32> {
    git.stream(&argv(&["log", LOG_FORMAT, "--graph"], args))
}
