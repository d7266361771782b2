use anyhow::Result;
use std::ffi::OsString;
use std::io::Write;

use crate::git::{argv, GitRunner};
use crate::style::{Decorations, Tone};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncKind {
    Push,
    Pull,
}

impl SyncKind {
    fn verb(self) -> &'static str {
        match self {
            SyncKind::Push => "push",
            SyncKind::Pull => "pull",
        }
    }

    fn start_banner(self) -> (&'static str, &'static str) {
        match self {
            SyncKind::Push => ("🚀 Pushing changes...", "Pushing changes..."),
            SyncKind::Pull => ("⬇️  Pulling changes...", "Pulling changes..."),
        }
    }

    fn done_banner(self) -> (&'static str, &'static str) {
        match self {
            SyncKind::Push => ("✅ Push complete!", "Push complete!"),
            SyncKind::Pull => ("✅ Pull complete!", "Pull complete!"),
        }
    }
}

/// Runs `git push|pull ARGS` between two banners. The closing banner is only
/// printed when git succeeded.
pub fn cmd_sync(
    kind: SyncKind,
    deco: &Decorations,
    git: &dyn GitRunner,
    out: &mut dyn Write,
    args: &[OsString],
) -> Result<i32> {
    let (fancy, plain) = kind.start_banner();
    writeln!(out, "{}", deco.paint_bold(deco.label(fancy, plain), Tone::Heading))?;
    writeln!(out)?;
    // git writes straight to the inherited fd
    out.flush()?;

    let code = git.stream(&argv(&[kind.verb()], args))?;
    if code != 0 {
        return Ok(code);
    }

    let (fancy, plain) = kind.done_banner();
    writeln!(out)?;
    writeln!(out, "{}", deco.paint_bold(deco.label(fancy, plain), Tone::Success))?;
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{has_ansi, has_emoji, os, strings, RecordingGit};

    fn run(kind: SyncKind, git: &RecordingGit, args: &[&str]) -> (i32, String) {
        let mut out = Vec::new();
        let code = cmd_sync(kind, &Decorations::plain(), git, &mut out, &os(args)).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn push_forwards_args_and_prints_banners() {
        let git = RecordingGit::new();
        let (code, text) = run(SyncKind::Push, &git, &["--force-with-lease", "origin", "main"]);
        assert_eq!(code, 0);
        assert_eq!(
            git.calls(),
            vec![strings(&["push", "--force-with-lease", "origin", "main"])]
        );
        assert_eq!(text, "Pushing changes...\n\n\nPush complete!\n");
    }

    #[test]
    fn pull_forwards_args_and_prints_banners() {
        let git = RecordingGit::new();
        let (code, text) = run(SyncKind::Pull, &git, &["--rebase"]);
        assert_eq!(code, 0);
        assert_eq!(git.calls(), vec![strings(&["pull", "--rebase"])]);
        assert_eq!(text, "Pulling changes...\n\n\nPull complete!\n");
    }

    #[test]
    fn failed_push_skips_completion_and_keeps_code() {
        let git = RecordingGit::new().stream_exits(1);
        let (code, text) = run(SyncKind::Push, &git, &[]);
        assert_eq!(code, 1);
        assert!(!text.contains("complete"));
        assert!(text.contains("Pushing changes..."));
    }

    #[test]
    fn plain_output_has_no_decoration() {
        let git = RecordingGit::new();
        let (_, text) = run(SyncKind::Pull, &git, &[]);
        assert!(!has_ansi(&text));
        assert!(!has_emoji(&text));
    }

    #[test]
    fn emoji_banners_when_decorated() {
        let git = RecordingGit::new();
        let deco = Decorations {
            color: false,
            emoji: true,
        };
        let mut out = Vec::new();
        cmd_sync(SyncKind::Push, &deco, &git, &mut out, &[]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("🚀 Pushing changes..."));
        assert!(text.ends_with("✅ Push complete!\n"));
    }

    #[test]
    fn spawn_failure_is_error() {
        let git = RecordingGit::new().unspawnable();
        let mut out = Vec::new();
        let result = cmd_sync(SyncKind::Pull, &Decorations::plain(), &git, &mut out, &[]);
        assert!(result.is_err());
    }
}
