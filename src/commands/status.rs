use anyhow::Result;
use serde::Serialize;

use crate::git::GitRunner;
use crate::style::{Decorations, Tone};

/// Branch shown when HEAD is unborn and git cannot name the branch.
pub const UNBORN_BRANCH: &str = "main (no commits yet)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Modified,
    Added,
    Deleted,
    Untracked,
    Other,
}

impl ChangeKind {
    /// Classifies one line of `git status --short` by its two-column prefix.
    pub fn classify(line: &str) -> Self {
        if line.starts_with("M ") || line.starts_with(" M") {
            ChangeKind::Modified
        } else if line.starts_with("A ") {
            ChangeKind::Added
        } else if line.starts_with("D ") {
            ChangeKind::Deleted
        } else if line.starts_with("??") {
            ChangeKind::Untracked
        } else {
            ChangeKind::Other
        }
    }

    fn decoration(self) -> Option<(&'static str, &'static str, Tone)> {
        match self {
            ChangeKind::Modified => Some(("📝", "Modified:", Tone::Warn)),
            ChangeKind::Added => Some(("➕", "Added:", Tone::Success)),
            ChangeKind::Deleted => Some(("➖", "Deleted:", Tone::Error)),
            ChangeKind::Untracked => Some(("❓", "Untracked:", Tone::Info)),
            ChangeKind::Other => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusEntry {
    pub kind: ChangeKind,
    pub line: String,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StatusResult {
    Ok {
        branch: String,
        clean: bool,
        entries: Vec<StatusEntry>,
    },
    NotARepository {
        code: i32,
    },
    StatusFailed {
        branch: String,
        code: i32,
    },
}

impl StatusResult {
    pub fn exit_code(&self) -> i32 {
        match self {
            StatusResult::Ok { .. } => 0,
            StatusResult::NotARepository { code } | StatusResult::StatusFailed { code, .. } => {
                *code
            }
        }
    }
}

pub fn parse_short_status(output: &str) -> Vec<StatusEntry> {
    output
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| StatusEntry {
            kind: ChangeKind::classify(line),
            line: line.to_string(),
        })
        .collect()
}

pub fn cmd_status(git: &dyn GitRunner) -> Result<StatusResult> {
    let branch = match current_branch(git)? {
        Ok(branch) => branch,
        Err(code) => return Ok(StatusResult::NotARepository { code }),
    };

    let status = git.capture(&["status", "--short"])?;
    if !status.success() {
        log::debug!("status --short failed: {}", status.stderr.trim());
        return Ok(StatusResult::StatusFailed {
            branch,
            code: status.code,
        });
    }

    let entries = parse_short_status(&status.stdout);
    Ok(StatusResult::Ok {
        branch,
        clean: entries.is_empty(),
        entries,
    })
}

/// Outer error: git could not be run. Inner error: neither lookup worked,
/// carrying the last exit code.
fn current_branch(git: &dyn GitRunner) -> Result<std::result::Result<String, i32>> {
    let head = git.capture(&["rev-parse", "--abbrev-ref", "HEAD"])?;
    if head.success() {
        return Ok(Ok(head.stdout.trim().to_string()));
    }

    // unborn HEAD
    let show = git.capture(&["branch", "--show-current"])?;
    if !show.success() {
        return Ok(Err(show.code));
    }
    let branch = show.stdout.trim();
    if branch.is_empty() {
        Ok(Ok(UNBORN_BRANCH.to_string()))
    } else {
        Ok(Ok(branch.to_string()))
    }
}

pub fn format_status_human(result: &StatusResult, deco: &Decorations) -> String {
    let mut lines = vec![
        deco.paint(
            deco.label("✨ Repository Status", "Repository Status"),
            Tone::Heading,
        ),
        String::new(),
    ];

    let branch = match result {
        StatusResult::NotARepository { .. } => {
            lines.push(deco.paint(
                deco.label("❌ Not a git repository", "Not a git repository"),
                Tone::Error,
            ));
            return lines.join("\n");
        }
        StatusResult::Ok { branch, .. } | StatusResult::StatusFailed { branch, .. } => branch,
    };
    lines.push(format!(
        "{}{}",
        deco.paint(deco.label("📍 Branch: ", "Branch: "), Tone::Heading),
        branch
    ));
    lines.push(String::new());

    match result {
        StatusResult::Ok { clean: true, .. } => {
            lines.push(deco.paint(
                deco.label("✅ Working tree clean - good vibes!", "Working tree clean"),
                Tone::Success,
            ));
        }
        StatusResult::Ok { entries, .. } => {
            lines.extend(entries.iter().map(|entry| format_entry(entry, deco)));
        }
        StatusResult::StatusFailed { .. } | StatusResult::NotARepository { .. } => {
            lines.push(deco.paint(
                deco.label("❌ Error getting status", "Error getting status"),
                Tone::Error,
            ));
        }
    }

    lines.join("\n")
}

fn format_entry(entry: &StatusEntry, deco: &Decorations) -> String {
    match entry.kind.decoration() {
        Some((emoji, label, tone)) => {
            let marker = if deco.emoji { emoji } else { label };
            deco.paint(&format!("{} {}", marker, entry.line), tone)
        }
        None => entry.line.clone(),
    }
}
