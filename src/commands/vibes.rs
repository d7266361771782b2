use anyhow::Result;
use serde::Serialize;

use crate::git::GitRunner;
use crate::style::{Decorations, Tone};

/// Repository overview. A field is `None` when its git query failed, and is
/// then left out of the human output.
#[derive(Debug, Default, Serialize)]
pub struct VibesResult {
    pub commits: Option<String>,
    pub contributors: Option<usize>,
    pub branch: Option<String>,
    pub clean: Option<bool>,
    #[serde(skip)]
    pub status_code: i32,
}

impl VibesResult {
    pub fn exit_code(&self) -> i32 {
        self.status_code
    }
}

pub fn cmd_vibes(git: &dyn GitRunner) -> Result<VibesResult> {
    let mut result = VibesResult::default();

    let commits = git.capture(&["rev-list", "--count", "HEAD"])?;
    if commits.success() {
        result.commits = Some(commits.stdout.trim().to_string());
    }

    let shortlog = git.capture(&["shortlog", "-sn", "--all"])?;
    if shortlog.success() {
        result.contributors = Some(count_contributors(&shortlog.stdout));
    }

    let branch = git.capture(&["rev-parse", "--abbrev-ref", "HEAD"])?;
    if branch.success() {
        result.branch = Some(branch.stdout.trim().to_string());
    }

    let status = git.capture(&["status", "--short"])?;
    result.status_code = status.code;
    if status.success() {
        result.clean = Some(status.stdout.is_empty());
    }

    log::debug!("vibes: {:?}", result);
    Ok(result)
}

/// One `shortlog -sn` line per author.
pub fn count_contributors(shortlog: &str) -> usize {
    shortlog.lines().filter(|l| !l.trim().is_empty()).count()
}

pub fn format_vibes_human(result: &VibesResult, deco: &Decorations) -> String {
    let mut lines = vec![
        deco.paint(
            deco.label("🎵 Checking the vibes...", "Repository Overview"),
            Tone::Heading,
        ),
        String::new(),
    ];

    if let Some(commits) = &result.commits {
        let label = deco.label("📊 Total commits", "Total commits");
        lines.push(deco.paint(&format!("{}: {}", label, commits), Tone::Accent));
    }
    if let Some(contributors) = result.contributors {
        let label = deco.label("👥 Contributors", "Contributors");
        lines.push(deco.paint(&format!("{}: {}", label, contributors), Tone::Warn));
    }
    if let Some(branch) = &result.branch {
        let label = deco.label("🌿 Current branch", "Current branch");
        lines.push(deco.paint_bold(&format!("{}: {}", label, branch), Tone::Heading));
    }
    match result.clean {
        Some(true) => lines.push(deco.paint(
            deco.label("✨ Status: Clean - immaculate vibes!", "Status: Clean"),
            Tone::Success,
        )),
        Some(false) => lines.push(deco.paint(
            deco.label(
                "📝 Status: Changes detected - creative energy flowing!",
                "Status: Changes detected",
            ),
            Tone::Warn,
        )),
        None => {}
    }

    lines.push(String::new());
    if deco.emoji {
        lines.push(deco.paint("🎉 The vibes are strong with this one!", Tone::Heading));
    }

    lines.join("\n")
}
