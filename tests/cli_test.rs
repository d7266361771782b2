use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A sandbox with its own config file so the user's config never leaks in.
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    fn with_git(self, git: &Path) -> Self {
        std::fs::write(
            self.config_path(),
            format!("[general]\ngit = {:?}\n", git.display().to_string()),
        )
        .unwrap();
        self
    }

    fn repo(&self) -> PathBuf {
        let repo = self.dir.path().join("repo");
        std::fs::create_dir_all(&repo).unwrap();
        for args in [
            &["init", "-q"][..],
            &["commit", "-q", "--allow-empty", "-m", "initial"][..],
        ] {
            let status = std::process::Command::new("git")
                .args(args)
                .current_dir(&repo)
                .env("GIT_AUTHOR_NAME", "Test")
                .env("GIT_AUTHOR_EMAIL", "test@test.com")
                .env("GIT_COMMITTER_NAME", "Test")
                .env("GIT_COMMITTER_EMAIL", "test@test.com")
                .status()
                .unwrap();
            assert!(status.success());
        }
        repo
    }

    fn vibe(&self) -> Command {
        let mut cmd = Command::cargo_bin("vibe").unwrap();
        cmd.env("VIBE_CONFIG", self.config_path())
            .env_remove("VIBE_LOG")
            .current_dir(self.dir.path());
        cmd
    }

    /// A stand-in git that prints one `ARG:` line per argument and exits
    /// with `$FAKE_GIT_EXIT`.
    #[cfg(unix)]
    fn fake_git(&self) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = self.dir.path().join("fake-git");
        std::fs::write(
            &path,
            "#!/bin/sh\nfor a in \"$@\"; do printf 'ARG:%s\\n' \"$a\"; done\nexit \"${FAKE_GIT_EXIT:-0}\"\n",
        )
        .unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }
}

#[test]
fn help_exits_zero() {
    Sandbox::new().vibe().arg("--help").assert().success();
}

#[test]
fn no_args_shows_help() {
    Sandbox::new()
        .vibe()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn version_prints_and_exits_zero() {
    Sandbox::new()
        .vibe()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "Vibe v{}\n",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn version_spawns_no_git() {
    let sandbox = Sandbox::new().with_git(Path::new("/nonexistent/git"));
    sandbox.vibe().arg("version").assert().success();
}

#[test]
fn status_in_real_repo_is_plain_when_piped() {
    let sandbox = Sandbox::new();
    let repo = sandbox.repo();
    std::fs::write(repo.join("new.txt"), "hi").unwrap();
    sandbox
        .vibe()
        .current_dir(&repo)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Repository Status"))
        .stdout(predicate::str::contains("Untracked: ?? new.txt"))
        .stdout(predicate::str::contains("\u{1b}[").not())
        .stdout(predicate::str::contains("✨").not());
}

#[test]
fn status_outside_repo_fails_with_git_code() {
    let sandbox = Sandbox::new();
    sandbox
        .vibe()
        .env("GIT_CEILING_DIRECTORIES", sandbox.dir.path())
        .arg("st")
        .assert()
        .code(128)
        .stdout(predicate::str::contains("Not a git repository"));
}

#[test]
fn vibes_in_real_repo() {
    let sandbox = Sandbox::new();
    let repo = sandbox.repo();
    sandbox
        .vibe()
        .current_dir(&repo)
        .arg("vibes")
        .assert()
        .success()
        .stdout(predicate::str::contains("Repository Overview"))
        .stdout(predicate::str::contains("Total commits: 1"))
        .stdout(predicate::str::contains("Status: Clean"));
}

#[test]
fn unknown_subcommand_passes_through_real_git() {
    let sandbox = Sandbox::new();
    let repo = sandbox.repo();
    sandbox
        .vibe()
        .current_dir(&repo)
        .args(["rev-list", "--count", "HEAD"])
        .assert()
        .success()
        .stdout("1\n")
        .stderr("");
}

#[test]
fn usage_error_on_known_subcommand() {
    Sandbox::new()
        .vibe()
        .args(["vibes", "--bogus"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--bogus"));
}

#[test]
fn invalid_config_is_reported() {
    let sandbox = Sandbox::new();
    std::fs::write(sandbox.config_path(), "[general]\ncolor = \"loud\"\n").unwrap();
    sandbox
        .vibe()
        .arg("version")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown color mode"));
}

#[test]
fn invalid_config_still_passes_through() {
    let sandbox = Sandbox::new();
    let repo = sandbox.repo();
    std::fs::write(sandbox.config_path(), "[general]\ncolor = \"loud\"\n").unwrap();
    sandbox
        .vibe()
        .current_dir(&repo)
        .args(["rev-list", "--count", "HEAD"])
        .assert()
        .success()
        .stdout("1\n")
        .stderr("");
}

#[test]
fn status_ignores_extra_positionals() {
    let sandbox = Sandbox::new();
    let repo = sandbox.repo();
    sandbox
        .vibe()
        .current_dir(&repo)
        .args(["status", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("Working tree clean"));
}

#[test]
fn missing_git_on_pass_through_is_silent() {
    let sandbox = Sandbox::new().with_git(Path::new("/nonexistent/git"));
    sandbox
        .vibe()
        .args(["fetch", "--all"])
        .assert()
        .code(1)
        .stdout("")
        .stderr("");
}

#[test]
fn missing_git_on_builtin_reports_error() {
    let sandbox = Sandbox::new().with_git(Path::new("/nonexistent/git"));
    sandbox
        .vibe()
        .arg("commit")
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("error:"));
}

#[cfg(unix)]
mod fake_git {
    use super::*;

    fn sandbox() -> Sandbox {
        let sandbox = Sandbox::new();
        let git = sandbox.fake_git();
        sandbox.with_git(&git)
    }

    #[test]
    fn pass_through_forwards_full_argv_and_exit_code() {
        sandbox()
            .vibe()
            .args(["checkout", "-b", "feature/x"])
            .env("FAKE_GIT_EXIT", "3")
            .assert()
            .code(3)
            .stdout("ARG:checkout\nARG:-b\nARG:feature/x\n")
            .stderr("");
    }

    #[test]
    fn git_global_flags_pass_through() {
        sandbox()
            .vibe()
            .args(["-C", "somewhere", "status"])
            .assert()
            .success()
            .stdout("ARG:-C\nARG:somewhere\nARG:status\n");
    }

    #[test]
    fn commit_forwards_flags() {
        sandbox()
            .vibe()
            .args(["commit", "-m", "hello world", "--amend"])
            .assert()
            .success()
            .stdout("ARG:commit\nARG:-m\nARG:hello world\nARG:--amend\n");
    }

    #[test]
    fn commit_keeps_leading_double_dash() {
        sandbox()
            .vibe()
            .args(["commit", "--", "a.txt"])
            .assert()
            .success()
            .stdout("ARG:commit\nARG:--\nARG:a.txt\n");
    }

    #[test]
    fn pull_keeps_leading_double_dash() {
        sandbox()
            .vibe()
            .args(["pull", "--", "origin"])
            .assert()
            .success()
            .stdout("Pulling changes...\n\nARG:pull\nARG:--\nARG:origin\n\nPull complete!\n");
    }

    #[test]
    fn log_injects_format_and_graph() {
        sandbox()
            .vibe()
            .args(["log", "-n", "2"])
            .assert()
            .success()
            .stdout(
                "ARG:log\n\
                 ARG:--pretty=format:%C(yellow)%h%C(reset) - %C(cyan)%an%C(reset) %C(green)(%ar)%C(reset)%n  %s%n\n\
                 ARG:--graph\nARG:-n\nARG:2\n",
            );
    }

    #[test]
    fn push_prints_banners_around_git() {
        sandbox()
            .vibe()
            .args(["push", "origin", "main"])
            .assert()
            .success()
            .stdout("Pushing changes...\n\nARG:push\nARG:origin\nARG:main\n\nPush complete!\n");
    }

    #[test]
    fn failed_pull_keeps_code_and_skips_completion() {
        sandbox()
            .vibe()
            .arg("pull")
            .env("FAKE_GIT_EXIT", "1")
            .assert()
            .code(1)
            .stdout("Pulling changes...\n\nARG:pull\n");
    }

    #[test]
    fn color_always_emits_ansi_without_emoji() {
        let sandbox = sandbox();
        let git = sandbox.dir.path().join("fake-git");
        std::fs::write(
            sandbox.config_path(),
            format!(
                "[general]\ngit = {:?}\ncolor = \"always\"\n",
                git.display().to_string()
            ),
        )
        .unwrap();
        sandbox
            .vibe()
            .arg("push")
            .assert()
            .success()
            .stdout(predicate::str::contains("\u{1b}["))
            .stdout(predicate::str::contains("🚀").not());
    }
}
