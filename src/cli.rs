use clap::{Parser, Subcommand};
use std::ffi::OsString;

#[derive(Parser)]
#[command(
    name = "vibe",
    version,
    about = "Vibe - A delightful Git wrapper with personality",
    long_about = "Vibe is a friendly Git wrapper that adds color, better UX, and helpful \
    features to your Git workflow. Any command it does not know is handed to git unchanged."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// `commit`, `log`, `push` and `pull` are routed before clap runs (see
/// `router`); their variants here only feed `--help` and `help <cmd>`.
#[derive(Subcommand)]
pub enum Command {
    /// Print the version number of Vibe
    Version {
        /// Ignored
        #[arg(hide = true)]
        rest: Vec<OsString>,
    },
    /// Show the working tree status with style
    #[command(visible_alias = "st")]
    Status {
        /// Print the classified status as JSON
        #[arg(long)]
        json: bool,
        /// Ignored
        #[arg(hide = true)]
        rest: Vec<OsString>,
    },
    /// Record changes to the repository
    #[command(visible_alias = "ci", disable_help_flag = true)]
    Commit {
        /// Arguments passed through to git commit
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<OsString>,
    },
    /// Show commit logs with enhanced formatting
    #[command(disable_help_flag = true)]
    Log {
        /// Arguments passed through to git log
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<OsString>,
    },
    /// Update remote refs along with associated objects
    #[command(disable_help_flag = true)]
    Push {
        /// Arguments passed through to git push
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<OsString>,
    },
    /// Fetch from and integrate with another repository or branch
    #[command(disable_help_flag = true)]
    Pull {
        /// Arguments passed through to git pull
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<OsString>,
    },
    /// Check the vibes of your repository
    Vibes {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
        /// Ignored
        #[arg(hide = true)]
        rest: Vec<OsString>,
    },
}
