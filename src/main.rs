mod cli;
mod commands;
mod config;
mod git;
mod router;
mod style;
mod testutil;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use config::ResolvedConfig;
use cli::{Cli, Command};
use commands::SyncKind;
use git::{GitRunner, SystemGit, FALLBACK_EXIT_CODE};
use router::{Forward, Route};
use std::ffi::OsString;
use std::io::Write;
use style::Decorations;

const LOG_ENV: &str = "VIBE_LOG";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or(LOG_ENV, "off"))
        .format_timestamp(None)
        .init();

    let args: Vec<OsString> = std::env::args_os().skip(1).collect();
    let code = match dispatch(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            FALLBACK_EXIT_CODE
        }
    };
    std::process::exit(code);
}

fn dispatch(args: Vec<OsString>) -> Result<i32> {
    let route = router::route(args);

    if let Route::PassThrough(args) = &route {
        // Nothing of vibe's own may reach the terminal here, not even a bad
        // config file.
        let config = config::load_default_config().unwrap_or_else(|e| {
            log::debug!("ignoring config for pass-through: {:#}", e);
            ResolvedConfig::default()
        });
        return Ok(pass_through(&SystemGit::new(&config.git), args));
    }

    let config = config::load_default_config()?;
    let git = SystemGit::new(&config.git);
    let deco = Decorations::detect(config.color, config.emoji);
    style::install(&deco);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(route, &deco, &git, &mut out)
}

fn pass_through(git: &dyn GitRunner, args: &[OsString]) -> i32 {
    commands::cmd_passthrough(git, args).unwrap_or_else(|e| {
        log::debug!("pass-through failed: {:#}", e);
        FALLBACK_EXIT_CODE
    })
}

fn execute(
    route: Route,
    deco: &Decorations,
    git: &dyn GitRunner,
    out: &mut dyn Write,
) -> Result<i32> {
    match route {
        Route::PassThrough(args) => Ok(pass_through(git, &args)),
        Route::Forward(forward, args) => run_forward(forward, &args, deco, git, out),
        Route::Builtin(args) => {
            let argv = std::iter::once(OsString::from("vibe")).chain(args);
            // clap prints usage errors and help itself, then exits.
            let cli = Cli::try_parse_from(argv).unwrap_or_else(|e| e.exit());
            run(cli, deco, git, out)
        }
    }
}

fn run_forward(
    forward: Forward,
    args: &[OsString],
    deco: &Decorations,
    git: &dyn GitRunner,
    out: &mut dyn Write,
) -> Result<i32> {
    match forward {
        Forward::Commit => commands::cmd_commit(git, args),
        Forward::Log => commands::cmd_log(git, args),
        Forward::Push => commands::cmd_sync(SyncKind::Push, deco, git, out, args),
        Forward::Pull => commands::cmd_sync(SyncKind::Pull, deco, git, out, args),
    }
}

fn run(cli: Cli, deco: &Decorations, git: &dyn GitRunner, out: &mut dyn Write) -> Result<i32> {
    let Some(command) = cli.command else {
        let help = Cli::command().render_help();
        write!(out, "{}", help)?;
        return Ok(0);
    };

    match command {
        Command::Version { rest } => {
            log::debug!("version: ignoring {:?}", rest);
            commands::cmd_version(out)
        }
        Command::Status { json, rest } => {
            log::debug!("status: ignoring {:?}", rest);
            let result = commands::cmd_status(git)?;
            output(&result, json, deco, out, commands::format_status_human)?;
            Ok(result.exit_code())
        }
        Command::Commit { args } => run_forward(Forward::Commit, &args, deco, git, out),
        Command::Log { args } => run_forward(Forward::Log, &args, deco, git, out),
        Command::Push { args } => run_forward(Forward::Push, &args, deco, git, out),
        Command::Pull { args } => run_forward(Forward::Pull, &args, deco, git, out),
        Command::Vibes { json, rest } => {
            log::debug!("vibes: ignoring {:?}", rest);
            let result = commands::cmd_vibes(git)?;
            output(&result, json, deco, out, commands::format_vibes_human)?;
            Ok(result.exit_code())
        }
    }
}

fn output<T: serde::Serialize>(
    result: &T,
    json: bool,
    deco: &Decorations,
    out: &mut dyn Write,
    human_fn: fn(&T, &Decorations) -> String,
) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(result)?)?;
    } else {
        let text = human_fn(result, deco);
        if !text.is_empty() {
            writeln!(out, "{}", text)?;
        }
    }
    Ok(())
}
