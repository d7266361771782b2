use clap::CommandFactory;
use std::ffi::OsString;

use crate::cli::Cli;

/// Flags vibe answers itself. Every other leading flag belongs to git.
const OWN_FLAGS: &[&str] = &["-h", "--help", "-V", "--version"];

/// Subcommands whose arguments go to git byte for byte. clap never sees
/// their tail, so `--` and `--help` reach git as typed.
const FORWARDS: &[(&str, Forward)] = &[
    ("commit", Forward::Commit),
    ("ci", Forward::Commit),
    ("log", Forward::Log),
    ("push", Forward::Push),
    ("pull", Forward::Pull),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Forward {
    Commit,
    Log,
    Push,
    Pull,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Route {
    /// Parse the full argv with clap and run a vibe handler.
    Builtin(Vec<OsString>),
    /// A decorated git verb with its raw trailing arguments.
    Forward(Forward, Vec<OsString>),
    /// Hand the whole argv to git, untouched.
    PassThrough(Vec<OsString>),
}

/// Decides who handles `args` (program name excluded) by looking the first
/// token up in the subcommand table.
pub fn route(mut args: Vec<OsString>) -> Route {
    let Some(first) = args.first().and_then(|a| a.to_str()) else {
        // Non-UTF-8 can never name a vibe subcommand.
        return if args.is_empty() {
            Route::Builtin(args)
        } else {
            log::debug!("route: pass-through {:?}", args);
            Route::PassThrough(args)
        };
    };

    if let Some(forward) = lookup_forward(first) {
        let rest = args.split_off(1);
        log::debug!("route: forward {:?} {:?}", forward, rest);
        return Route::Forward(forward, rest);
    }

    if is_known(first) {
        log::debug!("route: builtin {:?}", first);
        Route::Builtin(args)
    } else {
        log::debug!("route: pass-through {:?}", args);
        Route::PassThrough(args)
    }
}

fn lookup_forward(token: &str) -> Option<Forward> {
    FORWARDS
        .iter()
        .find(|(name, _)| *name == token)
        .map(|(_, forward)| *forward)
}

fn is_known(token: &str) -> bool {
    if OWN_FLAGS.contains(&token) || token == "help" {
        return true;
    }
    Cli::command().find_subcommand(token).is_some()
}
