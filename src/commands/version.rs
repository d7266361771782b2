use anyhow::Result;
use std::io::Write;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn cmd_version(out: &mut dyn Write) -> Result<i32> {
    writeln!(out, "Vibe v{}", VERSION)?;
    Ok(0)
}
