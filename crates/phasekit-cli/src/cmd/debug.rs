use crate::output::print_json;
use anyhow::Context;
use phasekit_core::lifecycle::debug::{self, DebugRequest};
use std::path::Path;

pub fn run(
    root: &Path,
    phase: u32,
    issue: &str,
    hypothesis: Option<String>,
    result: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let outcome = debug::debug(
        root,
        DebugRequest {
            phase,
            description: issue.to_string(),
            hypothesis,
            result,
        },
    )
    .context("debug failed")?;

    if json {
        return print_json(&outcome);
    }

    println!(
        "Debug attempt recorded for phase {} (strike {}/3)",
        outcome.phase, outcome.strikes
    );
    if outcome.exhausted {
        println!("Strikes exhausted: pause this session and resume in a fresh one");
    } else {
        println!("{} attempt(s) remaining", outcome.remaining);
    }
    Ok(())
}
