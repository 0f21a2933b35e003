use crate::output::print_json;
use anyhow::Context;
use phasekit_core::lifecycle::execute::{self, ExecuteRequest};
use std::path::Path;

pub fn run(
    root: &Path,
    phase: u32,
    task: &str,
    result: &str,
    files: Vec<String>,
    json: bool,
) -> anyhow::Result<()> {
    let outcome = execute::execute(
        root,
        ExecuteRequest {
            phase,
            task_name: task.to_string(),
            result: result.to_string(),
            files_changed: files,
        },
    )
    .context("execute failed")?;

    if json {
        return print_json(&outcome);
    }

    println!(
        "Recorded task '{}' for phase {} ({}/{} summaries)",
        outcome.task, outcome.phase, outcome.summaries, outcome.plans
    );
    if outcome.phase_complete {
        println!("Phase {} fully executed", outcome.phase);
    }
    Ok(())
}
