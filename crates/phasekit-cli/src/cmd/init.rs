use crate::output::print_json;
use anyhow::Context;
use phasekit_core::lifecycle::init::{self, InitRequest, PhaseSeed};
use std::path::Path;

#[allow(clippy::too_many_arguments)]
pub fn run(
    root: &Path,
    name: Option<&str>,
    vision: &str,
    milestone: Option<&str>,
    phases: &[String],
    goals: Vec<String>,
    non_goals: Vec<String>,
    json: bool,
) -> anyhow::Result<()> {
    let project_name = match name {
        Some(n) => n.to_string(),
        None => root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "project".to_string()),
    };

    let seeds = phases
        .iter()
        .map(|raw| {
            let (name, objective) = super::parse_phase_seed(raw)?;
            Ok(PhaseSeed { name, objective })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let outcome = init::init(
        root,
        InitRequest {
            project_name,
            vision: vision.to_string(),
            goals,
            non_goals,
            users: None,
            constraints: Vec::new(),
            success_criteria: Vec::new(),
            milestone: milestone.map(String::from),
            phases: seeds,
        },
    )
    .context("init failed")?;

    if json {
        return print_json(&outcome);
    }

    println!("Initialized phasekit project: {}", outcome.project_name);
    for file in &outcome.files_created {
        println!("  created: {file}");
    }
    println!("  phases: {}", outcome.phases);
    println!("  checkpoint: {}", &outcome.checkpoint[..12.min(outcome.checkpoint.len())]);
    println!();
    println!("Next: review .phasekit/SPEC.md, then run 'phasekit spec finalize'");
    Ok(())
}
