use crate::output::print_json;
use anyhow::Context;
use phasekit_core::lifecycle::phases;
use std::path::Path;

pub fn run(root: &Path, name: &str, phase_seeds: &[String], json: bool) -> anyhow::Result<()> {
    let seeds = phase_seeds
        .iter()
        .map(|raw| super::parse_phase_seed(raw))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let added = phases::add_milestone(root, name, &seeds).context("milestone failed")?;

    if json {
        return print_json(&added);
    }

    println!("Added milestone: {name}");
    for phase in &added {
        println!("  phase {}: {}", phase.number, phase.name);
    }
    Ok(())
}
