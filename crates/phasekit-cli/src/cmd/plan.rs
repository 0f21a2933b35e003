use crate::output::print_json;
use anyhow::Context;
use phasekit_core::lifecycle::plan::{self, PlanRequest};
use phasekit_core::types::PlanSpec;
use std::io::Read;
use std::path::Path;

pub fn run(root: &Path, phase: Option<u32>, from: &str, json: bool) -> anyhow::Result<()> {
    let raw = if from == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read plans from stdin")?;
        buf
    } else {
        std::fs::read_to_string(from).with_context(|| format!("failed to read {from}"))?
    };

    let plans: Vec<PlanSpec> =
        serde_json::from_str(&raw).context("plan file must be a JSON array of plans")?;

    let outcome = plan::plan(root, PlanRequest { phase, plans }).context("plan failed")?;

    if json {
        return print_json(&outcome);
    }

    println!(
        "Planned phase {}: {} ({} plan(s))",
        outcome.phase,
        outcome.phase_name,
        outcome.plans_created.len()
    );
    for (wave, names) in &outcome.waves {
        println!("  wave {wave}: {}", names.join(", "));
    }
    for file in &outcome.plans_created {
        println!("  created: {file}");
    }
    Ok(())
}
