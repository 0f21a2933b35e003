use crate::output::print_json;
use anyhow::{bail, Context};
use phasekit_core::lifecycle::verify::{self, VerifyRequest, VerifyTest};
use phasekit_core::types::Verdict;
use std::path::Path;

pub fn run(root: &Path, phase: u32, tests: &[String], json: bool) -> anyhow::Result<()> {
    let tests = tests
        .iter()
        .map(|raw| {
            let Some((description, command)) = raw.split_once('=') else {
                bail!("test '{raw}' is not in the form \"description=command\"");
            };
            Ok(VerifyTest {
                description: description.trim().to_string(),
                command: command.trim().to_string(),
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let outcome = verify::verify(root, VerifyRequest { phase, tests }).context("verify failed")?;

    if json {
        print_json(&outcome)?;
    } else {
        println!(
            "Phase {} verification: {} ({} passed, {} failed)",
            outcome.phase, outcome.verdict, outcome.passed, outcome.failed
        );
        for result in &outcome.results {
            let icon = if result.passed { "✅" } else { "❌" };
            println!("  {icon} {} — {}", result.description, result.evidence);
        }
    }

    // Exit nonzero on a failing verdict so scripts can gate on it
    if outcome.verdict == Verdict::Fail {
        std::process::exit(1);
    }
    Ok(())
}
