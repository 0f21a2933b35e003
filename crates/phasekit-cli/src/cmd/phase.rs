use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use phasekit_core::lifecycle::phases;
use phasekit_core::paths;
use std::path::Path;

#[derive(Subcommand)]
pub enum PhaseSubcommand {
    /// Append a phase to the roadmap
    Add {
        name: String,
        /// One-line objective
        #[arg(long, default_value = "")]
        objective: String,
    },
    /// Remove a phase and its artifacts (completed phases are protected)
    Remove { number: u32 },
    /// List all phases with status and artifact counts
    List,
}

pub fn run(root: &Path, subcmd: PhaseSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        PhaseSubcommand::Add { name, objective } => add(root, &name, &objective, json),
        PhaseSubcommand::Remove { number } => remove(root, number, json),
        PhaseSubcommand::List => list(root, json),
    }
}

fn add(root: &Path, name: &str, objective: &str, json: bool) -> anyhow::Result<()> {
    let added = phases::add_phase(root, name, objective).context("phase add failed")?;
    if json {
        return print_json(&added);
    }
    println!("Added phase {}: {}", added.number, added.name);
    Ok(())
}

fn remove(root: &Path, number: u32, json: bool) -> anyhow::Result<()> {
    let entry = phases::remove_phase(root, number).context("phase remove failed")?;
    if json {
        return print_json(&serde_json::json!({
            "number": entry.number,
            "name": entry.name,
        }));
    }
    println!("Removed phase {}: {}", entry.number, entry.name);
    Ok(())
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let entries = phases::list_phases(root).context("phase list failed")?;

    if json {
        let rows: Vec<serde_json::Value> = entries
            .iter()
            .map(|p| {
                serde_json::json!({
                    "number": p.number,
                    "name": p.name,
                    "status": p.status,
                    "plans": paths::plan_files(root, p.number).len(),
                    "summaries": paths::summary_files(root, p.number).len(),
                })
            })
            .collect();
        return print_json(&rows);
    }

    let rows = entries
        .iter()
        .map(|p| {
            vec![
                p.number.to_string(),
                p.name.clone(),
                p.status.to_string(),
                paths::plan_files(root, p.number).len().to_string(),
                paths::summary_files(root, p.number).len().to_string(),
            ]
        })
        .collect();
    print_table(&["#", "NAME", "STATUS", "PLANS", "SUMMARIES"], rows);
    Ok(())
}
