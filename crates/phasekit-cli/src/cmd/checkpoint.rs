use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use phasekit_core::checkpoint::Checkpoints;
use std::path::Path;

#[derive(Subcommand)]
pub enum CheckpointSubcommand {
    /// List checkpoint history, newest first
    Log {
        /// Show at most N entries
        #[arg(long, default_value = "20")]
        limit: usize,
    },
}

pub fn run(root: &Path, subcmd: CheckpointSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        CheckpointSubcommand::Log { limit } => log(root, limit, json),
    }
}

fn log(root: &Path, limit: usize, json: bool) -> anyhow::Result<()> {
    let checkpoints = Checkpoints::new(root).context("checkpoint log failed")?;
    let entries = checkpoints.log().context("checkpoint log failed")?;
    let entries: Vec<_> = entries.into_iter().take(limit).collect();

    if json {
        let rows: Vec<serde_json::Value> = entries
            .iter()
            .map(|c| serde_json::json!({ "id": c.id, "subject": c.subject }))
            .collect();
        return print_json(&rows);
    }

    let rows = entries
        .iter()
        .map(|c| vec![c.id[..12.min(c.id.len())].to_string(), c.subject.clone()])
        .collect();
    print_table(&["ID", "SUBJECT"], rows);
    Ok(())
}
