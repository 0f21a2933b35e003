use crate::output::print_json;
use anyhow::Context;
use phasekit_core::lifecycle::rollback::{self, RollbackRequest};
use std::path::Path;

fn short(id: &str) -> &str {
    &id[..12.min(id.len())]
}

pub fn run(root: &Path, phase: u32, confirm: bool, json: bool) -> anyhow::Result<()> {
    let outcome = rollback::rollback(
        root,
        RollbackRequest {
            phase,
            confirmed: confirm,
        },
    )
    .context("rollback failed")?;

    if json {
        return print_json(&outcome);
    }

    if !outcome.confirmed {
        println!("Rollback preview for phase {}:", outcome.phase);
        match (&outcome.target_id, &outcome.target_subject) {
            (Some(id), Some(subject)) => println!("  target: {} ({subject})", short(id)),
            _ => println!("  target: none determinable (a confirmed rollback would fail)"),
        }
        println!("  would discard: {} plan file(s)", outcome.plans);
        println!("  would discard: {} summary file(s)", outcome.summaries);
        println!();
        println!("Re-run with --confirm to perform the rollback");
    } else {
        let id = outcome.target_id.as_deref().unwrap_or("?");
        println!("Rolled phase {} back to {}", outcome.phase, short(id));
        println!("  {} leftover file(s) removed", outcome.files_removed);
    }
    Ok(())
}
