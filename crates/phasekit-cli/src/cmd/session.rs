use crate::output::print_json;
use anyhow::Context;
use phasekit_core::lifecycle::session_ops;
use std::path::Path;

pub fn pause(root: &Path, summary: &str, json: bool) -> anyhow::Result<()> {
    let session = session_ops::pause(root, summary).context("pause failed")?;
    if json {
        return print_json(&session);
    }
    println!("Session paused");
    println!("  {}", session.status);
    Ok(())
}

pub fn resume(root: &Path, json: bool) -> anyhow::Result<()> {
    let report = session_ops::resume(root).context("resume failed")?;
    if json {
        return print_json(&report);
    }
    println!("Session resumed (debug strikes cleared)");
    println!("  status: {}", report.status);
    println!(
        "  phases: {}/{} complete",
        report.phases_complete, report.phases_total
    );
    println!("  next:   {}", report.next_action);
    Ok(())
}
