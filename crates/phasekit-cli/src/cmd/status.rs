use crate::output::print_json;
use anyhow::Context;
use phasekit_core::lifecycle::session_ops;
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let report = session_ops::progress(root).context("status failed")?;

    if json {
        return print_json(&report);
    }

    println!("Project: {}", report.project);
    println!(
        "Phases:  {}/{} complete",
        report.phases_complete, report.phases_total
    );
    match report.current_phase {
        Some(n) => println!("Phase:   {n}"),
        None => println!("Phase:   none"),
    }
    if let Some(task) = &report.current_task {
        println!("Task:    {task}");
    }
    println!("Status:  {}", report.status);
    if report.debug_strikes > 0 {
        println!("Strikes: {}/3", report.debug_strikes);
    }
    if !report.blockers.is_empty() {
        println!("Blockers:");
        for blocker in &report.blockers {
            println!("  - {blocker}");
        }
    }
    println!();
    println!("Next: {}", report.next_action);
    Ok(())
}
