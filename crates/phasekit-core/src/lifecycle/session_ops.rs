//! Session handoff and progress reporting.
//!
//! Pause writes a handoff note so the next session can pick up cold; resume
//! reads everything back and clears the debug breaker, treating a fresh
//! session as an explicit fresh-start signal. Progress is the read-only
//! "where am I" view both of them share.

use crate::config::Config;
use crate::error::Result;
use crate::paths;
use crate::roadmap::Roadmap;
use crate::session::{Session, SessionPatch};
use crate::templates;
use crate::types::PhaseStatus;
use serde::Serialize;
use std::path::Path;

const PAUSED_PREFIX: &str = "Paused: ";

#[derive(Debug, Clone, Serialize)]
pub struct ProgressReport {
    pub project: String,
    pub phases_total: usize,
    pub phases_complete: usize,
    pub current_phase: Option<u32>,
    pub current_task: Option<String>,
    pub status: String,
    pub blockers: Vec<String>,
    pub debug_strikes: u8,
    pub next_action: String,
}

pub fn pause(root: &Path, summary: &str) -> Result<Session> {
    super::ensure_initialized(root)?;
    super::append_journal(root, &templates::pause_entry(summary))?;
    Session::update(
        root,
        SessionPatch {
            status: Some(format!("{PAUSED_PREFIX}{summary}")),
            ..Default::default()
        },
    )
}

/// Restore working context at the start of a session. Clears the debug
/// strike counter and strips the paused marker from the status.
pub fn resume(root: &Path) -> Result<ProgressReport> {
    super::ensure_initialized(root)?;

    Session::reset_debug_strikes(root)?;

    let session = Session::read(root)?;
    if let Some(rest) = session.status.strip_prefix(PAUSED_PREFIX) {
        Session::update(
            root,
            SessionPatch {
                status: Some(rest.to_string()),
                ..Default::default()
            },
        )?;
    }

    progress(root)
}

/// Read-only snapshot of where the project stands and what to do next.
pub fn progress(root: &Path) -> Result<ProgressReport> {
    super::ensure_initialized(root)?;

    let config = Config::load_or_default(root);
    let session = Session::read(root)?;
    let roadmap = Roadmap::load(root)?;
    let phases = roadmap.phases();
    let phases_complete = phases
        .iter()
        .filter(|p| p.status == PhaseStatus::Complete)
        .count();

    let next_action = next_action(root, &phases);

    Ok(ProgressReport {
        project: config.project,
        phases_total: phases.len(),
        phases_complete,
        current_phase: session.phase,
        current_task: session.task,
        status: session.status,
        blockers: session.blockers,
        debug_strikes: session.debug_strikes,
        next_action,
    })
}

fn next_action(root: &Path, phases: &[crate::roadmap::PhaseEntry]) -> String {
    if super::ensure_spec_finalized(root).is_err() {
        return "Finalize the specification: phasekit spec finalize".to_string();
    }
    let Some(current) = phases.iter().find(|p| p.status != PhaseStatus::Complete) else {
        return "All phases complete: add the next phase or milestone".to_string();
    };
    let n = current.number;
    let plans = paths::plan_files(root, n).len();
    if plans == 0 {
        return format!("Plan phase {n}: phasekit plan");
    }
    let summaries = paths::summary_files(root, n).len();
    if summaries < plans {
        return format!("Execute phase {n} tasks: phasekit execute");
    }
    format!("Verify phase {n}: phasekit verify")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::debug::{debug, DebugRequest};
    use crate::lifecycle::plan::tests::sample_plan;
    use crate::lifecycle::plan::{plan, PlanRequest};
    use crate::lifecycle::testutil::seeded_project;
    use tempfile::TempDir;

    #[test]
    fn pause_journals_and_marks_status() {
        let dir = TempDir::new().unwrap();
        seeded_project(dir.path());

        let session = pause(dir.path(), "Stopped mid-plan, phase 1 half done").unwrap();
        assert_eq!(session.status, "Paused: Stopped mid-plan, phase 1 half done");

        let journal = std::fs::read_to_string(dir.path().join(".phasekit/JOURNAL.md")).unwrap();
        assert!(journal.contains("Session Paused"));
        assert!(journal.contains("Stopped mid-plan"));
    }

    #[test]
    fn resume_clears_strikes_and_paused_marker() {
        let dir = TempDir::new().unwrap();
        seeded_project(dir.path());
        for issue in ["one", "two", "three"] {
            debug(
                dir.path(),
                DebugRequest {
                    phase: 1,
                    description: issue.into(),
                    hypothesis: None,
                    result: None,
                },
            )
            .unwrap();
        }
        pause(dir.path(), "giving up for today").unwrap();

        let report = resume(dir.path()).unwrap();
        assert_eq!(report.debug_strikes, 0);
        assert_eq!(report.status, "giving up for today");
        assert!(!Session::read(dir.path()).unwrap().is_exhausted());
    }

    #[test]
    fn progress_counts_and_recommends() {
        let dir = TempDir::new().unwrap();
        seeded_project(dir.path());

        let report = progress(dir.path()).unwrap();
        assert_eq!(report.project, "demo");
        assert_eq!(report.phases_total, 2);
        assert_eq!(report.phases_complete, 0);
        assert_eq!(report.next_action, "Plan phase 1: phasekit plan");

        plan(
            dir.path(),
            PlanRequest {
                phase: Some(1),
                plans: vec![sample_plan("A", 1)],
            },
        )
        .unwrap();
        let report = progress(dir.path()).unwrap();
        assert_eq!(report.next_action, "Execute phase 1 tasks: phasekit execute");
    }

    #[test]
    fn draft_spec_recommends_finalizing() {
        let dir = TempDir::new().unwrap();
        crate::lifecycle::init::init(
            dir.path(),
            crate::lifecycle::init::InitRequest {
                project_name: "demo".into(),
                vision: "v".into(),
                goals: vec![],
                non_goals: vec![],
                users: None,
                constraints: vec![],
                success_criteria: vec![],
                milestone: None,
                phases: vec![crate::lifecycle::init::PhaseSeed {
                    name: "One".into(),
                    objective: "o".into(),
                }],
            },
        )
        .unwrap();

        let report = progress(dir.path()).unwrap();
        assert!(report.next_action.contains("spec finalize"));
    }
}
