//! Rollback: restore the tree to the checkpoint that preceded a phase.
//!
//! Destructive, so the operation is two-step: an unconfirmed call only
//! previews what would be lost (naming the target when one is determinable),
//! and a confirmed call resets hard to the target. A confirmed run with no
//! safe target fails closed rather than guess at an older commit.

use crate::checkpoint::{Category, Checkpoints};
use crate::error::{PhasekitError, Result};
use crate::paths;
use crate::roadmap::Roadmap;
use crate::session::{Session, SessionPatch};
use crate::templates;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct RollbackRequest {
    pub phase: u32,
    /// False previews the rollback without touching anything.
    #[serde(default)]
    pub confirmed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RollbackOutcome {
    pub phase: u32,
    pub confirmed: bool,
    /// The checkpoint the reset targets. Always present on a confirmed run;
    /// absent on a preview when no safe target is determinable.
    pub target_id: Option<String>,
    pub target_subject: Option<String>,
    /// Plan artifacts that exist (preview) or existed (confirmed run).
    pub plans: usize,
    pub summaries: usize,
    /// Leftover artifact files deleted after the reset. Zero on preview.
    pub files_removed: usize,
    pub checkpoint: Option<String>,
}

pub fn rollback(root: &Path, req: RollbackRequest) -> Result<RollbackOutcome> {
    super::ensure_initialized(root)?;

    let roadmap = Roadmap::load(root)?;
    let entry = roadmap
        .get(req.phase)
        .ok_or(PhasekitError::PhaseNotFound(req.phase))?;

    let checkpoints = Checkpoints::new(root)?;
    let plans = paths::plan_files(root, req.phase).len();
    let summaries = paths::summary_files(root, req.phase).len();

    // A preview always succeeds: it reports what would be lost and names the
    // target only when one is determinable. Only a confirmed run fails
    // closed on a missing target.
    if !req.confirmed {
        let target = checkpoints.rollback_target(req.phase)?;
        return Ok(RollbackOutcome {
            phase: req.phase,
            confirmed: false,
            target_id: target.as_ref().map(|t| t.id.clone()),
            target_subject: target.map(|t| t.subject),
            plans,
            summaries,
            files_removed: 0,
            checkpoint: None,
        });
    }

    let target = checkpoints
        .rollback_target(req.phase)?
        .ok_or(PhasekitError::NoSafeCheckpoint(req.phase))?;

    tracing::info!(phase = req.phase, target = %target.id, "rolling back");
    checkpoints.reset_hard(&target.id)?;

    // reset --hard leaves untracked files alone; sweep the phase directory
    // for artifacts the target never knew about. Best effort.
    let files_removed = remove_phase_artifacts(root, req.phase);

    // The restored roadmap may predate this phase entirely.
    let mut restored = Roadmap::load(root)?;
    match restored.mark_not_started(req.phase) {
        Ok(()) => restored.save(root)?,
        Err(PhasekitError::PhaseNotFound(_)) => {}
        Err(e) => return Err(e),
    }

    super::append_journal(
        root,
        &templates::rollback_entry(req.phase, &entry.name, &target.id, files_removed),
    )?;
    super::append_decision(
        root,
        &templates::decision_entry(req.phase, &entry.name, &target.id),
    )?;

    Session::update(
        root,
        SessionPatch {
            phase: Some(Some(req.phase)),
            task: Some(None),
            status: Some(format!("Phase {} rolled back", req.phase)),
            ..Default::default()
        },
    )?;

    let checkpoint = checkpoints.commit(
        Category::Rollback,
        Some(req.phase),
        &format!("reset {}", entry.name),
    )?;

    Ok(RollbackOutcome {
        phase: req.phase,
        confirmed: true,
        target_id: Some(target.id),
        target_subject: Some(target.subject),
        plans,
        summaries,
        files_removed,
        checkpoint: Some(checkpoint),
    })
}

fn remove_phase_artifacts(root: &Path, phase: u32) -> usize {
    let dir = paths::phase_dir(root, phase);
    let mut names: Vec<String> = paths::plan_files(root, phase);
    names.extend(paths::summary_files(root, phase));
    names.push(paths::VERIFICATION_FILE.to_string());
    names.push(paths::TEST_RESULTS_FILE.to_string());

    let mut removed = 0;
    for name in names {
        let path = dir.join(&name);
        if !path.exists() {
            continue;
        }
        match std::fs::remove_file(&path) {
            Ok(()) => removed += 1,
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "leftover artifact not removed"),
        }
    }
    // Drop the directory itself when the sweep emptied it
    let _ = std::fs::remove_dir(&dir);
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::execute::{execute, ExecuteRequest};
    use crate::lifecycle::plan::tests::sample_plan;
    use crate::lifecycle::plan::{plan, PlanRequest};
    use crate::lifecycle::testutil::seeded_project;
    use crate::types::PhaseStatus;
    use tempfile::TempDir;

    fn worked_phase_one(dir: &TempDir) {
        plan(
            dir.path(),
            PlanRequest {
                phase: Some(1),
                plans: vec![
                    sample_plan("A", 1),
                    sample_plan("B", 1),
                    sample_plan("C", 2),
                ],
            },
        )
        .unwrap();
        execute(
            dir.path(),
            ExecuteRequest {
                phase: 1,
                task_name: "First".into(),
                result: "done".into(),
                files_changed: vec![],
            },
        )
        .unwrap();
    }

    #[test]
    fn preview_reports_without_mutating() {
        let dir = TempDir::new().unwrap();
        seeded_project(dir.path());
        worked_phase_one(&dir);

        let before = std::fs::read_to_string(dir.path().join(".phasekit/STATE.md")).unwrap();
        let outcome = rollback(
            dir.path(),
            RollbackRequest {
                phase: 1,
                confirmed: false,
            },
        )
        .unwrap();

        assert!(!outcome.confirmed);
        assert_eq!(outcome.plans, 3);
        assert_eq!(outcome.summaries, 1);
        assert_eq!(
            outcome.target_subject.as_deref(),
            Some(crate::checkpoint::INIT_SUBJECT)
        );
        assert!(outcome.checkpoint.is_none());

        // Nothing moved
        assert_eq!(paths::plan_files(dir.path(), 1).len(), 3);
        let after = std::fs::read_to_string(dir.path().join(".phasekit/STATE.md")).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn confirmed_rollback_restores_pre_phase_state() {
        let dir = TempDir::new().unwrap();
        seeded_project(dir.path());
        worked_phase_one(&dir);

        let outcome = rollback(
            dir.path(),
            RollbackRequest {
                phase: 1,
                confirmed: true,
            },
        )
        .unwrap();

        assert!(outcome.confirmed);
        assert!(outcome.checkpoint.is_some());
        assert!(paths::plan_files(dir.path(), 1).is_empty());
        assert!(paths::summary_files(dir.path(), 1).is_empty());

        let roadmap = Roadmap::load(dir.path()).unwrap();
        assert_eq!(roadmap.get(1).unwrap().status, PhaseStatus::NotStarted);

        let session = Session::read(dir.path()).unwrap();
        assert_eq!(session.status, "Phase 1 rolled back");

        let journal = std::fs::read_to_string(dir.path().join(".phasekit/JOURNAL.md")).unwrap();
        assert!(journal.contains("Phase 1 Rolled Back"));

        let decisions = std::fs::read_to_string(dir.path().join(".phasekit/DECISIONS.md")).unwrap();
        assert!(decisions.contains("Roll back phase 1"));

        let checkpoints = Checkpoints::new(dir.path()).unwrap();
        let log = checkpoints.log().unwrap();
        assert!(log[0].subject.starts_with("rollback(phase-1):"));
    }

    #[test]
    fn preview_succeeds_without_safe_checkpoint() {
        let dir = TempDir::new().unwrap();
        seeded_project(dir.path());

        // Phase 2 has no phase-complete(phase-1) predecessor: the preview
        // still reports counts, with no target named
        let outcome = rollback(
            dir.path(),
            RollbackRequest {
                phase: 2,
                confirmed: false,
            },
        )
        .unwrap();

        assert!(!outcome.confirmed);
        assert_eq!(outcome.plans, 0);
        assert_eq!(outcome.summaries, 0);
        assert!(outcome.target_id.is_none());
        assert!(outcome.target_subject.is_none());
    }

    #[test]
    fn out_of_order_history_fails_closed() {
        let dir = TempDir::new().unwrap();
        seeded_project(dir.path());
        // Phase 2 was never preceded by phase-complete(phase-1)
        assert!(matches!(
            rollback(
                dir.path(),
                RollbackRequest {
                    phase: 2,
                    confirmed: true,
                }
            ),
            Err(PhasekitError::NoSafeCheckpoint(2))
        ));
        // And nothing changed
        let checkpoints = Checkpoints::new(dir.path()).unwrap();
        assert_eq!(checkpoints.log().unwrap().len(), 1);
    }

    #[test]
    fn unknown_phase_fails() {
        let dir = TempDir::new().unwrap();
        seeded_project(dir.path());
        assert!(matches!(
            rollback(
                dir.path(),
                RollbackRequest {
                    phase: 9,
                    confirmed: false,
                }
            ),
            Err(PhasekitError::PhaseNotFound(9))
        ));
    }
}
