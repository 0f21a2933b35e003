//! Execution: record one completed task as a summary artifact plus a task
//! checkpoint. A summary's existence on disk is the completion signal; once
//! every plan has a summary the phase flips to Complete and gets a second,
//! marker checkpoint. The per-task commit always exists independently of
//! whether it happened to be the completing one.

use crate::checkpoint::{Category, Checkpoints};
use crate::error::{PhasekitError, Result};
use crate::paths;
use crate::roadmap::Roadmap;
use crate::session::{Session, SessionPatch};
use crate::templates;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct ExecuteRequest {
    pub phase: u32,
    pub task_name: String,
    pub result: String,
    #[serde(default)]
    pub files_changed: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExecuteOutcome {
    pub phase: u32,
    pub task: String,
    pub summaries: usize,
    pub plans: usize,
    pub phase_complete: bool,
    pub checkpoint: String,
}

pub fn execute(root: &Path, req: ExecuteRequest) -> Result<ExecuteOutcome> {
    super::ensure_initialized(root)?;

    let mut roadmap = Roadmap::load(root)?;
    let entry = roadmap
        .get(req.phase)
        .ok_or(PhasekitError::PhaseNotFound(req.phase))?;

    let plans = paths::plan_files(root, req.phase).len();
    if plans == 0 {
        return Err(PhasekitError::NoPlansForPhase(req.phase));
    }

    let summary = templates::summary_doc(&req.task_name, &req.result, &req.files_changed);
    crate::io::atomic_write(
        &paths::summary_path(root, req.phase, &req.task_name),
        summary.as_bytes(),
    )?;

    let checkpoints = Checkpoints::new(root)?;
    let checkpoint = checkpoints.commit(Category::Task, Some(req.phase), &req.task_name)?;

    Session::update(
        root,
        SessionPatch {
            phase: Some(Some(req.phase)),
            task: Some(Some(req.task_name.clone())),
            status: Some(format!("Task completed: {}", req.task_name)),
            ..Default::default()
        },
    )?;

    // Completion rule: the plan count upper-bounds the summaries required.
    let summaries = paths::summary_files(root, req.phase).len();
    let phase_complete = summaries >= plans;

    if phase_complete {
        roadmap.mark_complete(req.phase)?;
        roadmap.save(root)?;

        checkpoints.commit(Category::PhaseComplete, Some(req.phase), &entry.name)?;

        Session::update(
            root,
            SessionPatch {
                task: Some(Some("All tasks complete".into())),
                status: Some(format!("Phase {} fully executed", req.phase)),
                ..Default::default()
            },
        )?;
    }

    Ok(ExecuteOutcome {
        phase: req.phase,
        task: req.task_name,
        summaries,
        plans,
        phase_complete,
        checkpoint,
    })
}
