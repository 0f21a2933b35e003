//! Project initialization: scaffold the `.phasekit/` tree, seed the roadmap,
//! and record the init checkpoint every later rollback of phase 1 targets.

use crate::checkpoint::{Category, Checkpoints};
use crate::config::Config;
use crate::error::{PhasekitError, Result};
use crate::paths;
use crate::session::{Session, SessionPatch};
use crate::templates::{self, SpecSeed};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct PhaseSeed {
    pub name: String,
    pub objective: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InitRequest {
    pub project_name: String,
    pub vision: String,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub non_goals: Vec<String>,
    #[serde(default)]
    pub users: Option<String>,
    #[serde(default)]
    pub constraints: Vec<String>,
    #[serde(default)]
    pub success_criteria: Vec<String>,
    #[serde(default)]
    pub milestone: Option<String>,
    pub phases: Vec<PhaseSeed>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InitOutcome {
    pub project_name: String,
    pub phases: usize,
    pub files_created: Vec<String>,
    pub checkpoint: String,
}

pub fn init(root: &Path, req: InitRequest) -> Result<InitOutcome> {
    if paths::spec_path(root).exists() {
        return Err(PhasekitError::AlreadyInitialized);
    }

    let checkpoints = Checkpoints::new(root)?;
    checkpoints.init_repo()?;

    crate::io::ensure_dir(&root.join(paths::PHASES_DIR))?;

    let spec = templates::spec_doc(&SpecSeed {
        project_name: &req.project_name,
        vision: &req.vision,
        goals: &req.goals,
        non_goals: &req.non_goals,
        users: req.users.as_deref().unwrap_or("Not specified"),
        constraints: &req.constraints,
        success_criteria: &req.success_criteria,
    });
    crate::io::atomic_write(&paths::spec_path(root), spec.as_bytes())?;

    let seeds: Vec<(String, String)> = req
        .phases
        .iter()
        .map(|p| (p.name.clone(), p.objective.clone()))
        .collect();
    let roadmap = templates::roadmap_doc(req.milestone.as_deref().unwrap_or("v1.0"), &seeds);
    crate::io::atomic_write(&paths::roadmap_path(root), roadmap.as_bytes())?;

    crate::io::atomic_write(
        &paths::decisions_path(root),
        templates::decisions_doc().as_bytes(),
    )?;
    crate::io::atomic_write(
        &paths::journal_path(root),
        templates::journal_doc().as_bytes(),
    )?;
    crate::io::atomic_write(&paths::todo_path(root), templates::todo_doc().as_bytes())?;

    Config::new(&req.project_name).save(root)?;

    Session::update(
        root,
        SessionPatch {
            phase: Some(None),
            task: Some(Some("Project initialized".into())),
            status: Some("Ready for planning".into()),
            blockers: Some(Vec::new()),
            debug_strikes: Some(0),
        },
    )?;

    let checkpoint = checkpoints.commit(Category::Init, None, "")?;

    Ok(InitOutcome {
        project_name: req.project_name,
        phases: req.phases.len(),
        files_created: vec![
            paths::SPEC_FILE.into(),
            paths::ROADMAP_FILE.into(),
            paths::STATE_FILE.into(),
            paths::DECISIONS_FILE.into(),
            paths::JOURNAL_FILE.into(),
            paths::TODO_FILE.into(),
            paths::CONFIG_FILE.into(),
        ],
        checkpoint,
    })
}

/// Flip the SPEC.md status marker from DRAFT to FINALIZED. Planning refuses
/// to run until this happens. Idempotent.
pub fn finalize_spec(root: &Path) -> Result<()> {
    super::ensure_initialized(root)?;
    let path = paths::spec_path(root);
    let spec = std::fs::read_to_string(&path)?;
    if spec.contains("FINALIZED") {
        return Ok(());
    }
    let updated = if spec.contains(templates::SPEC_DRAFT_MARKER) {
        spec.replace(
            templates::SPEC_DRAFT_MARKER,
            templates::SPEC_FINALIZED_MARKER,
        )
    } else {
        format!("{spec}\n{}\n", templates::SPEC_FINALIZED_MARKER)
    };
    crate::io::atomic_write(&path, updated.as_bytes())
}
