//! Planning: write one `<index>-PLAN.md` artifact per declared plan into the
//! phase directory and checkpoint the lot. A phase with plan artifacts is
//! "planned" — there is no separate marker in the roadmap.

use crate::checkpoint::{Category, Checkpoints};
use crate::error::{PhasekitError, Result};
use crate::paths;
use crate::roadmap::Roadmap;
use crate::session::{Session, SessionPatch};
use crate::templates;
use crate::types::{PhaseStatus, PlanSpec};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct PlanRequest {
    /// Omitted: resolve to the first not-started phase in the roadmap.
    #[serde(default)]
    pub phase: Option<u32>,
    pub plans: Vec<PlanSpec>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanOutcome {
    pub phase: u32,
    pub phase_name: String,
    pub plans_created: Vec<String>,
    /// (wave, plan names) groups in wave order, as declared.
    pub waves: Vec<(u32, Vec<String>)>,
    pub checkpoint: String,
}

pub fn plan(root: &Path, req: PlanRequest) -> Result<PlanOutcome> {
    super::ensure_initialized(root)?;
    super::ensure_spec_finalized(root)?;

    let roadmap = Roadmap::load(root)?;
    let number = match req.phase {
        Some(n) => n,
        None => roadmap
            .next_not_started()
            .ok_or(PhasekitError::NoPlannablePhase)?,
    };
    let entry = roadmap
        .get(number)
        .ok_or(PhasekitError::PhaseNotFound(number))?;

    // A completed phase must go through rollback before it can be re-planned.
    if entry.status == PhaseStatus::Complete {
        return Err(PhasekitError::ProtectedComplete(number));
    }

    crate::io::ensure_dir(&paths::phase_dir(root, number))?;

    let mut plans_created = Vec::with_capacity(req.plans.len());
    for (i, spec) in req.plans.iter().enumerate() {
        let index = i + 1;
        let doc = templates::plan_doc(number, index, spec);
        crate::io::atomic_write(&paths::plan_path(root, number, index), doc.as_bytes())?;
        plans_created.push(format!(
            "{}/{number}/{index}{}",
            paths::PHASES_DIR,
            paths::PLAN_SUFFIX
        ));
    }

    Session::update(
        root,
        SessionPatch {
            phase: Some(Some(number)),
            task: Some(Some("Planning complete".into())),
            status: Some("Ready for execution".into()),
            ..Default::default()
        },
    )?;

    let checkpoints = Checkpoints::new(root)?;
    let checkpoint = checkpoints.commit(Category::Plan, Some(number), "create execution plans")?;

    let mut waves: Vec<(u32, Vec<String>)> = Vec::new();
    for spec in &req.plans {
        match waves.iter_mut().find(|(w, _)| *w == spec.wave) {
            Some((_, names)) => names.push(spec.name.clone()),
            None => waves.push((spec.wave, vec![spec.name.clone()])),
        }
    }
    waves.sort_by_key(|(w, _)| *w);

    Ok(PlanOutcome {
        phase: number,
        phase_name: entry.name,
        plans_created,
        waves,
        checkpoint,
    })
}
