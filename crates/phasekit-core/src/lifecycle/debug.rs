//! Debug attempts behind a three-strike circuit breaker.
//!
//! Each recorded attempt lands in the journal and bumps the session strike
//! counter. Once the breaker opens, further attempts are refused until a
//! resume resets the counter; the breaker never resets itself.

use crate::error::{PhasekitError, Result};
use crate::roadmap::Roadmap;
use crate::session::{Session, SessionPatch, DEBUG_STRIKE_CAP};
use crate::templates;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct DebugRequest {
    pub phase: u32,
    pub description: String,
    #[serde(default)]
    pub hypothesis: Option<String>,
    #[serde(default)]
    pub result: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DebugOutcome {
    pub phase: u32,
    pub strikes: u8,
    pub remaining: u8,
    pub exhausted: bool,
}

pub fn debug(root: &Path, req: DebugRequest) -> Result<DebugOutcome> {
    super::ensure_initialized(root)?;

    let roadmap = Roadmap::load(root)?;
    roadmap
        .get(req.phase)
        .ok_or(PhasekitError::PhaseNotFound(req.phase))?;

    // Refuse at the door when the breaker is already open; the attempt is
    // neither journaled nor counted.
    if Session::read(root)?.is_exhausted() {
        return Err(PhasekitError::DebugExhausted);
    }

    let strikes = Session::increment_debug_strike(root)?;

    super::append_journal(
        root,
        &templates::debug_entry(
            req.phase,
            strikes,
            &req.description,
            req.hypothesis.as_deref(),
            req.result.as_deref(),
        ),
    )?;

    let exhausted = strikes >= DEBUG_STRIKE_CAP;
    if exhausted {
        tracing::warn!(phase = req.phase, "debug strikes exhausted");
        Session::update(
            root,
            SessionPatch {
                phase: Some(Some(req.phase)),
                status: Some(format!(
                    "Debug exhausted on phase {}: pause and resume in a fresh session",
                    req.phase
                )),
                blockers: Some(vec![format!(
                    "Phase {} debugging hit the strike limit: {}",
                    req.phase, req.description
                )]),
                ..Default::default()
            },
        )?;
    } else {
        Session::update(
            root,
            SessionPatch {
                phase: Some(Some(req.phase)),
                status: Some(format!(
                    "Debugging phase {} (strike {strikes}/{DEBUG_STRIKE_CAP})",
                    req.phase
                )),
                ..Default::default()
            },
        )?;
    }

    Ok(DebugOutcome {
        phase: req.phase,
        strikes,
        remaining: DEBUG_STRIKE_CAP - strikes,
        exhausted,
    })
}
