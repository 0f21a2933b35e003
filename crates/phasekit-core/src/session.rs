//! The single current-session record, persisted at `.phasekit/STATE.md`.
//!
//! The on-disk form is a fixed-section markdown document regenerated in full
//! on every update (a render, not a patch). Field labels and section headers
//! are a stable contract: `read()` must parse back every field except the
//! trailing prose section.

use crate::error::Result;
use crate::paths;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// Strikes at or above this count open the debug circuit breaker.
pub const DEBUG_STRIKE_CAP: u8 = 3;

static PHASE_RE: OnceLock<Regex> = OnceLock::new();
static TASK_RE: OnceLock<Regex> = OnceLock::new();
static STATUS_RE: OnceLock<Regex> = OnceLock::new();
static STRIKES_RE: OnceLock<Regex> = OnceLock::new();
static BLOCKERS_RE: OnceLock<Regex> = OnceLock::new();

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub phase: Option<u32>,
    pub task: Option<String>,
    pub status: String,
    pub blockers: Vec<String>,
    pub debug_strikes: u8,
    pub last_updated: DateTime<Utc>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            phase: None,
            task: None,
            status: "Not initialized".to_string(),
            blockers: Vec::new(),
            debug_strikes: 0,
            last_updated: Utc::now(),
        }
    }
}

/// Partial update with merge semantics: only the fields a caller sets are
/// changed, everything else carries over from the stored session.
#[derive(Debug, Clone, Default)]
pub struct SessionPatch {
    pub phase: Option<Option<u32>>,
    pub task: Option<Option<String>>,
    pub status: Option<String>,
    pub blockers: Option<Vec<String>>,
    pub debug_strikes: Option<u8>,
}

impl Session {
    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Read the session, defaulting when the document does not exist yet.
    pub fn read(root: &Path) -> Result<Self> {
        match crate::io::read_opt(&paths::state_path(root))? {
            Some(text) => Ok(Self::parse(&text)),
            None => Ok(Self::default()),
        }
    }

    /// Read-merge-write: apply `patch` over the stored fields, stamp
    /// `last_updated`, and rewrite the whole document.
    pub fn update(root: &Path, patch: SessionPatch) -> Result<Self> {
        let mut session = Self::read(root)?;
        if let Some(phase) = patch.phase {
            session.phase = phase;
        }
        if let Some(task) = patch.task {
            session.task = task;
        }
        if let Some(status) = patch.status {
            session.status = status;
        }
        if let Some(blockers) = patch.blockers {
            session.blockers = blockers;
        }
        if let Some(strikes) = patch.debug_strikes {
            session.debug_strikes = strikes.min(DEBUG_STRIKE_CAP);
        }
        session.last_updated = Utc::now();
        crate::io::atomic_write(&paths::state_path(root), session.render().as_bytes())?;
        Ok(session)
    }

    // -----------------------------------------------------------------------
    // Debug circuit breaker
    // -----------------------------------------------------------------------

    /// Bump the strike counter, saturating at the cap. Returns the new count.
    pub fn increment_debug_strike(root: &Path) -> Result<u8> {
        let current = Self::read(root)?.debug_strikes;
        let next = current.saturating_add(1).min(DEBUG_STRIKE_CAP);
        Self::update(
            root,
            SessionPatch {
                debug_strikes: Some(next),
                ..Default::default()
            },
        )?;
        Ok(next)
    }

    /// Clear the strike counter. Only the recovery workflow (resume) calls
    /// this; the breaker never resets itself.
    pub fn reset_debug_strikes(root: &Path) -> Result<()> {
        Self::update(
            root,
            SessionPatch {
                debug_strikes: Some(0),
                ..Default::default()
            },
        )?;
        Ok(())
    }

    pub fn is_exhausted(&self) -> bool {
        self.debug_strikes >= DEBUG_STRIKE_CAP
    }

    // -----------------------------------------------------------------------
    // Render / parse
    // -----------------------------------------------------------------------

    pub fn render(&self) -> String {
        let phase = self
            .phase
            .map(|n| n.to_string())
            .unwrap_or_else(|| "None".to_string());
        let task = self.task.as_deref().unwrap_or("None");
        let blockers = if self.blockers.is_empty() {
            "None".to_string()
        } else {
            self.blockers
                .iter()
                .map(|b| format!("- {b}"))
                .collect::<Vec<_>>()
                .join("\n")
        };
        format!(
            "# STATE.md — Project Memory\n\n\
             > **Last Updated**: {}\n\n\
             ## Current Position\n\
             - **Phase**: {phase}\n\
             - **Task**: {task}\n\
             - **Status**: {status}\n\
             - **Debug Strikes**: {strikes}\n\n\
             ## Blockers\n\
             {blockers}\n\n\
             ## Last Session Summary\n\
             {status}\n",
            self.last_updated.to_rfc3339(),
            status = self.status,
            strikes = self.debug_strikes,
        )
    }

    pub fn parse(text: &str) -> Self {
        let phase_re = PHASE_RE
            .get_or_init(|| Regex::new(r"\*\*Phase\*\*:[ \t]*(\d+)").unwrap());
        let task_re = TASK_RE.get_or_init(|| Regex::new(r"\*\*Task\*\*:[ \t]*(.+)").unwrap());
        let status_re =
            STATUS_RE.get_or_init(|| Regex::new(r"\*\*Status\*\*:[ \t]*(.+)").unwrap());
        let strikes_re = STRIKES_RE
            .get_or_init(|| Regex::new(r"\*\*Debug Strikes\*\*:[ \t]*(\d+)").unwrap());

        let phase = phase_re
            .captures(text)
            .and_then(|c| c.get(1).unwrap().as_str().parse().ok());
        let task = task_re
            .captures(text)
            .map(|c| c.get(1).unwrap().as_str().trim().to_string())
            .filter(|t| t != "None");
        let status = status_re
            .captures(text)
            .map(|c| c.get(1).unwrap().as_str().trim().to_string())
            .unwrap_or_else(|| "Unknown".to_string());
        let debug_strikes = strikes_re
            .captures(text)
            .and_then(|c| c.get(1).unwrap().as_str().parse::<u8>().ok())
            .unwrap_or(0)
            .min(DEBUG_STRIKE_CAP);

        Self {
            phase,
            task,
            status,
            blockers: parse_blockers(text),
            debug_strikes,
            last_updated: Utc::now(),
        }
    }
}

/// Bullet items under `## Blockers`, up to the next section. The sentinel
/// single item "None" means empty and is never a real blocker.
fn parse_blockers(text: &str) -> Vec<String> {
    let re = BLOCKERS_RE
        .get_or_init(|| Regex::new(r"## Blockers\n((?s).*?)(?:\n## |\z)").unwrap());
    let Some(cap) = re.captures(text) else {
        return Vec::new();
    };
    cap.get(1)
        .unwrap()
        .as_str()
        .lines()
        .filter_map(|l| l.strip_prefix("- "))
        .map(str::trim)
        .filter(|l| !l.is_empty() && *l != "None")
        .map(String::from)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
