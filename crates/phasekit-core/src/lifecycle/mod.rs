//! The phase lifecycle orchestrator: plan, execute, verify, debug, and
//! rollback, plus project setup and roadmap/session management.
//!
//! Each operation is invoked independently against a project root, validates
//! the stores it needs, mutates on-disk artifacts, and records a checkpoint
//! where the lifecycle defines one. Operations are synchronous and assume the
//! external driver serializes calls; there is no locking.

pub mod debug;
pub mod execute;
pub mod init;
pub mod phases;
pub mod plan;
pub mod rollback;
pub mod session_ops;
pub mod verify;

use crate::error::{PhasekitError, Result};
use crate::paths;
use crate::templates;
use std::path::Path;

/// A project exists once its specification document does.
pub(crate) fn ensure_initialized(root: &Path) -> Result<()> {
    if paths::spec_path(root).exists() {
        Ok(())
    } else {
        Err(PhasekitError::NotInitialized)
    }
}

pub(crate) fn ensure_spec_finalized(root: &Path) -> Result<()> {
    let spec = std::fs::read_to_string(paths::spec_path(root))
        .map_err(|_| PhasekitError::NotInitialized)?;
    if spec.contains("FINALIZED") {
        Ok(())
    } else {
        Err(PhasekitError::SpecNotFinalized)
    }
}

pub(crate) fn append_journal(root: &Path, entry: &str) -> Result<()> {
    let path = paths::journal_path(root);
    if !path.exists() {
        crate::io::atomic_write(&path, templates::journal_doc().as_bytes())?;
    }
    crate::io::append_text(&path, entry)
}

pub(crate) fn append_decision(root: &Path, entry: &str) -> Result<()> {
    let path = paths::decisions_path(root);
    if !path.exists() {
        crate::io::atomic_write(&path, templates::decisions_doc().as_bytes())?;
    }
    crate::io::append_text(&path, entry)
}
