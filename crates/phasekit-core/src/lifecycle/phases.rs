//! Roadmap surgery: add and remove phases, append milestones.
//!
//! These edit the roadmap document only; the next lifecycle checkpoint
//! snapshots the change along with everything else.

use crate::error::Result;
use crate::paths;
use crate::roadmap::{PhaseEntry, Roadmap};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Serialize)]
pub struct AddedPhase {
    pub number: u32,
    pub name: String,
}

pub fn add_phase(root: &Path, name: &str, objective: &str) -> Result<AddedPhase> {
    super::ensure_initialized(root)?;
    let mut roadmap = Roadmap::load(root)?;
    let number = roadmap.append_phase(name, objective);
    roadmap.save(root)?;
    Ok(AddedPhase {
        number,
        name: name.to_string(),
    })
}

/// Remove a phase and its artifact directory. Completed phases refuse
/// removal until rolled back; on refusal neither the document nor the
/// directory is touched.
pub fn remove_phase(root: &Path, number: u32) -> Result<PhaseEntry> {
    super::ensure_initialized(root)?;
    let mut roadmap = Roadmap::load(root)?;
    let entry = roadmap.remove_phase(number)?;
    roadmap.save(root)?;

    let dir = paths::phase_dir(root, number);
    if dir.exists() {
        if let Err(e) = std::fs::remove_dir_all(&dir) {
            tracing::warn!(path = %dir.display(), error = %e, "phase directory not removed");
        }
    }
    Ok(entry)
}

pub fn add_milestone(
    root: &Path,
    name: &str,
    phases: &[(String, String)],
) -> Result<Vec<AddedPhase>> {
    super::ensure_initialized(root)?;
    let mut roadmap = Roadmap::load(root)?;
    let numbers = roadmap.append_milestone(name, phases);
    roadmap.save(root)?;
    Ok(numbers
        .into_iter()
        .zip(phases)
        .map(|(number, (phase_name, _))| AddedPhase {
            number,
            name: phase_name.clone(),
        })
        .collect())
}

pub fn list_phases(root: &Path) -> Result<Vec<PhaseEntry>> {
    super::ensure_initialized(root)?;
    Ok(Roadmap::load(root)?.phases())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PhasekitError;
    use crate::lifecycle::testutil::seeded_project;
    use crate::types::PhaseStatus;
    use tempfile::TempDir;

    #[test]
    fn add_phase_continues_numbering() {
        let dir = TempDir::new().unwrap();
        seeded_project(dir.path());

        let added = add_phase(dir.path(), "Polish", "Make it shine").unwrap();
        assert_eq!(added.number, 3);

        let phases = list_phases(dir.path()).unwrap();
        assert_eq!(phases.len(), 3);
        assert_eq!(phases[2].status, PhaseStatus::NotStarted);
    }

    #[test]
    fn milestone_phases_never_collide() {
        let dir = TempDir::new().unwrap();
        seeded_project(dir.path());

        let added = add_milestone(
            dir.path(),
            "v2.0",
            &[
                ("Alpha".into(), "First".into()),
                ("Beta".into(), "Second".into()),
            ],
        )
        .unwrap();
        assert_eq!(added[0].number, 3);
        assert_eq!(added[1].number, 4);

        let roadmap = Roadmap::load(dir.path()).unwrap();
        assert!(roadmap.text().contains("## Milestone: v2.0"));
        assert_eq!(roadmap.phases().len(), 4);
    }

    #[test]
    fn remove_phase_deletes_artifacts() {
        let dir = TempDir::new().unwrap();
        seeded_project(dir.path());
        let pdir = paths::phase_dir(dir.path(), 2);
        std::fs::create_dir_all(&pdir).unwrap();
        std::fs::write(pdir.join("1-PLAN.md"), "p").unwrap();

        let entry = remove_phase(dir.path(), 2).unwrap();
        assert_eq!(entry.name, "Engine");
        assert!(!pdir.exists());
        assert!(Roadmap::load(dir.path()).unwrap().get(2).is_none());
    }

    #[test]
    fn completed_phase_refuses_removal_intact() {
        let dir = TempDir::new().unwrap();
        seeded_project(dir.path());
        let mut roadmap = Roadmap::load(dir.path()).unwrap();
        roadmap.mark_complete(1).unwrap();
        roadmap.save(dir.path()).unwrap();

        let before = std::fs::read_to_string(dir.path().join(".phasekit/ROADMAP.md")).unwrap();
        assert!(matches!(
            remove_phase(dir.path(), 1),
            Err(PhasekitError::ProtectedComplete(1))
        ));
        let after = std::fs::read_to_string(dir.path().join(".phasekit/ROADMAP.md")).unwrap();
        assert_eq!(before, after);
    }
}
