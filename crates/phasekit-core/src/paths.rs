use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const META_DIR: &str = ".phasekit";
pub const PHASES_DIR: &str = ".phasekit/phases";

pub const SPEC_FILE: &str = ".phasekit/SPEC.md";
pub const ROADMAP_FILE: &str = ".phasekit/ROADMAP.md";
pub const STATE_FILE: &str = ".phasekit/STATE.md";
pub const DECISIONS_FILE: &str = ".phasekit/DECISIONS.md";
pub const JOURNAL_FILE: &str = ".phasekit/JOURNAL.md";
pub const TODO_FILE: &str = ".phasekit/TODO.md";
pub const CONFIG_FILE: &str = ".phasekit/config.yaml";

pub const PLAN_SUFFIX: &str = "-PLAN.md";
pub const SUMMARY_SUFFIX: &str = "-SUMMARY.md";
pub const VERIFICATION_FILE: &str = "VERIFICATION.md";
pub const TEST_RESULTS_FILE: &str = "TEST-RESULTS.md";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn meta_dir(root: &Path) -> PathBuf {
    root.join(META_DIR)
}

pub fn spec_path(root: &Path) -> PathBuf {
    root.join(SPEC_FILE)
}

pub fn roadmap_path(root: &Path) -> PathBuf {
    root.join(ROADMAP_FILE)
}

pub fn state_path(root: &Path) -> PathBuf {
    root.join(STATE_FILE)
}

pub fn decisions_path(root: &Path) -> PathBuf {
    root.join(DECISIONS_FILE)
}

pub fn journal_path(root: &Path) -> PathBuf {
    root.join(JOURNAL_FILE)
}

pub fn todo_path(root: &Path) -> PathBuf {
    root.join(TODO_FILE)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn phase_dir(root: &Path, phase: u32) -> PathBuf {
    root.join(PHASES_DIR).join(phase.to_string())
}

pub fn plan_path(root: &Path, phase: u32, index: usize) -> PathBuf {
    phase_dir(root, phase).join(format!("{index}{PLAN_SUFFIX}"))
}

pub fn summary_path(root: &Path, phase: u32, task_name: &str) -> PathBuf {
    phase_dir(root, phase).join(format!("{}{SUMMARY_SUFFIX}", normalize_task_name(task_name)))
}

pub fn verification_path(root: &Path, phase: u32) -> PathBuf {
    phase_dir(root, phase).join(VERIFICATION_FILE)
}

pub fn test_results_path(root: &Path, phase: u32) -> PathBuf {
    phase_dir(root, phase).join(TEST_RESULTS_FILE)
}

// ---------------------------------------------------------------------------
// Artifact listing
// ---------------------------------------------------------------------------

/// Normalize a task name into a summary-file stem: lowercase, runs of
/// whitespace collapsed to single hyphens.
pub fn normalize_task_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

fn list_with_suffix(dir: &Path, suffix: &str) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .filter_map(|e| e.ok())
        .filter_map(|e| e.file_name().into_string().ok())
        .filter(|name| name.ends_with(suffix))
        .collect();
    names.sort();
    names
}

/// Plan artifact filenames for a phase, sorted. Empty if the phase directory
/// does not exist.
pub fn plan_files(root: &Path, phase: u32) -> Vec<String> {
    list_with_suffix(&phase_dir(root, phase), PLAN_SUFFIX)
}

/// Summary artifact filenames for a phase, sorted.
pub fn summary_files(root: &Path, phase: u32) -> Vec<String> {
    list_with_suffix(&phase_dir(root, phase), SUMMARY_SUFFIX)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn path_helpers() {
        let root = Path::new("/tmp/proj");
        assert_eq!(
            roadmap_path(root),
            PathBuf::from("/tmp/proj/.phasekit/ROADMAP.md")
        );
        assert_eq!(
            plan_path(root, 2, 1),
            PathBuf::from("/tmp/proj/.phasekit/phases/2/1-PLAN.md")
        );
        assert_eq!(
            summary_path(root, 2, "Wire Up Parser"),
            PathBuf::from("/tmp/proj/.phasekit/phases/2/wire-up-parser-SUMMARY.md")
        );
    }

    #[test]
    fn normalize_task_names() {
        assert_eq!(normalize_task_name("Add login form"), "add-login-form");
        assert_eq!(normalize_task_name("  Trim   Me  "), "trim-me");
        assert_eq!(normalize_task_name("already-normal"), "already-normal");
    }

    #[test]
    fn list_plans_and_summaries() {
        let dir = TempDir::new().unwrap();
        let pdir = phase_dir(dir.path(), 1);
        std::fs::create_dir_all(&pdir).unwrap();
        std::fs::write(pdir.join("2-PLAN.md"), "b").unwrap();
        std::fs::write(pdir.join("1-PLAN.md"), "a").unwrap();
        std::fs::write(pdir.join("setup-SUMMARY.md"), "s").unwrap();
        std::fs::write(pdir.join("VERIFICATION.md"), "v").unwrap();

        assert_eq!(plan_files(dir.path(), 1), vec!["1-PLAN.md", "2-PLAN.md"]);
        assert_eq!(summary_files(dir.path(), 1), vec!["setup-SUMMARY.md"]);
        // Missing phase dir lists as empty
        assert!(plan_files(dir.path(), 9).is_empty());
    }
}
