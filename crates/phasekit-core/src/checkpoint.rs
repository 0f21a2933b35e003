//! Checkpoints: lifecycle events mapped onto git commits.
//!
//! The commit subject is the only queryable index into history. Phase-scoped
//! categories use `<category>(phase-<N>): <label>` so an exact prefix match
//! can never confuse phase 1 with phase 11; global categories use plain
//! imperative subjects.

use crate::error::{PhasekitError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

pub const INIT_SUBJECT: &str = "chore: initialize phasekit project";

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Init,
    Plan,
    Task,
    PhaseComplete,
    Rollback,
}

impl Category {
    fn keyword(self) -> &'static str {
        match self {
            Category::Init => "chore",
            Category::Plan => "plan",
            Category::Task => "task",
            Category::PhaseComplete => "phase-complete",
            Category::Rollback => "rollback",
        }
    }

    /// Commit subject for this category. Phase-scoped categories require a
    /// phase number; `Init` ignores both arguments.
    pub fn subject(self, phase: Option<u32>, label: &str) -> String {
        match (self, phase) {
            (Category::Init, _) => INIT_SUBJECT.to_string(),
            (cat, Some(n)) => format!("{}(phase-{n}): {label}", cat.keyword()),
            (cat, None) => format!("{}: {label}", cat.keyword()),
        }
    }

    /// Exact-match prefix for log filtering.
    fn prefix(self, phase: u32) -> String {
        format!("{}(phase-{phase}):", self.keyword())
    }
}

// ---------------------------------------------------------------------------
// Checkpoint
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Checkpoint {
    pub id: String,
    pub subject: String,
}

// ---------------------------------------------------------------------------
// Checkpoints adapter
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct Checkpoints {
    root: PathBuf,
}

impl Checkpoints {
    /// Fails fast when git is not on the PATH.
    pub fn new(root: &Path) -> Result<Self> {
        which::which("git").map_err(|_| PhasekitError::GitNotFound)?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    fn git(&self, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()
            .map_err(|e| PhasekitError::ExternalCommandFailed {
                command: format!("git {}", args.join(" ")),
                detail: e.to_string(),
            })?;
        if !output.status.success() {
            // Surface stderr verbatim; callers decide what is fatal.
            return Err(PhasekitError::ExternalCommandFailed {
                command: format!("git {}", args.join(" ")),
                detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    pub fn is_repo(&self) -> bool {
        self.root.join(".git").exists()
    }

    /// Idempotent `git init`, plus a repo-local fallback identity so commits
    /// work on machines with no global git config.
    pub fn init_repo(&self) -> Result<()> {
        if !self.is_repo() {
            self.git(&["init"])?;
        }
        if self.git(&["config", "user.email"]).is_err() {
            self.git(&["config", "user.email", "phasekit@localhost"])?;
            self.git(&["config", "user.name", "phasekit"])?;
        }
        Ok(())
    }

    /// Stage *all* pending changes and commit. Every checkpoint is a
    /// consistent snapshot of the whole project tree, not just the lifecycle
    /// files; `--allow-empty` keeps re-runs from losing their marker commit.
    /// Returns the new commit id.
    pub fn commit(&self, category: Category, phase: Option<u32>, label: &str) -> Result<String> {
        let subject = category.subject(phase, label);
        self.git(&["add", "-A"])?;
        self.git(&["commit", "--allow-empty", "-m", &subject])?;
        self.git(&["rev-parse", "HEAD"])
    }

    /// Full history, newest first.
    pub fn log(&self) -> Result<Vec<Checkpoint>> {
        let out = self.git(&["log", "--pretty=format:%H\t%s"])?;
        Ok(out
            .lines()
            .filter_map(|line| {
                let (id, subject) = line.split_once('\t')?;
                Some(Checkpoint {
                    id: id.to_string(),
                    subject: subject.to_string(),
                })
            })
            .collect())
    }

    /// Newest checkpoint matching a category (and phase, for phase-scoped
    /// categories).
    pub fn find(&self, category: Category, phase: Option<u32>) -> Result<Option<Checkpoint>> {
        let log = self.log()?;
        Ok(log.into_iter().find(|c| match (category, phase) {
            (Category::Init, _) => c.subject == INIT_SUBJECT,
            (cat, Some(n)) => c.subject.starts_with(&cat.prefix(n)),
            (cat, None) => c.subject.starts_with(&format!("{}(", cat.keyword())),
        }))
    }

    /// The checkpoint that captured the tree immediately before `phase`
    /// began: the init checkpoint for phase 1, otherwise the newest
    /// phase-complete checkpoint of the previous phase. `None` when phases
    /// were not executed strictly in order — callers must fail closed.
    pub fn rollback_target(&self, phase: u32) -> Result<Option<Checkpoint>> {
        if phase <= 1 {
            self.find(Category::Init, None)
        } else {
            self.find(Category::PhaseComplete, Some(phase - 1))
        }
    }

    /// Discard all working-tree changes since `id`.
    pub fn reset_hard(&self, id: &str) -> Result<()> {
        self.git(&["reset", "--hard", id])?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
