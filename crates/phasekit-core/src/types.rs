use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// PhaseStatus
// ---------------------------------------------------------------------------

/// Roadmap status for a phase. Stored as free text in ROADMAP.md; classified
/// back into this closed enum by substring match at the parse boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseStatus {
    NotStarted,
    InProgress,
    Complete,
}

impl PhaseStatus {
    /// Classify a raw status line. A hand-edited line may carry several
    /// decorative tokens; precedence is complete > in-progress > not-started.
    pub fn classify(raw: &str) -> Self {
        if raw.contains("Complete") || raw.contains("✅") {
            PhaseStatus::Complete
        } else if raw.contains("In Progress") || raw.contains("🔄") {
            PhaseStatus::InProgress
        } else {
            PhaseStatus::NotStarted
        }
    }

    /// The canonical marker written back into ROADMAP.md.
    pub fn marker(self) -> &'static str {
        match self {
            PhaseStatus::NotStarted => "⬜ Not Started",
            PhaseStatus::InProgress => "🔄 In Progress",
            PhaseStatus::Complete => "✅ Complete",
        }
    }
}

impl fmt::Display for PhaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

/// Outcome of running a phase's verification tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Pass,
    Fail,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Verdict::Pass => "PASS",
            Verdict::Fail => "FAIL",
        })
    }
}

// ---------------------------------------------------------------------------
// TaskKind
// ---------------------------------------------------------------------------

/// How a declared task is expected to be carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TaskKind {
    #[default]
    #[serde(rename = "auto")]
    Auto,
    #[serde(rename = "checkpoint:human-verify")]
    HumanVerify,
    #[serde(rename = "checkpoint:decision")]
    Decision,
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TaskKind::Auto => "auto",
            TaskKind::HumanVerify => "checkpoint:human-verify",
            TaskKind::Decision => "checkpoint:decision",
        })
    }
}

// ---------------------------------------------------------------------------
// PlanSpec / TaskSpec
// ---------------------------------------------------------------------------

fn default_wave() -> u32 {
    1
}

/// A declared execution plan for a phase: an objective, a wave (parallel
/// grouping — lower waves logically precede higher ones, ordering is declared
/// here but not enforced), tasks, and success criteria.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSpec {
    pub name: String,
    #[serde(default = "default_wave")]
    pub wave: u32,
    pub objective: String,
    #[serde(default)]
    pub context_files: Vec<String>,
    pub tasks: Vec<TaskSpec>,
    #[serde(default)]
    pub success_criteria: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskSpec {
    pub name: String,
    #[serde(default)]
    pub files: Vec<String>,
    pub action: String,
    /// Command or check that proves the task is done.
    pub verify: String,
    /// Done criterion in prose.
    pub done: String,
    #[serde(default, rename = "type")]
    pub kind: TaskKind,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_precedence() {
        // Complete wins even when other tokens are present
        assert_eq!(
            PhaseStatus::classify("✅ Complete (was 🔄 In Progress)"),
            PhaseStatus::Complete
        );
        assert_eq!(
            PhaseStatus::classify("🔄 In Progress"),
            PhaseStatus::InProgress
        );
        assert_eq!(
            PhaseStatus::classify("⬜ Not Started"),
            PhaseStatus::NotStarted
        );
        // Unknown text defaults to not-started
        assert_eq!(PhaseStatus::classify("pending"), PhaseStatus::NotStarted);
    }

    #[test]
    fn classify_without_icons() {
        assert_eq!(PhaseStatus::classify("Complete"), PhaseStatus::Complete);
        assert_eq!(PhaseStatus::classify("In Progress"), PhaseStatus::InProgress);
    }

    #[test]
    fn verdict_display() {
        assert_eq!(Verdict::Pass.to_string(), "PASS");
        assert_eq!(Verdict::Fail.to_string(), "FAIL");
    }

    #[test]
    fn task_kind_serde() {
        let k: TaskKind = serde_json::from_str("\"checkpoint:human-verify\"").unwrap();
        assert_eq!(k, TaskKind::HumanVerify);
        assert_eq!(serde_json::to_string(&TaskKind::Auto).unwrap(), "\"auto\"");
    }
}
