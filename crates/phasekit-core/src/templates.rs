//! Renderers for the markdown documents the engine itself creates, parses,
//! or appends to. Deliberately minimal: only the structure the parsers and
//! checkpoint flow depend on, no prose boilerplate.

use crate::types::{PlanSpec, Verdict};
use chrono::Utc;
use std::fmt::Write as _;

pub const SPEC_DRAFT_MARKER: &str = "**Status**: DRAFT";
pub const SPEC_FINALIZED_MARKER: &str = "**Status**: FINALIZED";

fn bullet_list(items: &[String], empty: &str) -> String {
    if items.is_empty() {
        return empty.to_string();
    }
    items
        .iter()
        .map(|i| format!("- {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}

// ---------------------------------------------------------------------------
// Project documents
// ---------------------------------------------------------------------------

pub struct SpecSeed<'a> {
    pub project_name: &'a str,
    pub vision: &'a str,
    pub goals: &'a [String],
    pub non_goals: &'a [String],
    pub users: &'a str,
    pub constraints: &'a [String],
    pub success_criteria: &'a [String],
}

pub fn spec_doc(seed: &SpecSeed<'_>) -> String {
    format!(
        "# SPEC.md — {name}\n\n{draft}\n\n\
         ## Vision\n{vision}\n\n\
         ## Goals\n{goals}\n\n\
         ## Non-Goals\n{non_goals}\n\n\
         ## Users\n{users}\n\n\
         ## Constraints\n{constraints}\n\n\
         ## Success Criteria\n{criteria}\n",
        name = seed.project_name,
        draft = SPEC_DRAFT_MARKER,
        vision = seed.vision,
        goals = bullet_list(seed.goals, "- Not defined yet"),
        non_goals = bullet_list(seed.non_goals, "- Not defined yet"),
        users = seed.users,
        constraints = bullet_list(seed.constraints, "- None specified"),
        criteria = bullet_list(seed.success_criteria, "- Not defined yet"),
    )
}

pub fn roadmap_doc(milestone: &str, phases: &[(String, String)]) -> String {
    let mut doc = format!("# ROADMAP.md\n\n## Milestone: {milestone}\n");
    for (i, (name, objective)) in phases.iter().enumerate() {
        let number = i + 1;
        let _ = write!(
            doc,
            "\n### Phase {number}: {name}\n**Status**: ⬜ Not Started\n**Objective**: {objective}\n"
        );
    }
    doc
}

pub fn decisions_doc() -> String {
    "# DECISIONS.md — Decision Log\n\nRecorded decisions, newest last.\n".to_string()
}

pub fn journal_doc() -> String {
    "# JOURNAL.md — Running Journal\n".to_string()
}

pub fn todo_doc() -> String {
    "# TODO.md\n\n## Pending\n\n## Completed\n".to_string()
}

// ---------------------------------------------------------------------------
// Phase artifacts
// ---------------------------------------------------------------------------

pub fn plan_doc(phase: u32, index: usize, plan: &PlanSpec) -> String {
    let mut doc = format!(
        "# Plan {phase}.{index}: {name}\n\n\
         **Wave**: {wave}\n\
         **Objective**: {objective}\n\n",
        name = plan.name,
        wave = plan.wave,
        objective = plan.objective,
    );
    if !plan.context_files.is_empty() {
        let _ = write!(
            doc,
            "## Context\n{}\n\n",
            bullet_list(&plan.context_files, "")
        );
    }
    doc.push_str("## Tasks\n");
    for (i, task) in plan.tasks.iter().enumerate() {
        let _ = write!(
            doc,
            "\n### Task {n}: {name}\n\
             **Type**: {kind}\n\
             **Files**: {files}\n\
             **Action**: {action}\n\
             **Verify**: {verify}\n\
             **Done**: {done}\n",
            n = i + 1,
            name = task.name,
            kind = task.kind,
            files = if task.files.is_empty() {
                "none".to_string()
            } else {
                task.files.join(", ")
            },
            action = task.action,
            verify = task.verify,
            done = task.done,
        );
    }
    let _ = write!(
        doc,
        "\n## Success Criteria\n{}\n",
        bullet_list(&plan.success_criteria, "- None declared")
    );
    doc
}

pub fn summary_doc(task_name: &str, result: &str, files_changed: &[String]) -> String {
    format!(
        "# Task Summary: {task_name}\n\n\
         > **Completed**: {now}\n\n\
         ## Result\n{result}\n\n\
         ## Files Changed\n{files}\n",
        now = Utc::now().to_rfc3339(),
        files = bullet_list(files_changed, "Not specified"),
    )
}

pub struct TestReportEntry<'a> {
    pub description: &'a str,
    pub command: &'a str,
    pub passed: bool,
    pub evidence: &'a str,
    pub output: &'a str,
}

pub fn verification_doc(phase: u32, entries: &[TestReportEntry<'_>], verdict: Verdict) -> String {
    let mut doc = format!(
        "# Verification: Phase {phase}\n\n\
         > **Run**: {now}\n\n\
         **Verdict**: {verdict}\n\n\
         ## Checks\n",
        now = Utc::now().to_rfc3339(),
    );
    for entry in entries {
        let icon = if entry.passed { "✅" } else { "❌" };
        let _ = write!(
            doc,
            "- {icon} {desc} — {evidence}\n",
            desc = entry.description,
            evidence = entry.evidence,
        );
    }
    doc
}

pub fn test_results_doc(phase: u32, entries: &[TestReportEntry<'_>]) -> String {
    let mut doc = format!("# Test Results: Phase {phase}\n");
    for entry in entries {
        let _ = write!(
            doc,
            "\n## {desc}\n\
             **Command**: `{command}`\n\
             **Passed**: {passed}\n\n\
             ```\n{output}\n```\n",
            desc = entry.description,
            command = entry.command,
            passed = entry.passed,
            output = entry.output,
        );
    }
    doc
}

// ---------------------------------------------------------------------------
// Journal entries
// ---------------------------------------------------------------------------

pub fn debug_entry(
    phase: u32,
    strikes: u8,
    description: &str,
    hypothesis: Option<&str>,
    result: Option<&str>,
) -> String {
    let mut entry = format!(
        "\n### Debug Attempt (Strike {strikes}/3)\n\
         **Date**: {now}\n\
         **Phase**: {phase}\n\
         **Issue**: {description}\n",
        now = Utc::now().to_rfc3339(),
    );
    if let Some(h) = hypothesis {
        let _ = write!(entry, "**Hypothesis**: {h}\n");
    }
    let _ = write!(entry, "**Result**: {}\n", result.unwrap_or("Pending"));
    entry
}

pub fn rollback_entry(phase: u32, name: &str, target: &str, files_removed: usize) -> String {
    format!(
        "\n### Phase {phase} Rolled Back — {date}\n\
         - Phase \"{name}\" was reset to its pre-planning state\n\
         - Reset to checkpoint: {target}\n\
         - {files_removed} leftover file(s) cleaned up\n",
        date = Utc::now().format("%Y-%m-%d"),
    )
}

pub fn decision_entry(phase: u32, name: &str, target: &str) -> String {
    format!(
        "\n## {date}: Roll back phase {phase} ({name})\n\
         **Decision**: Reset the working tree to checkpoint {target} and re-plan the phase.\n\
         **Context**: The phase's executed work was discarded as unrecoverable.\n",
        date = Utc::now().format("%Y-%m-%d"),
    )
}

pub fn pause_entry(summary: &str) -> String {
    format!(
        "\n### Session Paused — {date}\n{summary}\n",
        date = Utc::now().format("%Y-%m-%d"),
    )
}
