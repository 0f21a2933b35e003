//! Verification: run declared test commands against the working tree and
//! write the verdict artifacts. Verification never commits; a failing run
//! must leave history exactly as execution left it so debug and rollback
//! see an unpolluted log.

use crate::config::Config;
use crate::error::{PhasekitError, Result};
use crate::paths;
use crate::roadmap::Roadmap;
use crate::runner;
use crate::session::{Session, SessionPatch};
use crate::templates::{self, TestReportEntry};
use crate::types::Verdict;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyTest {
    pub description: String,
    pub command: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyRequest {
    pub phase: u32,
    pub tests: Vec<VerifyTest>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TestResult {
    pub description: String,
    pub command: String,
    pub passed: bool,
    pub evidence: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyOutcome {
    pub phase: u32,
    pub verdict: Verdict,
    pub passed: usize,
    pub failed: usize,
    pub results: Vec<TestResult>,
}

pub fn verify(root: &Path, req: VerifyRequest) -> Result<VerifyOutcome> {
    super::ensure_initialized(root)?;

    let roadmap = Roadmap::load(root)?;
    roadmap
        .get(req.phase)
        .ok_or(PhasekitError::PhaseNotFound(req.phase))?;

    let config = Config::load_or_default(root);
    let timeout = Duration::from_secs(config.verify.timeout_secs);
    let cap = config.verify.output_cap_bytes;

    let mut outcomes = Vec::with_capacity(req.tests.len());
    for test in &req.tests {
        tracing::debug!(command = %test.command, "running verification test");
        let outcome = runner::run_command(&test.command, root, timeout, cap);
        outcomes.push(outcome);
    }

    let entries: Vec<TestReportEntry<'_>> = req
        .tests
        .iter()
        .zip(&outcomes)
        .map(|(test, outcome)| TestReportEntry {
            description: &test.description,
            command: &test.command,
            passed: outcome.passed,
            evidence: &outcome.evidence,
            output: &outcome.output,
        })
        .collect();

    let passed = outcomes.iter().filter(|o| o.passed).count();
    let failed = outcomes.len() - passed;
    let verdict = if failed == 0 { Verdict::Pass } else { Verdict::Fail };

    crate::io::ensure_dir(&paths::phase_dir(root, req.phase))?;
    crate::io::atomic_write(
        &paths::verification_path(root, req.phase),
        templates::verification_doc(req.phase, &entries, verdict).as_bytes(),
    )?;
    crate::io::atomic_write(
        &paths::test_results_path(root, req.phase),
        templates::test_results_doc(req.phase, &entries).as_bytes(),
    )?;

    Session::update(
        root,
        SessionPatch {
            phase: Some(Some(req.phase)),
            status: Some(format!("Phase {} verification: {verdict}", req.phase)),
            ..Default::default()
        },
    )?;

    let results = req
        .tests
        .into_iter()
        .zip(outcomes)
        .map(|(test, outcome)| TestResult {
            description: test.description,
            command: test.command,
            passed: outcome.passed,
            evidence: outcome.evidence,
        })
        .collect();

    Ok(VerifyOutcome {
        phase: req.phase,
        verdict,
        passed,
        failed,
        results,
    })
}
