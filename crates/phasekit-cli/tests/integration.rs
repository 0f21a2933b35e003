use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn phasekit(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("phasekit").unwrap();
    cmd.current_dir(dir.path()).env("PHASEKIT_ROOT", dir.path());
    cmd
}

fn init_project(dir: &TempDir) {
    phasekit(dir)
        .args([
            "init",
            "--name",
            "demo",
            "--vision",
            "A demo project",
            "--phase",
            "Foundation: Scaffold the project",
            "--phase",
            "Engine: Build the core",
        ])
        .assert()
        .success();
}

fn finalize_spec(dir: &TempDir) {
    phasekit(dir).args(["spec", "finalize"]).assert().success();
}

fn write_plans(dir: &TempDir, count: usize) -> String {
    let plans: Vec<serde_json::Value> = (1..=count)
        .map(|i| {
            serde_json::json!({
                "name": format!("Plan {i}"),
                "wave": 1,
                "objective": format!("Objective {i}"),
                "tasks": [{
                    "name": format!("Task {i}"),
                    "action": "Do the work",
                    "verify": "true",
                    "done": "It works"
                }]
            })
        })
        .collect();
    let path = dir.path().join("plans.json");
    std::fs::write(&path, serde_json::to_string(&plans).unwrap()).unwrap();
    path.to_string_lossy().into_owned()
}

fn execute_task(dir: &TempDir, phase: &str, task: &str) {
    phasekit(dir)
        .args([
            "execute", "--phase", phase, "--task", task, "--result", "done",
        ])
        .assert()
        .success();
}

// ---------------------------------------------------------------------------
// phasekit init
// ---------------------------------------------------------------------------

#[test]
fn init_scaffolds_project_and_git() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    assert!(dir.path().join(".phasekit/SPEC.md").exists());
    assert!(dir.path().join(".phasekit/ROADMAP.md").exists());
    assert!(dir.path().join(".phasekit/STATE.md").exists());
    assert!(dir.path().join(".phasekit/JOURNAL.md").exists());
    assert!(dir.path().join(".phasekit/TODO.md").exists());
    assert!(dir.path().join(".phasekit/config.yaml").exists());
    assert!(dir.path().join(".phasekit/phases").is_dir());
    assert!(dir.path().join(".git").exists());
}

#[test]
fn init_refuses_to_run_twice() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    phasekit(&dir)
        .args(["init", "--name", "demo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));
}

// ---------------------------------------------------------------------------
// spec gate
// ---------------------------------------------------------------------------

#[test]
fn planning_blocked_until_spec_finalized() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    let plans = write_plans(&dir, 1);

    phasekit(&dir)
        .args(["plan", "--phase", "1", "--from", &plans])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not finalized"));

    finalize_spec(&dir);

    phasekit(&dir)
        .args(["plan", "--phase", "1", "--from", &plans])
        .assert()
        .success()
        .stdout(predicate::str::contains("Planned phase 1"));
}

// ---------------------------------------------------------------------------
// plan / execute
// ---------------------------------------------------------------------------

#[test]
fn plan_resolves_omitted_phase() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    finalize_spec(&dir);
    let plans = write_plans(&dir, 1);

    phasekit(&dir)
        .args(["plan", "--from", &plans])
        .assert()
        .success()
        .stdout(predicate::str::contains("Planned phase 1: Foundation"));
}

#[test]
fn execute_completes_phase_when_all_plans_summarized() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    finalize_spec(&dir);
    let plans = write_plans(&dir, 2);
    phasekit(&dir)
        .args(["plan", "--phase", "1", "--from", &plans])
        .assert()
        .success();

    execute_task(&dir, "1", "First task");

    phasekit(&dir)
        .args(["phase", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not Started"));

    phasekit(&dir)
        .args([
            "execute", "--phase", "1", "--task", "Second task", "--result", "done",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Phase 1 fully executed"));

    phasekit(&dir)
        .args(["phase", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Complete"));
}

#[test]
fn execute_without_plans_fails() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    finalize_spec(&dir);

    phasekit(&dir)
        .args(["execute", "--phase", "1", "--task", "t", "--result", "r"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no plans found for phase 1"));
}

// ---------------------------------------------------------------------------
// verify
// ---------------------------------------------------------------------------

#[test]
fn verify_pass_exits_zero() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    phasekit(&dir)
        .args(["verify", "--phase", "1", "--test", "echo works=echo ok"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PASS"));

    assert!(dir.path().join(".phasekit/phases/1/VERIFICATION.md").exists());
    assert!(dir.path().join(".phasekit/phases/1/TEST-RESULTS.md").exists());
}

#[test]
fn verify_fail_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    phasekit(&dir)
        .args([
            "verify", "--phase", "1", "--test", "passes=true", "--test", "fails=exit 2",
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("FAIL (1 passed, 1 failed)"));
}

// ---------------------------------------------------------------------------
// debug strikes
// ---------------------------------------------------------------------------

#[test]
fn fourth_debug_attempt_is_refused_until_resume() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    for issue in ["one", "two", "three"] {
        phasekit(&dir)
            .args(["debug", "--phase", "1", "--issue", issue])
            .assert()
            .success();
    }

    phasekit(&dir)
        .args(["debug", "--phase", "1", "--issue", "four"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("debug exhausted"));

    phasekit(&dir).arg("resume").assert().success();

    phasekit(&dir)
        .args(["debug", "--phase", "1", "--issue", "fresh start"])
        .assert()
        .success()
        .stdout(predicate::str::contains("strike 1/3"));
}

// ---------------------------------------------------------------------------
// rollback
// ---------------------------------------------------------------------------

#[test]
fn rollback_preview_reports_without_changing_anything() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    finalize_spec(&dir);
    let plans = write_plans(&dir, 3);
    phasekit(&dir)
        .args(["plan", "--phase", "1", "--from", &plans])
        .assert()
        .success();
    execute_task(&dir, "1", "First task");

    phasekit(&dir)
        .args(["rollback", "--phase", "1"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("3 plan file(s)")
                .and(predicate::str::contains("1 summary file(s)")),
        );

    // Still all there
    assert!(dir.path().join(".phasekit/phases/1/1-PLAN.md").exists());
    assert!(dir
        .path()
        .join(".phasekit/phases/1/first-task-SUMMARY.md")
        .exists());
}

#[test]
fn confirmed_rollback_restores_and_checkpoints() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    finalize_spec(&dir);
    let plans = write_plans(&dir, 1);
    phasekit(&dir)
        .args(["plan", "--phase", "1", "--from", &plans])
        .assert()
        .success();

    phasekit(&dir)
        .args(["rollback", "--phase", "1", "--confirm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rolled phase 1 back"));

    assert!(!dir.path().join(".phasekit/phases/1/1-PLAN.md").exists());

    phasekit(&dir)
        .args(["checkpoint", "log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rollback(phase-1):"));
}

#[test]
fn rollback_preview_without_safe_checkpoint_still_reports() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    // Phase 2 has no safe target, but a preview still succeeds with counts
    phasekit(&dir)
        .args(["rollback", "--phase", "2"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("none determinable")
                .and(predicate::str::contains("0 plan file(s)")),
        );
}

#[test]
fn rollback_fails_closed_without_safe_checkpoint() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    // Phase 2 never had a phase-complete(phase-1) predecessor
    phasekit(&dir)
        .args(["rollback", "--phase", "2", "--confirm"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no safe checkpoint"));
}

// ---------------------------------------------------------------------------
// roadmap surgery
// ---------------------------------------------------------------------------

#[test]
fn completed_phase_refuses_removal_and_roadmap_is_untouched() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    finalize_spec(&dir);
    let plans = write_plans(&dir, 1);
    phasekit(&dir)
        .args(["plan", "--phase", "1", "--from", &plans])
        .assert()
        .success();
    execute_task(&dir, "1", "Only task");

    let before = std::fs::read_to_string(dir.path().join(".phasekit/ROADMAP.md")).unwrap();
    phasekit(&dir)
        .args(["phase", "remove", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("roll it back"));
    let after = std::fs::read_to_string(dir.path().join(".phasekit/ROADMAP.md")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn milestone_phases_continue_numbering() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    phasekit(&dir)
        .args([
            "milestone",
            "v2.0",
            "--phase",
            "Alpha: First cut",
            "--phase",
            "Beta: Second cut",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("phase 3: Alpha").and(predicate::str::contains("phase 4: Beta")),
        );
}

// ---------------------------------------------------------------------------
// status / session / todo
// ---------------------------------------------------------------------------

#[test]
fn status_recommends_next_action_as_json() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    finalize_spec(&dir);

    let output = phasekit(&dir)
        .args(["--json", "status"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["project"], "demo");
    assert_eq!(report["phases_total"], 2);
    assert_eq!(report["next_action"], "Plan phase 1: phasekit plan");
}

#[test]
fn pause_then_resume_restores_status() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    phasekit(&dir)
        .args(["pause", "--summary", "stopping mid-plan"])
        .assert()
        .success();

    phasekit(&dir)
        .arg("resume")
        .assert()
        .success()
        .stdout(predicate::str::contains("stopping mid-plan"));
}

#[test]
fn todo_add_and_list() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    phasekit(&dir)
        .args(["todo", "add", "Write docs", "--priority", "high"])
        .assert()
        .success();

    phasekit(&dir)
        .args(["todo", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Write docs"));
}
