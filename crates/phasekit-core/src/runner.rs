//! Bounded shell execution for verification test commands.
//!
//! Commands run via `sh -c` in the project directory. Stdout and stderr are
//! drained on dedicated threads (avoiding pipe-buffer deadlocks) and the
//! child is waited on through a waiter thread + `mpsc::recv_timeout`; on
//! timeout the process is killed and the test counts as failed.

use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct CommandOutcome {
    pub passed: bool,
    /// Combined stdout/stderr, capped to `cap` bytes keeping the tail.
    pub output: String,
    /// Short one-line evidence: exit status or timeout note.
    pub evidence: String,
}

pub fn run_command(command: &str, cwd: &Path, timeout: Duration, cap: usize) -> CommandOutcome {
    let mut child = match Command::new("sh")
        .arg("-c")
        .arg(command)
        .current_dir(cwd)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
    {
        Ok(c) => c,
        Err(e) => {
            return CommandOutcome {
                passed: false,
                output: String::new(),
                evidence: format!("failed to spawn: {e}"),
            }
        }
    };

    let child_pid = child.id();

    let stdout_handle = child.stdout.take();
    let stderr_handle = child.stderr.take();

    let stdout_thread = std::thread::spawn(move || -> String {
        let mut buf = String::new();
        if let Some(mut r) = stdout_handle {
            use std::io::Read;
            let _ = r.read_to_string(&mut buf);
        }
        buf
    });
    let stderr_thread = std::thread::spawn(move || -> String {
        let mut buf = String::new();
        if let Some(mut r) = stderr_handle {
            use std::io::Read;
            let _ = r.read_to_string(&mut buf);
        }
        buf
    });

    // The child is moved to a waiter thread; on timeout we kill by PID. The
    // waiter unblocks once the killed process exits and the reader threads
    // get EOF on the closed pipes.
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let _ = tx.send(child.wait());
    });

    let status = match rx.recv_timeout(timeout) {
        Ok(Ok(status)) => status,
        Ok(Err(e)) => {
            return CommandOutcome {
                passed: false,
                output: String::new(),
                evidence: format!("wait failed: {e}"),
            }
        }
        Err(_) => {
            kill_process(child_pid);
            let secs = timeout.as_secs();
            return CommandOutcome {
                passed: false,
                output: String::new(),
                evidence: format!("timed out after {secs}s"),
            };
        }
    };

    let stdout_buf = stdout_thread.join().unwrap_or_default();
    let stderr_buf = stderr_thread.join().unwrap_or_default();

    let combined = match (stdout_buf.is_empty(), stderr_buf.is_empty()) {
        (true, true) => String::new(),
        (false, true) => stdout_buf,
        (true, false) => stderr_buf,
        (false, false) => format!("{stdout_buf}\n{stderr_buf}"),
    };
    let output = cap_tail(combined.trim(), cap);

    let evidence = match status.code() {
        Some(0) => "exit 0".to_string(),
        Some(code) => match output.lines().next_back().filter(|l| !l.is_empty()) {
            Some(line) => format!("exit {code}: {line}"),
            None => format!("exit {code}"),
        },
        None => "killed by signal".to_string(),
    };

    CommandOutcome {
        passed: status.success(),
        output,
        evidence,
    }
}

/// Keep at most `cap` bytes from the end of `s`, respecting char boundaries.
fn cap_tail(s: &str, cap: usize) -> String {
    if s.len() <= cap {
        return s.to_string();
    }
    let mut start = s.len() - cap;
    while !s.is_char_boundary(start) {
        start += 1;
    }
    s[start..].to_string()
}

/// Terminate a process by PID using SIGKILL. Best-effort.
fn kill_process(pid: u32) {
    let _ = Command::new("kill")
        .arg("-9")
        .arg(pid.to_string())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
}
