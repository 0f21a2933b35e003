pub mod checkpoint;
pub mod debug;
pub mod execute;
pub mod init;
pub mod milestone;
pub mod phase;
pub mod plan;
pub mod rollback;
pub mod session;
pub mod spec;
pub mod status;
pub mod todo;
pub mod verify;

use anyhow::bail;

/// Parse a `"Name: objective"` phase seed. The objective may be empty.
pub(crate) fn parse_phase_seed(raw: &str) -> anyhow::Result<(String, String)> {
    let (name, objective) = raw.split_once(':').unwrap_or((raw, ""));
    let name = name.trim();
    if name.is_empty() {
        bail!("empty phase name in '{raw}' (expected \"Name: objective\")");
    }
    Ok((name.to_string(), objective.trim().to_string()))
}
