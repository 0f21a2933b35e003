use thiserror::Error;

#[derive(Debug, Error)]
pub enum PhasekitError {
    #[error("not initialized: run 'phasekit init' first")]
    NotInitialized,

    #[error("project already initialized: use 'phasekit status' to see where you are")]
    AlreadyInitialized,

    #[error("SPEC.md is not finalized: run 'phasekit spec finalize' before planning")]
    SpecNotFinalized,

    #[error("phase {0} not found in ROADMAP.md")]
    PhaseNotFound(u32),

    #[error("no not-started phase left in ROADMAP.md: add one with 'phasekit phase add'")]
    NoPlannablePhase,

    #[error("no plans found for phase {0}: run 'phasekit plan' first")]
    NoPlansForPhase(u32),

    #[error("phase {0} is complete: roll it back before removing or re-planning it")]
    ProtectedComplete(u32),

    #[error("debug exhausted (3/3 strikes): pause this session and resume in a fresh one")]
    DebugExhausted,

    #[error("no safe checkpoint found for phase {0}: phases were not executed in order, refusing to guess")]
    NoSafeCheckpoint(u32),

    #[error("git not found in PATH: phasekit needs git for checkpoints")]
    GitNotFound,

    #[error("`{command}` failed: {detail}")]
    ExternalCommandFailed { command: String, detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PhasekitError>;
