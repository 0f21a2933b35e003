mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{
    checkpoint::CheckpointSubcommand, phase::PhaseSubcommand, spec::SpecSubcommand,
    todo::TodoSubcommand,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "phasekit",
    about = "Phase lifecycle engine — plan, execute, verify, debug, and roll back phased work",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .phasekit/ or .git/)
    #[arg(long, global = true, env = "PHASEKIT_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a phasekit project in the current directory
    Init {
        /// Project name (default: directory name)
        #[arg(long)]
        name: Option<String>,

        /// One-line project vision
        #[arg(long, default_value = "Not defined yet")]
        vision: String,

        /// Milestone label for the initial roadmap
        #[arg(long)]
        milestone: Option<String>,

        /// Phase seed as "Name: objective" (repeatable, in order)
        #[arg(long = "phase", value_name = "NAME: OBJECTIVE")]
        phases: Vec<String>,

        /// Project goal (repeatable)
        #[arg(long = "goal")]
        goals: Vec<String>,

        /// Explicit non-goal (repeatable)
        #[arg(long = "non-goal")]
        non_goals: Vec<String>,
    },

    /// Inspect or finalize the project specification
    Spec {
        #[command(subcommand)]
        subcommand: SpecSubcommand,
    },

    /// Write execution plans for a phase from a JSON plan file
    Plan {
        /// Phase number (default: first not-started phase)
        #[arg(long)]
        phase: Option<u32>,

        /// JSON file holding an array of plans ("-" for stdin)
        #[arg(long, default_value = "-")]
        from: String,
    },

    /// Record a completed task for a phase
    Execute {
        #[arg(long)]
        phase: u32,

        /// Task name (summary artifacts are keyed by its normalized form)
        #[arg(long)]
        task: String,

        /// What was accomplished
        #[arg(long)]
        result: String,

        /// Changed file (repeatable)
        #[arg(long = "file")]
        files: Vec<String>,
    },

    /// Run verification tests for a phase and record the verdict
    Verify {
        #[arg(long)]
        phase: u32,

        /// Test as "description=command" (repeatable)
        #[arg(long = "test", value_name = "DESC=COMMAND")]
        tests: Vec<String>,
    },

    /// Record a debug attempt (three strikes, then the breaker opens)
    Debug {
        #[arg(long)]
        phase: u32,

        /// What is broken
        #[arg(long)]
        issue: String,

        #[arg(long)]
        hypothesis: Option<String>,

        /// Outcome of the attempt, if known
        #[arg(long)]
        result: Option<String>,
    },

    /// Roll a phase back to the checkpoint that preceded it
    Rollback {
        #[arg(long)]
        phase: u32,

        /// Actually perform the rollback (omit to preview)
        #[arg(long)]
        confirm: bool,
    },

    /// Manage roadmap phases
    Phase {
        #[command(subcommand)]
        subcommand: PhaseSubcommand,
    },

    /// Append a milestone with its phases to the roadmap
    Milestone {
        name: String,

        /// Phase seed as "Name: objective" (repeatable, in order)
        #[arg(long = "phase", value_name = "NAME: OBJECTIVE")]
        phases: Vec<String>,
    },

    /// Show project progress and the recommended next action
    Status,

    /// Pause the session with a handoff summary
    Pause {
        #[arg(long)]
        summary: String,
    },

    /// Restore context at the start of a session (clears debug strikes)
    Resume,

    /// Quick-capture todo list
    Todo {
        #[command(subcommand)]
        subcommand: TodoSubcommand,
    },

    /// Inspect checkpoint history
    Checkpoint {
        #[command(subcommand)]
        subcommand: CheckpointSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init {
            name,
            vision,
            milestone,
            phases,
            goals,
            non_goals,
        } => cmd::init::run(
            &root,
            name.as_deref(),
            &vision,
            milestone.as_deref(),
            &phases,
            goals,
            non_goals,
            cli.json,
        ),
        Commands::Spec { subcommand } => cmd::spec::run(&root, subcommand, cli.json),
        Commands::Plan { phase, from } => cmd::plan::run(&root, phase, &from, cli.json),
        Commands::Execute {
            phase,
            task,
            result,
            files,
        } => cmd::execute::run(&root, phase, &task, &result, files, cli.json),
        Commands::Verify { phase, tests } => cmd::verify::run(&root, phase, &tests, cli.json),
        Commands::Debug {
            phase,
            issue,
            hypothesis,
            result,
        } => cmd::debug::run(&root, phase, &issue, hypothesis, result, cli.json),
        Commands::Rollback { phase, confirm } => cmd::rollback::run(&root, phase, confirm, cli.json),
        Commands::Phase { subcommand } => cmd::phase::run(&root, subcommand, cli.json),
        Commands::Milestone { name, phases } => {
            cmd::milestone::run(&root, &name, &phases, cli.json)
        }
        Commands::Status => cmd::status::run(&root, cli.json),
        Commands::Pause { summary } => cmd::session::pause(&root, &summary, cli.json),
        Commands::Resume => cmd::session::resume(&root, cli.json),
        Commands::Todo { subcommand } => cmd::todo::run(&root, subcommand, cli.json),
        Commands::Checkpoint { subcommand } => cmd::checkpoint::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
