use anyhow::Context;
use clap::Subcommand;
use phasekit_core::{lifecycle::init, paths};
use std::path::Path;

#[derive(Subcommand)]
pub enum SpecSubcommand {
    /// Print the specification document
    Show,
    /// Mark the specification FINALIZED, unlocking planning
    Finalize,
}

pub fn run(root: &Path, subcmd: SpecSubcommand, _json: bool) -> anyhow::Result<()> {
    match subcmd {
        SpecSubcommand::Show => {
            let text = std::fs::read_to_string(paths::spec_path(root))
                .context("no SPEC.md: run 'phasekit init' first")?;
            print!("{text}");
            Ok(())
        }
        SpecSubcommand::Finalize => {
            init::finalize_spec(root).context("finalize failed")?;
            println!("SPEC.md finalized: planning is unlocked");
            Ok(())
        }
    }
}
