use crate::output::print_json;
use anyhow::Context;
use clap::Subcommand;
use phasekit_core::todo::{self, Priority};
use std::path::Path;

#[derive(Subcommand)]
pub enum TodoSubcommand {
    /// Capture a todo item
    Add {
        item: String,
        /// high | medium | low
        #[arg(long, default_value = "medium")]
        priority: Priority,
    },
    /// List pending and completed items
    List,
}

pub fn run(root: &Path, subcmd: TodoSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        TodoSubcommand::Add { item, priority } => {
            let line = todo::add_item(root, &item, priority).context("todo add failed")?;
            if json {
                print_json(&serde_json::json!({ "added": line }))?;
            } else {
                println!("Added: {line}");
            }
            Ok(())
        }
        TodoSubcommand::List => {
            let todos = todo::list(root).context("todo list failed")?;
            if json {
                return print_json(&todos);
            }
            println!("Pending ({}):", todos.pending.len());
            for item in &todos.pending {
                println!("  {item}");
            }
            println!("Completed ({}):", todos.completed.len());
            for item in &todos.completed {
                println!("  {item}");
            }
            Ok(())
        }
    }
}
