//! Quick-capture todo list stored as checkbox bullets in `.phasekit/TODO.md`.

use crate::error::{PhasekitError, Result};
use crate::paths;
use crate::templates;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

static PENDING_RE: OnceLock<Regex> = OnceLock::new();
static COMPLETED_RE: OnceLock<Regex> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn icon(self) -> &'static str {
        match self {
            Priority::High => "🔴",
            Priority::Medium => "🟡",
            Priority::Low => "🟢",
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(format!("unknown priority '{other}' (high|medium|low)")),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TodoList {
    pub pending: Vec<String>,
    pub completed: Vec<String>,
}

/// Insert a new unchecked item at the top of the Pending section.
pub fn add_item(root: &Path, item: &str, priority: Priority) -> Result<String> {
    let path = paths::todo_path(root);
    let text = crate::io::read_opt(&path)?.ok_or(PhasekitError::NotInitialized)?;

    let line = format!("- [ ] {} {item}", priority.icon());
    let updated = match text.find("## Pending\n") {
        Some(pos) => {
            let insert_at = pos + "## Pending\n".len();
            let mut t = text.clone();
            t.insert_str(insert_at, &format!("{line}\n"));
            t
        }
        None => format!("{}{line}\n", templates::todo_doc()),
    };
    crate::io::atomic_write(&path, updated.as_bytes())?;
    Ok(line)
}

/// Parse pending (`- [ ]`) and completed (`- [x]`) items from their sections.
pub fn list(root: &Path) -> Result<TodoList> {
    let path = paths::todo_path(root);
    let Some(text) = crate::io::read_opt(&path)? else {
        return Ok(TodoList::default());
    };

    let pending_re = PENDING_RE
        .get_or_init(|| Regex::new(r"## Pending\n((?s).*?)(?:\n## |\z)").unwrap());
    let completed_re = COMPLETED_RE
        .get_or_init(|| Regex::new(r"## Completed\n((?s).*?)\z").unwrap());

    let section_items = |re: &Regex, prefix: &str| -> Vec<String> {
        re.captures(&text)
            .map(|cap| {
                cap.get(1)
                    .unwrap()
                    .as_str()
                    .lines()
                    .filter(|l| l.starts_with(prefix))
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    };

    Ok(TodoList {
        pending: section_items(pending_re, "- [ ]"),
        completed: section_items(completed_re, "- [x]"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup(dir: &TempDir) {
        crate::io::atomic_write(
            &paths::todo_path(dir.path()),
            templates::todo_doc().as_bytes(),
        )
        .unwrap();
    }

    #[test]
    fn add_and_list() {
        let dir = TempDir::new().unwrap();
        setup(&dir);

        add_item(dir.path(), "Write docs", Priority::High).unwrap();
        add_item(dir.path(), "Tune cache", Priority::Low).unwrap();

        let todos = list(dir.path()).unwrap();
        assert_eq!(todos.pending.len(), 2);
        // Newest first
        assert!(todos.pending[0].contains("Tune cache"));
        assert!(todos.pending[0].contains("🟢"));
        assert!(todos.completed.is_empty());
    }

    #[test]
    fn completed_items_parsed() {
        let dir = TempDir::new().unwrap();
        crate::io::atomic_write(
            &paths::todo_path(dir.path()),
            b"# TODO.md\n\n## Pending\n- [ ] open\n\n## Completed\n- [x] done\n",
        )
        .unwrap();

        let todos = list(dir.path()).unwrap();
        assert_eq!(todos.pending.len(), 1);
        assert_eq!(todos.completed.len(), 1);
    }

    #[test]
    fn add_without_init_fails() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            add_item(dir.path(), "x", Priority::Medium),
            Err(PhasekitError::NotInitialized)
        ));
    }
}
