//! The roadmap store: an ordered list of phases persisted as repeated
//! `### Phase <N>: <name>` blocks in `.phasekit/ROADMAP.md`.
//!
//! The document is the only source of truth for phase order; there is no
//! separate index. Mutations splice the full text and rewrite the whole file,
//! so concurrent external edits between read and write are last-writer-wins.

use crate::error::{PhasekitError, Result};
use crate::paths;
use crate::types::PhaseStatus;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

static HEADING_RE: OnceLock<Regex> = OnceLock::new();
static STATUS_RE: OnceLock<Regex> = OnceLock::new();

fn heading_re() -> &'static Regex {
    HEADING_RE.get_or_init(|| Regex::new(r"(?m)^### Phase (\d+):[ \t]*(.+)$").unwrap())
}

fn status_re() -> &'static Regex {
    STATUS_RE.get_or_init(|| Regex::new(r"(?m)^\*\*Status\*\*:[ \t]*(.+)$").unwrap())
}

// ---------------------------------------------------------------------------
// PhaseEntry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct PhaseEntry {
    pub number: u32,
    pub name: String,
    pub status: PhaseStatus,
    /// The raw status line text, preserved for display.
    pub raw_status: String,
}

/// One parsed block: entry plus its byte range within the document.
struct Block {
    entry: PhaseEntry,
    start: usize,
    end: usize,
    /// Byte range of the `**Status**:` line within the document, if present.
    status_line: Option<(usize, usize)>,
}

// ---------------------------------------------------------------------------
// Roadmap
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Roadmap {
    text: String,
}

impl Roadmap {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::roadmap_path(root);
        if !path.exists() {
            return Err(PhasekitError::NotInitialized);
        }
        Ok(Self::new(std::fs::read_to_string(&path)?))
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        crate::io::atomic_write(&paths::roadmap_path(root), self.text.as_bytes())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    // -----------------------------------------------------------------------
    // Parsing
    // -----------------------------------------------------------------------

    /// A block starts at a phase heading and runs to the next heading or end
    /// of text; arbitrary prose (objectives, notes) may sit in between. The
    /// status line is matched anywhere inside the block.
    fn blocks(&self) -> Vec<Block> {
        let headings: Vec<(usize, u32, String)> = heading_re()
            .captures_iter(&self.text)
            .filter_map(|cap| {
                let m = cap.get(0)?;
                let number: u32 = cap.get(1)?.as_str().parse().ok()?;
                let name = cap.get(2)?.as_str().trim().to_string();
                Some((m.start(), number, name))
            })
            .collect();

        let mut blocks = Vec::with_capacity(headings.len());
        for (i, (start, number, name)) in headings.iter().enumerate() {
            let end = headings
                .get(i + 1)
                .map(|(s, _, _)| *s)
                .unwrap_or(self.text.len());
            let body = &self.text[*start..end];

            let (raw_status, status_line) = match status_re().captures(body) {
                Some(cap) => {
                    let m = cap.get(0).unwrap();
                    (
                        cap.get(1).unwrap().as_str().trim().to_string(),
                        Some((start + m.start(), start + m.end())),
                    )
                }
                None => (String::new(), None),
            };

            blocks.push(Block {
                entry: PhaseEntry {
                    number: *number,
                    name: name.clone(),
                    status: PhaseStatus::classify(&raw_status),
                    raw_status,
                },
                start: *start,
                end,
                status_line,
            });
        }
        blocks
    }

    /// All phases in document order.
    pub fn phases(&self) -> Vec<PhaseEntry> {
        self.blocks().into_iter().map(|b| b.entry).collect()
    }

    pub fn get(&self, number: u32) -> Option<PhaseEntry> {
        self.phases().into_iter().find(|p| p.number == number)
    }

    /// First phase whose status classifies as not-started.
    pub fn next_not_started(&self) -> Option<u32> {
        self.phases()
            .into_iter()
            .find(|p| p.status == PhaseStatus::NotStarted)
            .map(|p| p.number)
    }

    fn next_number(&self) -> u32 {
        self.phases().iter().map(|p| p.number).max().unwrap_or(0) + 1
    }

    // -----------------------------------------------------------------------
    // Mutations (textual splice, then full rewrite on save)
    // -----------------------------------------------------------------------

    /// Append a phase with the next free number. Numbers are unique and
    /// strictly increasing across the life of the document.
    pub fn append_phase(&mut self, name: &str, objective: &str) -> u32 {
        let number = self.next_number();
        let entry = format!(
            "\n### Phase {number}: {name}\n**Status**: {}\n**Objective**: {objective}\n",
            PhaseStatus::NotStarted.marker()
        );
        if !self.text.is_empty() && !self.text.ends_with('\n') {
            self.text.push('\n');
        }
        self.text.push_str(&entry);
        number
    }

    /// Append a milestone heading followed by its phases. Numbering continues
    /// from the current maximum so later milestones never collide with
    /// earlier ones.
    pub fn append_milestone(&mut self, name: &str, seeds: &[(String, String)]) -> Vec<u32> {
        if !self.text.is_empty() && !self.text.ends_with('\n') {
            self.text.push('\n');
        }
        self.text.push_str(&format!("\n---\n\n## Milestone: {name}\n"));
        seeds
            .iter()
            .map(|(phase_name, objective)| self.append_phase(phase_name, objective))
            .collect()
    }

    /// Remove a phase block. Completed phases are protected: roll back first.
    /// On failure the document text is untouched.
    pub fn remove_phase(&mut self, number: u32) -> Result<PhaseEntry> {
        let blocks = self.blocks();
        let block = blocks
            .into_iter()
            .find(|b| b.entry.number == number)
            .ok_or(PhasekitError::PhaseNotFound(number))?;

        if block.entry.status == PhaseStatus::Complete {
            return Err(PhasekitError::ProtectedComplete(number));
        }

        self.text.replace_range(block.start..block.end, "");
        Ok(block.entry)
    }

    /// Rewrite the status line inside the phase's block, inserting one after
    /// the heading when the block has none.
    pub fn set_status(&mut self, number: u32, status: PhaseStatus) -> Result<()> {
        let blocks = self.blocks();
        let block = blocks
            .into_iter()
            .find(|b| b.entry.number == number)
            .ok_or(PhasekitError::PhaseNotFound(number))?;

        let line = format!("**Status**: {}", status.marker());
        match block.status_line {
            Some((start, end)) => self.text.replace_range(start..end, &line),
            None => {
                // Insert after the heading line
                let heading_end = self.text[block.start..block.end]
                    .find('\n')
                    .map(|i| block.start + i + 1)
                    .unwrap_or(block.end);
                self.text.insert_str(heading_end, &format!("{line}\n"));
            }
        }
        Ok(())
    }

    pub fn mark_complete(&mut self, number: u32) -> Result<()> {
        self.set_status(number, PhaseStatus::Complete)
    }

    pub fn mark_not_started(&mut self, number: u32) -> Result<()> {
        self.set_status(number, PhaseStatus::NotStarted)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
