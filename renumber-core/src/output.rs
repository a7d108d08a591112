use crate::engine::{GroupReport, Outcome, Strategy};
use crate::filename::FlagKind;
use crate::plan::RenameStep;
use crate::preview::render_renames;
use crate::range::Range;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt::Write;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

/// One row of a directory listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEntry {
    pub index: usize,
    pub name: String,
    /// Signed number, if the name is numbered
    pub value: Option<i64>,
    pub flag: FlagKind,
    pub flag_count: usize,
}

/// Result of a list operation
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResult {
    pub directory: String,
    pub entries: Vec<ListEntry>,
    pub longest_width: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

/// Result of a shift operation
#[derive(Debug, Serialize, Deserialize)]
pub struct ShiftResult {
    pub range: Range,
    pub amount: i64,
    pub strategy: Strategy,
    pub outcome: Outcome,
    #[serde(skip)]
    pub use_color: bool,
}

/// Result of an insert operation
#[derive(Debug, Serialize, Deserialize)]
pub struct InsertResult {
    pub range: Range,
    pub destination: i64,
    pub outcome: Outcome,
    #[serde(skip)]
    pub use_color: bool,
}

/// Result of a normalize operation
#[derive(Debug, Serialize, Deserialize)]
pub struct NormalizeResult {
    pub width: usize,
    pub renames: Vec<RenameStep>,
    #[serde(skip)]
    pub use_color: bool,
}

/// Result of applying flag groups
#[derive(Debug, Serialize, Deserialize)]
pub struct ParseResult {
    pub groups: Vec<GroupReport>,
    #[serde(skip)]
    pub use_color: bool,
}

impl ParseResult {
    pub fn total_renames(&self) -> usize {
        self.groups
            .iter()
            .map(|g| g.shifted.total() + g.stripped.len())
            .sum()
    }
}

/// Result of a version command
#[derive(Debug, Serialize, Deserialize)]
pub struct VersionResult {
    pub name: String,
    pub version: String,
}

/// Trait for formatting output in different formats
pub trait OutputFormatter {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }
    fn format_json(&self) -> String;
    fn format_summary(&self) -> String;
}

fn write_outcome(output: &mut String, outcome: &Outcome, use_color: bool) {
    output.push_str(&render_renames(&outcome.renames, use_color));
    if !outcome.normalized.is_empty() {
        writeln!(output, "Normalized {} names:", outcome.normalized.len()).unwrap();
        output.push_str(&render_renames(&outcome.normalized, use_color));
    }
}

impl OutputFormatter for ListResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "list",
            "directory": self.directory,
            "filter": self.filter,
            "longest_width": self.longest_width,
            "total": self.entries.len(),
            "entries": self.entries,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();
        for entry in &self.entries {
            writeln!(output, "{}. {}", entry.index, entry.name).unwrap();
        }
        output
    }
}

impl OutputFormatter for ShiftResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "shift",
            "range": self.range.to_string(),
            "amount": self.amount,
            "strategy": self.strategy,
            "summary": {
                "renamed": self.outcome.renames.len(),
                "normalized": self.outcome.normalized.len(),
            },
            "renames": self.outcome.renames,
            "normalized": self.outcome.normalized,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        if self.outcome.total() == 0 {
            return "Nothing to rename\n".to_string();
        }
        let mut output = String::new();
        writeln!(
            output,
            "Shifted {} files in {} by {:+}:",
            self.outcome.renames.len(),
            self.range,
            self.amount
        )
        .unwrap();
        write_outcome(&mut output, &self.outcome, self.use_color);
        output
    }
}

impl OutputFormatter for InsertResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "insert",
            "range": self.range.to_string(),
            "destination": self.destination,
            "summary": {
                "renamed": self.outcome.renames.len(),
                "normalized": self.outcome.normalized.len(),
            },
            "renames": self.outcome.renames,
            "normalized": self.outcome.normalized,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();
        writeln!(
            output,
            "Moved {} to position {} ({} renames):",
            self.range,
            self.destination,
            self.outcome.renames.len()
        )
        .unwrap();
        write_outcome(&mut output, &self.outcome, self.use_color);
        output
    }
}

impl OutputFormatter for NormalizeResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "normalize",
            "width": self.width,
            "summary": {
                "renamed": self.renames.len(),
            },
            "renames": self.renames,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        if self.renames.is_empty() {
            return format!("All names already padded to width {}\n", self.width);
        }
        let mut output = format!(
            "Normalized {} names to width {}:\n",
            self.renames.len(),
            self.width
        );
        output.push_str(&render_renames(&self.renames, self.use_color));
        output
    }
}

impl OutputFormatter for ParseResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "parse",
            "summary": {
                "groups": self.groups.len(),
                "renamed": self.total_renames(),
            },
            "groups": self.groups,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        if self.groups.is_empty() {
            return "No flag groups found\n".to_string();
        }
        let mut output = String::new();
        writeln!(output, "Applied {} flag groups:", self.groups.len()).unwrap();
        for group in &self.groups {
            let marker = group
                .flag
                .marker()
                .map(|c| c.to_string().repeat(group.flag_count))
                .unwrap_or_default();
            writeln!(
                output,
                "{}{} ({} files): shift by {:+}",
                group.value,
                marker,
                group.end - group.start,
                group.amount
            )
            .unwrap();
            write_outcome(&mut output, &group.shifted, self.use_color);
            output.push_str(&render_renames(&group.stripped, self.use_color));
        }
        output
    }
}

impl OutputFormatter for VersionResult {
    fn format_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        format!("{} {}", self.name, self.version)
    }
}
