//! Output formatting for CLI commands.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cli::args::{DocviewsArgs, OutputFormat};
use crate::error::Result;
use crate::index::ViewRow;
use crate::view::{DesignDocument, IndexEntry};

/// Registered views.
#[derive(Debug, Serialize, Deserialize)]
pub struct ViewListResult {
    pub design_document: String,
    pub views: Vec<String>,
}

/// Entries emitted by one document.
#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentEmission {
    pub id: String,
    pub views: BTreeMap<String, Vec<IndexEntry>>,
}

/// Result structure for the emit command.
#[derive(Debug, Serialize, Deserialize)]
pub struct EmitResult {
    pub documents_read: usize,
    pub documents: Vec<DocumentEmission>,
}

/// Result structure for view queries.
#[derive(Debug, Serialize, Deserialize)]
pub struct QueryResult {
    pub view: String,
    pub total_rows: usize,
    pub rows: Vec<ViewRow>,
}

/// Result structure for purge selection.
#[derive(Debug, Serialize, Deserialize)]
pub struct PurgeCandidatesResult {
    pub retention_days: i64,
    pub cutoff: String,
    pub candidates: Vec<String>,
}

/// Line-oriented rendering for the human output format.
pub trait HumanOutput {
    fn human_lines(&self) -> Vec<String>;
}

impl HumanOutput for ViewListResult {
    fn human_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("design document: {}", self.design_document)];
        lines.extend(self.views.iter().map(|view| format!("  {view}")));
        lines
    }
}

impl HumanOutput for DesignDocument {
    fn human_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("_design/{}", self.name)];
        lines.extend(self.views.iter().map(|view| format!("  {view} (map)")));
        lines
    }
}

impl HumanOutput for EmitResult {
    fn human_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for document in &self.documents {
            lines.push(document.id.clone());
            for (view, entries) in &document.views {
                for entry in entries {
                    lines.push(format!("  {view}: {}", entry.key));
                }
            }
        }
        lines.push(format!(
            "{} documents read, {} listed",
            self.documents_read,
            self.documents.len()
        ));
        lines
    }
}

impl HumanOutput for QueryResult {
    fn human_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .rows
            .iter()
            .map(|row| format!("{}\t{}", row.key, row.id))
            .collect();
        lines.push(format!(
            "{} of {} rows in {}",
            self.rows.len(),
            self.total_rows,
            self.view
        ));
        lines
    }
}

impl HumanOutput for PurgeCandidatesResult {
    fn human_lines(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "deleted on or before {} (retention {} days):",
            self.cutoff, self.retention_days
        )];
        lines.extend(self.candidates.iter().map(|id| format!("  {id}")));
        lines.push(format!("{} candidates", self.candidates.len()));
        lines
    }
}

/// Render a command result in the selected format.
pub fn render<T: Serialize + HumanOutput>(result: &T, args: &DocviewsArgs) -> Result<String> {
    match args.output_format {
        OutputFormat::Human => Ok(result.human_lines().join("\n")),
        OutputFormat::Json if args.pretty => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Json => Ok(serde_json::to_string(result)?),
    }
}

/// Output a command result.
pub fn output_result<T: Serialize + HumanOutput>(
    message: &str,
    result: &T,
    args: &DocviewsArgs,
) -> Result<()> {
    if args.output_format == OutputFormat::Human && args.verbosity() > 1 {
        println!("{message}");
        println!();
    }
    println!("{}", render(result, args)?);
    Ok(())
}
