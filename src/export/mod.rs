//! Export port.
//!
//! Report builders produce plain [`Workbook`]s and [`Document`]s; a
//! [`TableExporter`] turns them into files. Spreadsheet and PDF rendering
//! stay outside the crate behind that trait.

pub mod builders;
pub mod file;

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::constants::limits::SHEET_NAME_MAX;

pub use file::FileExporter;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Nothing to export")]
    NothingToExport,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Number(u64),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<u64> for Cell {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for Cell {
    fn from(value: u32) -> Self {
        Self::Number(u64::from(value))
    }
}

impl From<usize> for Cell {
    fn from(value: usize) -> Self {
        Self::Number(value as u64)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    /// Sheet names are capped at 31 characters.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.chars().take(SHEET_NAME_MAX).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push<I, C>(&mut self, row: I)
    where
        I: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    pub fn blank_line(&mut self) {
        self.rows.push(Vec::new());
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    #[must_use]
    pub const fn new() -> Self {
        Self { sheets: Vec::new() }
    }

    pub fn add(&mut self, sheet: Sheet) {
        self.sheets.push(sheet);
    }

    #[must_use]
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub heading: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub title: String,
    /// Free text lines printed under the title.
    pub subtitle: Vec<String>,
    pub sections: Vec<Section>,
}

/// Turns already computed tables into files.
#[async_trait::async_trait]
pub trait TableExporter: Send + Sync {
    /// Writes `workbook` and returns where it went.
    async fn export_workbook(
        &self,
        filename: &str,
        workbook: &Workbook,
    ) -> Result<PathBuf, ExportError>;

    async fn export_document(
        &self,
        filename: &str,
        document: &Document,
    ) -> Result<PathBuf, ExportError>;
}
