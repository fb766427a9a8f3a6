use async_trait::async_trait;
use std::fmt::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use super::{Cell, Document, ExportError, Sheet, TableExporter, Workbook};

/// Writes a workbook as `<dir>/<filename>/<sheet>.csv` and a document as
/// `<dir>/<filename>.json`.
#[derive(Debug, Clone)]
pub struct FileExporter {
    dir: PathBuf,
}

impl FileExporter {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

fn file_stem(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            other => other,
        })
        .collect()
}

fn format_sheet_as_csv(sheet: &Sheet) -> String {
    let mut csv = String::new();
    for row in &sheet.rows {
        let line: Vec<String> = row
            .iter()
            .map(|cell| match cell {
                Cell::Number(n) => n.to_string(),
                Cell::Text(text) => format!("\"{}\"", text.replace('"', "\"\"")),
            })
            .collect();
        let _ = writeln!(csv, "{}", line.join(","));
    }
    csv
}

#[async_trait]
impl TableExporter for FileExporter {
    async fn export_workbook(
        &self,
        filename: &str,
        workbook: &Workbook,
    ) -> Result<PathBuf, ExportError> {
        if workbook.sheets.is_empty() {
            return Err(ExportError::NothingToExport);
        }

        let target = self.dir.join(file_stem(filename));
        tokio::fs::create_dir_all(&target).await?;

        for sheet in &workbook.sheets {
            let path = target.join(format!("{}.csv", file_stem(&sheet.name)));
            tokio::fs::write(&path, format_sheet_as_csv(sheet)).await?;
        }

        info!(path = %target.display(), sheets = workbook.sheets.len(), "Workbook exported");
        Ok(target)
    }

    async fn export_document(
        &self,
        filename: &str,
        document: &Document,
    ) -> Result<PathBuf, ExportError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.dir.join(format!("{}.json", file_stem(filename)));
        let json = serde_json::to_string_pretty(document)?;
        tokio::fs::write(&path, json).await?;

        info!(path = %path.display(), sections = document.sections.len(), "Document exported");
        Ok(path)
    }
}
