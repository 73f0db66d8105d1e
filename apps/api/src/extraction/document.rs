//! Plain-text extraction from PDF and DOCX files.

use std::path::Path;

use docx_rs::{
    read_docx, DocumentChild, Paragraph, ParagraphChild, Run, RunChild, Table, TableCellContent,
    TableChild, TableRowChild,
};
use pdf_extract::extract_text_from_mem;
use tracing::debug;

use crate::extraction::{DocumentKind, ExtractionError};

/// Reads the document at `path` and returns its normalised text.
/// Parsing is CPU-bound and runs on the blocking pool.
pub async fn read_document_text(path: &Path) -> Result<String, ExtractionError> {
    let kind = DocumentKind::from_path(path).ok_or_else(|| {
        ExtractionError::UnsupportedFormat(
            path.extension()
                .map(|e| e.to_string_lossy().into_owned())
                .unwrap_or_default(),
        )
    })?;

    let bytes = tokio::fs::read(path).await?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());

    let raw = tokio::task::spawn_blocking(move || match kind {
        DocumentKind::Pdf => extract_pdf_text(&bytes),
        DocumentKind::Docx => extract_docx_text(&bytes),
    })
    .await
    .map_err(|e| ExtractionError::Backend(format!("text extraction task failed: {e}")))??;

    Ok(normalize_text(&raw))
}

fn extract_pdf_text(data: &[u8]) -> Result<String, ExtractionError> {
    extract_text_from_mem(data).map_err(|e| ExtractionError::Pdf(e.to_string()))
}

fn extract_docx_text(data: &[u8]) -> Result<String, ExtractionError> {
    let package = read_docx(data).map_err(|e| ExtractionError::Docx(e.to_string()))?;
    let mut lines = Vec::new();

    for child in &package.document.children {
        match child {
            DocumentChild::Paragraph(paragraph) => push_paragraph(paragraph, &mut lines),
            DocumentChild::Table(table) => push_table(table, &mut lines),
            _ => {}
        }
    }

    Ok(lines.join("\n"))
}

fn push_paragraph(paragraph: &Paragraph, lines: &mut Vec<String>) {
    let mut buffer = String::new();
    for child in &paragraph.children {
        match child {
            ParagraphChild::Run(run) => push_run(run, &mut buffer),
            ParagraphChild::Hyperlink(link) => {
                for inner in &link.children {
                    if let ParagraphChild::Run(run) = inner {
                        push_run(run, &mut buffer);
                    }
                }
            }
            _ => {}
        }
    }
    let trimmed = buffer.trim();
    if !trimmed.is_empty() {
        lines.push(trimmed.to_string());
    }
}

fn push_table(table: &Table, lines: &mut Vec<String>) {
    for row in &table.rows {
        let row = match row {
            TableChild::TableRow(row) => row,
        };
        for cell in &row.cells {
            let cell = match cell {
                TableRowChild::TableCell(cell) => cell,
            };
            for content in &cell.children {
                match content {
                    TableCellContent::Paragraph(paragraph) => push_paragraph(paragraph, lines),
                    TableCellContent::Table(inner) => push_table(inner, lines),
                    _ => {}
                }
            }
        }
    }
}

fn push_run(run: &Run, buffer: &mut String) {
    for child in &run.children {
        match child {
            RunChild::Text(text) => buffer.push_str(&text.text),
            RunChild::Break(_) => buffer.push('\n'),
            RunChild::Tab(_) => buffer.push('\t'),
            _ => {}
        }
    }
}

/// Strips NULs and a leading BOM, unifies line endings, trims line ends.
pub fn normalize_text(text: &str) -> String {
    let cleaned = text
        .replace('\u{0000}', "")
        .replace("\r\n", "\n")
        .replace('\r', "\n");
    let cleaned = cleaned.trim_start_matches('\u{FEFF}');

    cleaned
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
