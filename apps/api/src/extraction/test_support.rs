use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{ExtractedFields, ExtractionError, ExtractionOutcome, ResumeExtractor};

#[derive(Debug, Clone)]
pub enum StubBehaviour {
    Fields(ExtractedFields),
    Empty,
    Fail(String),
}

/// Returns a canned outcome and remembers which file it was handed.
pub struct StubExtractor {
    behaviour: StubBehaviour,
    seen: Mutex<Vec<(PathBuf, bool)>>,
}

impl StubExtractor {
    pub fn new(behaviour: StubBehaviour) -> Self {
        Self {
            behaviour,
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Paths passed to `extract`, with whether each existed at call time.
    pub fn seen(&self) -> Vec<(PathBuf, bool)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResumeExtractor for StubExtractor {
    async fn extract(&self, path: &Path) -> Result<ExtractionOutcome, ExtractionError> {
        self.seen
            .lock()
            .unwrap()
            .push((path.to_path_buf(), path.exists()));
        match &self.behaviour {
            StubBehaviour::Fields(fields) => Ok(fields.clone().into_outcome()),
            StubBehaviour::Empty => Ok(ExtractionOutcome::Empty),
            StubBehaviour::Fail(reason) => Err(ExtractionError::Backend(reason.clone())),
        }
    }

    fn backend(&self) -> &'static str {
        "stub"
    }
}

/// Skills, degree and experience of the reference resume (score 11).
pub fn reference_fields() -> ExtractedFields {
    ExtractedFields {
        name: Some("Ada Lovelace".to_string()),
        email: Some("ada@example.com".to_string()),
        mobile_number: Some("+44 20 7946 0958".to_string()),
        degree: vec!["BSc".to_string()],
        experience: vec!["Intern at X".to_string()],
        skills: vec![
            "Python".to_string(),
            "SQL".to_string(),
            "Machine Learning".to_string(),
        ],
        ..Default::default()
    }
}

/// A small resume exercising paragraphs, a hyperlink, a line break and a table.
pub fn sample_resume_docx() -> docx_rs::Docx {
    use docx_rs::{
        BreakType, Docx, Hyperlink, HyperlinkType, Paragraph, Run, Table, TableCell, TableRow,
    };

    let para = |text: &str| Paragraph::new().add_run(Run::new().add_text(text));
    let cell = |text: &str| TableCell::new().add_paragraph(para(text));

    Docx::new()
        .add_paragraph(para("Ada Lovelace"))
        .add_paragraph(para("ada@example.com | +44 20 7946 0958"))
        .add_paragraph(Paragraph::new().add_hyperlink(
            Hyperlink::new("portfolio", HyperlinkType::Anchor)
                .add_run(Run::new().add_text("Portfolio")),
        ))
        .add_paragraph(para("Skills"))
        .add_table(Table::new(vec![TableRow::new(vec![
            cell("Python"),
            cell("Machine Learning"),
        ])]))
        .add_paragraph(para("Experience"))
        .add_paragraph(para(
            "Data Science Intern at Analytical Engines Ltd (2019 - 2021)",
        ))
        .add_paragraph(para("Education"))
        .add_paragraph(
            Paragraph::new().add_run(
                Run::new()
                    .add_text("BSc Mathematics")
                    .add_break(BreakType::TextWrapping)
                    .add_text("University of London"),
            ),
        )
}

/// Packs `docx` into a `.docx` scratch file.
pub fn write_docx(docx: docx_rs::Docx) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".docx").tempfile().unwrap();
    docx.build().pack(file.as_file_mut()).unwrap();
    file
}
