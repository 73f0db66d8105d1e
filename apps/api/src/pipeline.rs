//! Upload orchestration: scratch file → extraction → scoring → persistence →
//! recommendation.

use anyhow::Context;
use bytes::Bytes;
use chrono::Local;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::extraction::{DocumentKind, ExtractedFields, ExtractionOutcome, ResumeExtractor};
use crate::models::submission::NewSubmission;
use crate::recommendation::{recommend, Catalog, Recommendation};
use crate::scoring::compute_resume_score;
use crate::store::SubmissionStore;

const MISSING: &str = "N/A";

/// Lifecycle of one upload. Only used for debug logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    FileReceived,
    Extracting,
    Extracted,
    ExtractionFailed,
    Empty,
    Scored,
    Persisted,
    Displayed,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileEntry {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub submission_id: i64,
    pub fields: ExtractedFields,
    pub profile: Vec<ProfileEntry>,
    pub score: u32,
    #[serde(flatten)]
    pub recommendation: Recommendation,
}

fn enter(stage: PipelineStage, filename: &str) {
    debug!("[{filename}] -> {stage:?}");
}

/// Runs one uploaded document through the whole pipeline.
///
/// Steps:
/// 1. Check the extension (.pdf / .docx)
/// 2. Write the bytes to a scratch file carrying the same suffix
/// 3. extractor.extract() → ExtractionOutcome
/// 4. Remove the scratch file, whatever the outcome
/// 5. compute_resume_score()
/// 6. INSERT into user_data
/// 7. recommend() from the detected skills
///
/// Nothing is written when extraction fails or comes back empty.
pub async fn analyse_upload(
    store: &SubmissionStore,
    extractor: &dyn ResumeExtractor,
    catalog: &Catalog,
    filename: &str,
    bytes: Bytes,
) -> Result<AnalysisReport, AppError> {
    // Step 1
    let kind = DocumentKind::from_filename(filename).ok_or_else(|| {
        AppError::UnsupportedMediaType(format!(
            "'{filename}' is not a PDF or DOCX document"
        ))
    })?;
    enter(PipelineStage::FileReceived, filename);

    // Step 2: the guard deletes the file if anything below returns early
    let scratch = tempfile::Builder::new()
        .prefix("resume-")
        .suffix(kind.suffix())
        .tempfile()
        .context("Failed to create scratch file")?;
    tokio::fs::write(scratch.path(), &bytes)
        .await
        .context("Failed to write scratch file")?;

    // Step 3
    enter(PipelineStage::Extracting, filename);
    let outcome = extractor.extract(scratch.path()).await;

    // Step 4
    let scratch_path = scratch.path().to_path_buf();
    if let Err(e) = scratch.close() {
        warn!("Failed to remove scratch file {}: {e}", scratch_path.display());
    }

    let fields = match outcome {
        Ok(ExtractionOutcome::Extracted(fields)) => fields,
        Ok(ExtractionOutcome::Empty) => {
            enter(PipelineStage::Empty, filename);
            return Err(AppError::EmptyExtraction);
        }
        Err(e) => {
            enter(PipelineStage::ExtractionFailed, filename);
            return Err(e.into());
        }
    };
    enter(PipelineStage::Extracted, filename);

    // Step 5
    let score = compute_resume_score(&fields);
    enter(PipelineStage::Scored, filename);

    // Step 6
    let submission_id = store
        .insert(&NewSubmission {
            name: fields.name.clone(),
            email: fields.email.clone(),
            contact: fields.mobile_number.clone(),
            score,
            date: Local::now().date_naive(),
        })
        .await?;
    enter(PipelineStage::Persisted, filename);

    // Step 7
    let recommendation = recommend(fields.skills.as_slice(), catalog);
    info!(
        "Analysed '{filename}' with {} backend: submission {submission_id}, score {score}, category {:?}",
        extractor.backend(),
        recommendation.category
    );

    let report = AnalysisReport {
        submission_id,
        profile: profile_entries(&fields),
        fields,
        score,
        recommendation,
    };
    enter(PipelineStage::Displayed, filename);
    Ok(report)
}

/// Labelled, display-ready view of the extracted fields.
pub fn profile_entries(fields: &ExtractedFields) -> Vec<ProfileEntry> {
    let entry = |label, value: String| ProfileEntry { label, value };
    vec![
        entry("Name", single(&fields.name)),
        entry("Email", single(&fields.email)),
        entry("Mobile", single(&fields.mobile_number)),
        entry("Degree", joined(&fields.degree)),
        entry("College", single(&fields.college_name)),
        entry("Experience", joined(&fields.experience)),
        entry("Skills", joined(&fields.skills)),
        entry("Companies", joined(&fields.company_names)),
        entry("Designation", single(&fields.designation)),
        entry(
            "Total Experience",
            fields
                .total_experience
                .map(|years| years.to_string())
                .unwrap_or_else(|| MISSING.to_string()),
        ),
    ]
}

fn single(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(MISSING)
        .to_string()
}

fn joined(values: &[String]) -> String {
    if values.is_empty() {
        MISSING.to_string()
    } else {
        values.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_pool;
    use crate::extraction::test_support::{reference_fields, StubBehaviour, StubExtractor};
    use crate::recommendation::Category;

    async fn store() -> SubmissionStore {
        SubmissionStore::open(memory_pool().await).await.unwrap()
    }

    fn catalog() -> Catalog {
        Catalog::bundled().unwrap()
    }

    fn pdf_bytes() -> Bytes {
        Bytes::from_static(b"%PDF-1.4 not really a pdf")
    }

    #[tokio::test]
    async fn test_reference_resume_is_scored_stored_and_recommended() {
        let store = store().await;
        let catalog = catalog();
        let extractor = StubExtractor::new(StubBehaviour::Fields(reference_fields()));

        let report = analyse_upload(&store, &extractor, &catalog, "cv.pdf", pdf_bytes())
            .await
            .unwrap();

        assert_eq!(report.score, 11);
        assert_eq!(report.submission_id, 1);
        assert_eq!(report.recommendation.category, Some(Category::DataScience));
        assert_eq!(
            report.recommendation.courses,
            catalog.courses(Category::DataScience)[..3].to_vec()
        );
        assert_eq!(report.recommendation.resume_videos.len(), 2);
        assert_eq!(report.recommendation.interview_videos.len(), 2);

        let rows = store.fetch_all().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].score, 11);
        assert_eq!(rows[0].name, "Ada Lovelace");
        assert_eq!(rows[0].contact, "+44 20 7946 0958");
        assert_eq!(rows[0].date, Some(Local::now().date_naive()));
    }

    #[tokio::test]
    async fn test_scratch_file_keeps_suffix_and_is_removed() {
        let store = store().await;
        let extractor = StubExtractor::new(StubBehaviour::Fields(reference_fields()));

        analyse_upload(&store, &extractor, &catalog(), "CV.DOCX", pdf_bytes())
            .await
            .unwrap();

        let seen = extractor.seen();
        assert_eq!(seen.len(), 1);
        let (path, existed) = &seen[0];
        assert!(existed);
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("docx"));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_failed_extraction_writes_nothing() {
        let store = store().await;
        let extractor = StubExtractor::new(StubBehaviour::Fail("garbled".to_string()));

        let err = analyse_upload(&store, &extractor, &catalog(), "cv.pdf", pdf_bytes())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Extraction(_)));
        assert!(store.fetch_all().await.unwrap().is_empty());
        assert!(!extractor.seen()[0].0.exists());
    }

    #[tokio::test]
    async fn test_empty_extraction_writes_nothing() {
        let store = store().await;
        let extractor = StubExtractor::new(StubBehaviour::Empty);

        let err = analyse_upload(&store, &extractor, &catalog(), "cv.pdf", pdf_bytes())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::EmptyExtraction));
        assert!(store.fetch_all().await.unwrap().is_empty());
        assert!(!extractor.seen()[0].0.exists());
    }

    #[tokio::test]
    async fn test_unsupported_extension_never_reaches_extractor() {
        let store = store().await;
        let extractor = StubExtractor::new(StubBehaviour::Fields(reference_fields()));

        let err = analyse_upload(&store, &extractor, &catalog(), "cv.txt", pdf_bytes())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::UnsupportedMediaType(_)));
        assert!(extractor.seen().is_empty());
    }

    #[tokio::test]
    async fn test_unmatched_skills_still_store_row() {
        let store = store().await;
        let fields = ExtractedFields {
            skills: vec!["COBOL".to_string()],
            ..Default::default()
        };
        let extractor = StubExtractor::new(StubBehaviour::Fields(fields));

        let report = analyse_upload(&store, &extractor, &catalog(), "cv.pdf", pdf_bytes())
            .await
            .unwrap();

        assert_eq!(report.score, 2);
        assert_eq!(report.recommendation.category, None);
        assert!(report.recommendation.courses.is_empty());
        let rows = store.fetch_all().await.unwrap();
        assert_eq!(rows[0].name, "");
        assert_eq!(rows[0].contact, "");
    }

    #[test]
    fn test_profile_renders_missing_values() {
        let profile = profile_entries(&reference_fields());
        let value = |label: &str| {
            profile
                .iter()
                .find(|e| e.label == label)
                .map(|e| e.value.clone())
                .unwrap()
        };
        assert_eq!(profile.len(), 10);
        assert_eq!(value("Name"), "Ada Lovelace");
        assert_eq!(value("Skills"), "Python, SQL, Machine Learning");
        assert_eq!(value("College"), "N/A");
        assert_eq!(value("Companies"), "N/A");
        assert_eq!(value("Total Experience"), "N/A");
    }

    #[test]
    fn test_profile_total_experience() {
        let fields = ExtractedFields {
            total_experience: Some(2.5),
            ..Default::default()
        };
        let profile = profile_entries(&fields);
        assert_eq!(profile[9].label, "Total Experience");
        assert_eq!(profile[9].value, "2.5");
    }
}
