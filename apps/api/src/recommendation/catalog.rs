//! Static course and video reference data.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::recommendation::Category;

const BUNDLED_CATALOG: &str = include_str!("../../data/catalog.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseEntry {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
struct CourseLists {
    data_science: Vec<CourseEntry>,
    web: Vec<CourseEntry>,
    android: Vec<CourseEntry>,
    ios: Vec<CourseEntry>,
    ui_ux: Vec<CourseEntry>,
}

/// Course lists per category plus the two video lists. Immutable once loaded.
#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    courses: CourseLists,
    resume_videos: Vec<String>,
    interview_videos: Vec<String>,
}

impl Catalog {
    /// The catalog compiled into the binary.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_CATALOG).context("Bundled course catalog is invalid")
    }

    /// Reads a replacement catalog from disk.
    pub async fn load(path: &Path) -> Result<Self> {
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read catalog {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Invalid catalog {}", path.display()))
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn courses(&self, category: Category) -> &[CourseEntry] {
        match category {
            Category::DataScience => &self.courses.data_science,
            Category::Web => &self.courses.web,
            Category::Android => &self.courses.android,
            Category::Ios => &self.courses.ios,
            Category::UiUx => &self.courses.ui_ux,
        }
    }

    pub fn resume_videos(&self) -> &[String] {
        &self.resume_videos
    }

    pub fn interview_videos(&self) -> &[String] {
        &self.interview_videos
    }
}
