//! Recommendation selector: detected skills → one course category.

pub mod catalog;

use std::collections::HashSet;

use serde::Serialize;

pub use catalog::{Catalog, CourseEntry};

pub const MAX_COURSES: usize = 3;
pub const MAX_VIDEOS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    DataScience,
    Web,
    Android,
    Ios,
    UiUx,
}

impl Category {
    /// Matching order. The first category with a hit wins.
    pub const PRIORITY: [Category; 5] = [
        Category::DataScience,
        Category::Web,
        Category::Android,
        Category::Ios,
        Category::UiUx,
    ];

    /// Lower-case skills that select this category.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Category::DataScience => &["ml", "machine learning", "ai", "data science"],
            Category::Web => &["html", "css", "js", "react", "django", "flask"],
            Category::Android => &["android", "kotlin", "flutter"],
            Category::Ios => &["ios", "swift"],
            Category::UiUx => &["ui", "ux", "adobe xd", "figma"],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub category: Option<Category>,
    pub courses: Vec<CourseEntry>,
    pub resume_videos: Vec<String>,
    pub interview_videos: Vec<String>,
}

/// Exact, case-insensitive membership. "React Native" does not select Web.
pub fn select_category<S: AsRef<str>>(skills: &[S]) -> Option<Category> {
    let lowered: HashSet<String> = skills.iter().map(|s| s.as_ref().to_lowercase()).collect();
    Category::PRIORITY
        .into_iter()
        .find(|category| category.keywords().iter().any(|k| lowered.contains(*k)))
}

pub fn recommend<S: AsRef<str>>(skills: &[S], catalog: &Catalog) -> Recommendation {
    let category = select_category(skills);
    let courses = category
        .map(|c| {
            catalog
                .courses(c)
                .iter()
                .take(MAX_COURSES)
                .cloned()
                .collect()
        })
        .unwrap_or_default();

    Recommendation {
        category,
        courses,
        resume_videos: first_videos(catalog.resume_videos()),
        interview_videos: first_videos(catalog.interview_videos()),
    }
}

fn first_videos(videos: &[String]) -> Vec<String> {
    videos.iter().take(MAX_VIDEOS).cloned().collect()
}
