use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One persisted, scored resume upload. Rows are append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Submission {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub contact: String,
    pub score: i64,
    /// `None` only for rows written without a date.
    pub date: Option<NaiveDate>,
}

/// Values handed to the store for a new row. Missing values are stored as "".
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
    pub score: u32,
    pub date: NaiveDate,
}
