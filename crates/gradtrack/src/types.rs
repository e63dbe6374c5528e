//! Core data model shared by the catalog, store, and audit modules.

use serde::{Deserialize, Serialize};

use crate::category::CourseCategory;

/// A single catalog entry. Immutable reference data once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Course code, unique within a catalog. Key for all lookups.
    pub id: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,

    /// Positive credit value; validated at the load boundary.
    pub credits: u32,

    /// Canonicalized from the raw catalog label during deserialization.
    pub category: CourseCategory,

    /// Intended academic year. 0 means the course is open to any year.
    #[serde(default)]
    pub year: u32,

    pub term: CourseTerm,

    #[serde(default)]
    pub instructor: String,

    /// Whether this specific course is mandatory for graduation.
    #[serde(default)]
    pub is_required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,

    /// Course ids that should be completed first. Advisory only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prerequisite: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// When a course meets during the academic year.
///
/// Variant order is the listing order used when sorting by year and term.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum CourseTerm {
    #[serde(alias = "前期")]
    FirstHalf,
    #[serde(alias = "後期")]
    SecondHalf,
    #[serde(alias = "通年")]
    FullYear,
    #[serde(alias = "集中")]
    Intensive,
}

impl CourseTerm {
    pub fn label(&self) -> &'static str {
        match self {
            CourseTerm::FirstHalf => "first-half",
            CourseTerm::SecondHalf => "second-half",
            CourseTerm::FullYear => "full-year",
            CourseTerm::Intensive => "intensive",
        }
    }
}

/// One entry in the student's selection list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    /// References a [`Course::id`]; may dangle once the catalog has drifted.
    pub course_id: String,

    pub status: RecordStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CourseRecord {
    pub fn new(course_id: impl Into<String>, status: RecordStatus) -> Self {
        Self {
            course_id: course_id.into(),
            status,
            grade: None,
            notes: None,
        }
    }
}

/// Where the student stands with a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordStatus {
    Completed,
    Planned,
    InProgress,
}

impl RecordStatus {
    /// Completed and planned records carry credits; in-progress is
    /// informational and contributes to no total.
    pub fn counts_toward_credits(&self) -> bool {
        matches!(self, RecordStatus::Completed | RecordStatus::Planned)
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecordStatus::Completed => "completed",
            RecordStatus::Planned => "planned",
            RecordStatus::InProgress => "in-progress",
        }
    }
}
