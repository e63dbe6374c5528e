//! Output model for requirement evaluation.

use serde::{Deserialize, Serialize};

use crate::category::CourseCategory;
use crate::types::Course;

/// Mutually exclusive language-course tracks.
///
/// A student follows exactly one track; the other track's courses are
/// excluded from every aggregate so the student is neither penalized nor
/// credited for them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LanguageTrack {
    #[default]
    TrackA,
    TrackB,
}

impl LanguageTrack {
    /// Maps the caller-facing native-speaker flag onto a track: native
    /// speakers follow Language A, everyone else Language B.
    pub fn from_native_flag(native: bool) -> Self {
        if native {
            LanguageTrack::TrackA
        } else {
            LanguageTrack::TrackB
        }
    }

    /// The language category this track does not credit.
    pub fn excluded_category(&self) -> CourseCategory {
        match self {
            LanguageTrack::TrackA => CourseCategory::LanguageB,
            LanguageTrack::TrackB => CourseCategory::LanguageA,
        }
    }

    /// True if the given category is off-track and must be ignored.
    pub fn excludes(&self, category: &CourseCategory) -> bool {
        *category == self.excluded_category()
    }
}

/// Severity of a warning entry. Only `Error` blocks graduation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// What a warning is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    InsufficientCredits,
    MissingRequired,
    PrerequisiteNotMet,
}

/// A single diagnostic produced by evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_course_ids: Vec<String>,
    pub severity: Severity,
}

impl Warning {
    pub(crate) fn new(kind: WarningKind, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            related_course_ids: Vec::new(),
            severity,
        }
    }

    pub(crate) fn with_courses(mut self, ids: Vec<String>) -> Self {
        self.related_course_ids = ids;
        self
    }
}

/// Credit totals for one requirement leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    /// Canonical category label.
    pub category: String,
    pub completed: u32,
    pub planned: u32,
    pub required: u32,
    /// `max(0, required - completed)`.
    pub remaining: u32,
}

/// Result of one evaluation pass.
///
/// Derived data: recomputed whenever the record collection changes, never
/// edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditSummary {
    pub total_completed: u32,
    pub total_planned: u32,
    pub total_required: u32,

    /// One row per requirement leaf, in specification order.
    pub category_breakdown: Vec<CategoryBreakdown>,

    pub warnings: Vec<Warning>,

    /// Mandatory courses with no completed or planned record, in catalog
    /// order. The aggregate warning carries only the count; this is the
    /// detail for consumers that want it.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_required: Vec<Course>,

    pub can_graduate: bool,
}

impl CreditSummary {
    /// True if any error-severity warning is present.
    pub fn has_errors(&self) -> bool {
        self.warnings.iter().any(|w| w.severity == Severity::Error)
    }
}

/// Courses suggested to close a requirement shortfall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecommendation {
    /// Canonical label of the category falling short.
    pub category: String,
    /// 1 is the highest priority, following requirement order.
    pub priority: u32,
    pub credits_needed: u32,
    pub candidates: Vec<Course>,
}
