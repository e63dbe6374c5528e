//! The requirement evaluation engine.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::config::{GraduationRequirements, RequirementLeaf};
use super::types::{
    CategoryBreakdown, CourseRecommendation, CreditSummary, LanguageTrack, Severity, Warning,
    WarningKind,
};
use crate::catalog::CourseCatalog;
use crate::category::CourseCategory;
use crate::types::{Course, CourseRecord, RecordStatus};

/// Evaluates a student's course records against graduation requirements.
///
/// Construction flattens the validated requirement spec into ordered leaves
/// and indexes them by canonical category, so each [`evaluate`] call is a
/// single pass over the records. The engine holds only read-only reference
/// data: calls are pure, independent, and safe to repeat on every change to
/// the record collection.
///
/// [`evaluate`]: RequirementEngine::evaluate
pub struct RequirementEngine {
    catalog: CourseCatalog,
    total_credits: u32,
    leaves: Vec<RequirementLeaf>,
    leaf_index: HashMap<CourseCategory, usize>,
}

impl RequirementEngine {
    /// Creates an engine over a catalog and a validated requirement spec.
    pub fn new(catalog: CourseCatalog, requirements: GraduationRequirements) -> Self {
        let leaves = requirements.leaves();
        let mut leaf_index = HashMap::with_capacity(leaves.len());
        for (idx, leaf) in leaves.iter().enumerate() {
            leaf_index.entry(leaf.category.clone()).or_insert(idx);
        }

        Self {
            catalog,
            total_credits: requirements.total_credits,
            leaves,
            leaf_index,
        }
    }

    pub fn catalog(&self) -> &CourseCatalog {
        &self.catalog
    }

    /// Computes a fresh credit summary for the given records.
    ///
    /// Dangling course ids are skipped silently, duplicate records for one
    /// course are each counted on their own (a duplicated record doubles its
    /// credits), and courses on the other language track are invisible to
    /// every aggregate: totals, breakdown, and mandatory-course checks.
    pub fn evaluate(&self, records: &[CourseRecord], track: LanguageTrack) -> CreditSummary {
        let mut total_completed = 0u32;
        let mut total_planned = 0u32;
        // (completed, planned) per leaf, in leaf order.
        let mut buckets = vec![(0u32, 0u32); self.leaves.len()];

        for record in records {
            let course = match self.catalog.get(&record.course_id) {
                Some(course) => course,
                // Catalog drift: a record may outlive its course.
                None => continue,
            };
            if track.excludes(&course.category) {
                continue;
            }

            let bucket = self.leaf_index.get(&course.category).copied();
            match record.status {
                RecordStatus::Completed => {
                    total_completed += course.credits;
                    if let Some(idx) = bucket {
                        buckets[idx].0 += course.credits;
                    }
                }
                RecordStatus::Planned => {
                    total_planned += course.credits;
                    if let Some(idx) = bucket {
                        buckets[idx].1 += course.credits;
                    }
                }
                RecordStatus::InProgress => {}
            }
        }

        let mut warnings = Vec::new();

        if total_completed < self.total_credits {
            let shortfall = self.total_credits - total_completed;
            warnings.push(Warning::new(
                WarningKind::InsufficientCredits,
                Severity::Error,
                format!(
                    "Completed credits fall {shortfall} short of the {} required for graduation",
                    self.total_credits
                ),
            ));
        }

        let mut category_breakdown = Vec::with_capacity(self.leaves.len());
        for (leaf, &(completed, planned)) in self.leaves.iter().zip(&buckets) {
            let remaining = leaf.required_credits.saturating_sub(completed);

            if remaining > 0 {
                let severity = if leaf.mandatory {
                    Severity::Error
                } else {
                    Severity::Warning
                };
                warnings.push(Warning::new(
                    WarningKind::InsufficientCredits,
                    severity,
                    format!(
                        "{} is {remaining} credit{} short of its requirement",
                        leaf.category,
                        if remaining == 1 { "" } else { "s" }
                    ),
                ));
            }

            category_breakdown.push(CategoryBreakdown {
                category: leaf.category.to_string(),
                completed,
                planned,
                required: leaf.required_credits,
                remaining,
            });
        }

        let missing_required = self.missing_required_courses(records, track);
        if !missing_required.is_empty() {
            let count = missing_required.len();
            let ids = missing_required.iter().map(|c| c.id.clone()).collect();
            warnings.push(
                Warning::new(
                    WarningKind::MissingRequired,
                    Severity::Error,
                    format!(
                        "{count} mandatory course{} not been completed or planned",
                        if count == 1 { " has" } else { "s have" }
                    ),
                )
                .with_courses(ids),
            );
        }

        self.push_prerequisite_advisories(records, track, &mut warnings);

        let can_graduate = !warnings.iter().any(|w| w.severity == Severity::Error)
            && total_completed >= self.total_credits;

        debug!(
            "Evaluated {} records: {} completed / {} planned credits, {} warnings, can_graduate={}",
            records.len(),
            total_completed,
            total_planned,
            warnings.len(),
            can_graduate
        );

        CreditSummary {
            total_completed,
            total_planned,
            total_required: self.total_credits,
            category_breakdown,
            warnings,
            missing_required,
            can_graduate,
        }
    }

    /// Mandatory catalog courses, minus the other track's, that have no
    /// completed or planned record.
    fn missing_required_courses(
        &self,
        records: &[CourseRecord],
        track: LanguageTrack,
    ) -> Vec<Course> {
        let covered: HashSet<&str> = records
            .iter()
            .filter(|r| r.status.counts_toward_credits())
            .map(|r| r.course_id.as_str())
            .collect();

        self.catalog
            .iter()
            .filter(|course| course.is_required)
            .filter(|course| !track.excludes(&course.category))
            .filter(|course| !covered.contains(course.id.as_str()))
            .cloned()
            .collect()
    }

    /// Appends advisory warnings for planned or in-progress courses whose
    /// prerequisites have no completed record. Advisory only: info severity
    /// never blocks graduation.
    fn push_prerequisite_advisories(
        &self,
        records: &[CourseRecord],
        track: LanguageTrack,
        warnings: &mut Vec<Warning>,
    ) {
        let completed: HashSet<&str> = records
            .iter()
            .filter(|r| r.status == RecordStatus::Completed)
            .map(|r| r.course_id.as_str())
            .collect();

        for record in records {
            if record.status == RecordStatus::Completed {
                continue;
            }
            let course = match self.catalog.get(&record.course_id) {
                Some(course) => course,
                None => continue,
            };
            if track.excludes(&course.category) || course.prerequisite.is_empty() {
                continue;
            }

            let unmet: Vec<String> = course
                .prerequisite
                .iter()
                .filter(|id| !completed.contains(id.as_str()))
                .cloned()
                .collect();

            if !unmet.is_empty() {
                warnings.push(
                    Warning::new(
                        WarningKind::PrerequisiteNotMet,
                        Severity::Info,
                        format!(
                            "{} ({}) has {} unmet prerequisite{}",
                            course.name,
                            course.id,
                            unmet.len(),
                            if unmet.len() == 1 { "" } else { "s" }
                        ),
                    )
                    .with_courses(unmet),
                );
            }
        }
    }

    /// Suggests up to three untaken courses per unsatisfied requirement
    /// leaf, priority-ordered by requirement order. Off-track leaves and
    /// courses the student already has a record for are skipped.
    pub fn recommend_courses(
        &self,
        records: &[CourseRecord],
        track: LanguageTrack,
    ) -> Vec<CourseRecommendation> {
        const MAX_CANDIDATES: usize = 3;

        let recorded: HashSet<&str> = records.iter().map(|r| r.course_id.as_str()).collect();
        let summary = self.evaluate(records, track);

        let mut recommendations = Vec::new();
        let mut priority = 1u32;

        for (leaf, row) in self.leaves.iter().zip(&summary.category_breakdown) {
            if row.remaining == 0 || track.excludes(&leaf.category) {
                continue;
            }

            let candidates: Vec<Course> = self
                .catalog
                .iter()
                .filter(|c| c.category == leaf.category)
                .filter(|c| !recorded.contains(c.id.as_str()))
                .take(MAX_CANDIDATES)
                .cloned()
                .collect();

            if candidates.is_empty() {
                continue;
            }

            recommendations.push(CourseRecommendation {
                category: row.category.clone(),
                priority,
                credits_needed: row.remaining,
                candidates,
            });
            priority += 1;
        }

        recommendations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::config::RequirementCategory;
    use crate::types::CourseTerm;

    fn course(id: &str, credits: u32, category: &str, is_required: bool) -> Course {
        Course {
            id: id.to_string(),
            name: format!("Course {id}"),
            name_en: None,
            credits,
            category: CourseCategory::from(category.to_string()),
            year: 1,
            term: CourseTerm::FirstHalf,
            instructor: "Staff".to_string(),
            is_required,
            department: None,
            prerequisite: Vec::new(),
            notes: None,
        }
    }

    fn leaf(category: &str, required: u32, mandatory: bool) -> RequirementCategory {
        RequirementCategory {
            category: category.to_string(),
            min_credits: Some(required),
            required_credits: None,
            is_required: mandatory,
            subcategories: Vec::new(),
        }
    }

    fn spec(total: u32, categories: Vec<RequirementCategory>) -> GraduationRequirements {
        GraduationRequirements {
            total_credits: total,
            categories,
        }
    }

    fn record(id: &str, status: RecordStatus) -> CourseRecord {
        CourseRecord::new(id, status)
    }

    fn single_course_engine() -> RequirementEngine {
        // Smallest useful fixture: one mandatory 2-credit Humanities
        // course, a 2-credit total, one Humanities leaf requiring 2.
        let catalog = CourseCatalog::new(vec![course("C1", 2, "Humanities", true)]).unwrap();
        RequirementEngine::new(catalog, spec(2, vec![leaf("Humanities", 2, false)]))
    }

    #[test]
    fn test_empty_records_scenario() {
        let engine = single_course_engine();
        let summary = engine.evaluate(&[], LanguageTrack::TrackA);

        assert_eq!(summary.total_completed, 0);
        assert!(!summary.can_graduate);

        let missing = summary
            .warnings
            .iter()
            .find(|w| w.kind == WarningKind::MissingRequired)
            .expect("missing-required warning expected");
        assert_eq!(missing.severity, Severity::Error);
        assert!(missing.message.contains('1'));
        assert_eq!(missing.related_course_ids, vec!["C1"]);
        assert_eq!(summary.missing_required.len(), 1);
    }

    #[test]
    fn test_completed_course_scenario() {
        let engine = single_course_engine();
        let summary = engine.evaluate(
            &[record("C1", RecordStatus::Completed)],
            LanguageTrack::TrackA,
        );

        assert_eq!(summary.total_completed, 2);
        assert_eq!(summary.category_breakdown[0].remaining, 0);
        assert!(summary.can_graduate);
        assert!(!summary.has_errors());
    }

    #[test]
    fn test_duplicate_records_double_count() {
        let engine = single_course_engine();
        let summary = engine.evaluate(
            &[
                record("C1", RecordStatus::Completed),
                record("C1", RecordStatus::Completed),
            ],
            LanguageTrack::TrackA,
        );

        // Each record is processed independently; deduplication is the
        // collection owner's job, not the engine's.
        assert_eq!(summary.total_completed, 4);
    }

    #[test]
    fn test_in_progress_contributes_nothing() {
        let engine = single_course_engine();

        let with = engine.evaluate(
            &[
                record("C1", RecordStatus::Completed),
                record("C1", RecordStatus::InProgress),
            ],
            LanguageTrack::TrackA,
        );
        let without = engine.evaluate(
            &[record("C1", RecordStatus::Completed)],
            LanguageTrack::TrackA,
        );

        assert_eq!(with.total_completed, without.total_completed);
        assert_eq!(with.total_planned, without.total_planned);
    }

    #[test]
    fn test_dangling_reference_is_a_noop() {
        let engine = single_course_engine();

        let with = engine.evaluate(
            &[
                record("C1", RecordStatus::Completed),
                record("GHOST", RecordStatus::Completed),
            ],
            LanguageTrack::TrackA,
        );
        let without = engine.evaluate(
            &[record("C1", RecordStatus::Completed)],
            LanguageTrack::TrackA,
        );

        assert_eq!(with, without);
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let engine = single_course_engine();
        let records = [record("C1", RecordStatus::Planned)];

        let first = engine.evaluate(&records, LanguageTrack::TrackA);
        let second = engine.evaluate(&records, LanguageTrack::TrackA);

        assert_eq!(first, second);
    }

    #[test]
    fn test_adding_a_completed_record_is_monotonic() {
        let catalog = CourseCatalog::new(vec![
            course("C1", 2, "Humanities", false),
            course("C2", 4, "Humanities", false),
        ])
        .unwrap();
        let engine = RequirementEngine::new(catalog, spec(124, vec![leaf("Humanities", 5, false)]));

        let before = engine.evaluate(
            &[record("C1", RecordStatus::Completed)],
            LanguageTrack::TrackA,
        );
        let after = engine.evaluate(
            &[
                record("C1", RecordStatus::Completed),
                record("C2", RecordStatus::Completed),
            ],
            LanguageTrack::TrackA,
        );

        assert_eq!(after.total_completed, before.total_completed + 4);
        let prev_remaining = before.category_breakdown[0].remaining;
        assert_eq!(
            after.category_breakdown[0].remaining,
            prev_remaining - prev_remaining.min(4)
        );
    }

    #[test]
    fn test_language_track_exclusion_is_symmetric() {
        let catalog = CourseCatalog::new(vec![
            course("LA1", 4, "Language A", true),
            course("LB1", 4, "Language B", true),
        ])
        .unwrap();
        let engine = RequirementEngine::new(
            catalog,
            spec(
                4,
                vec![leaf("Language A", 4, false), leaf("Language B", 4, false)],
            ),
        );
        let records = [
            record("LA1", RecordStatus::Completed),
            record("LB1", RecordStatus::Completed),
        ];

        let track_a = engine.evaluate(&records, LanguageTrack::TrackA);
        assert_eq!(track_a.total_completed, 4);
        assert_eq!(track_a.category_breakdown[0].completed, 4);
        assert_eq!(track_a.category_breakdown[1].completed, 0);
        // The off-track mandatory course is not reported missing.
        assert!(track_a.missing_required.is_empty());

        let track_b = engine.evaluate(&records, LanguageTrack::TrackB);
        assert_eq!(track_b.total_completed, 4);
        assert_eq!(track_b.category_breakdown[0].completed, 0);
        assert_eq!(track_b.category_breakdown[1].completed, 4);
        assert!(track_b.missing_required.is_empty());
    }

    #[test]
    fn test_total_threshold_gates_graduation() {
        // Leaf satisfied, total not: canGraduate must be false.
        let catalog = CourseCatalog::new(vec![course("C1", 2, "Humanities", false)]).unwrap();
        let engine = RequirementEngine::new(catalog, spec(10, vec![leaf("Humanities", 2, false)]));

        let summary = engine.evaluate(
            &[record("C1", RecordStatus::Completed)],
            LanguageTrack::TrackA,
        );

        assert_eq!(summary.category_breakdown[0].remaining, 0);
        assert!(!summary.can_graduate);
        let total_warning = &summary.warnings[0];
        assert_eq!(total_warning.kind, WarningKind::InsufficientCredits);
        assert_eq!(total_warning.severity, Severity::Error);
        assert!(total_warning.message.contains('8'), "names the shortfall");
    }

    #[test]
    fn test_unknown_category_counts_toward_total_only() {
        let catalog = CourseCatalog::new(vec![
            course("C1", 2, "Humanities", false),
            course("X1", 3, "Esoteric Studies", false),
        ])
        .unwrap();
        let engine = RequirementEngine::new(catalog, spec(5, vec![leaf("Humanities", 2, false)]));

        let summary = engine.evaluate(
            &[
                record("C1", RecordStatus::Completed),
                record("X1", RecordStatus::Completed),
            ],
            LanguageTrack::TrackA,
        );

        assert_eq!(summary.total_completed, 5);
        assert_eq!(summary.category_breakdown.len(), 1);
        assert_eq!(summary.category_breakdown[0].completed, 2);
        assert!(summary.can_graduate);
    }

    #[test]
    fn test_optional_shortfall_does_not_block_graduation() {
        let catalog = CourseCatalog::new(vec![
            course("C1", 2, "Humanities", false),
            course("S1", 2, "Social Science", false),
        ])
        .unwrap();
        let engine = RequirementEngine::new(
            catalog,
            spec(
                2,
                vec![leaf("Humanities", 2, false), leaf("Social Science", 4, false)],
            ),
        );

        let summary = engine.evaluate(
            &[record("C1", RecordStatus::Completed)],
            LanguageTrack::TrackA,
        );

        let social = summary
            .warnings
            .iter()
            .find(|w| w.message.starts_with("Social Science"))
            .expect("shortfall warning expected");
        assert_eq!(social.severity, Severity::Warning);
        assert!(summary.can_graduate);
    }

    #[test]
    fn test_mandatory_category_shortfall_blocks_graduation() {
        let catalog = CourseCatalog::new(vec![
            course("C1", 2, "Humanities", false),
            course("T1", 2, "Teacher Training", false),
        ])
        .unwrap();
        let engine = RequirementEngine::new(
            catalog,
            spec(
                2,
                vec![leaf("Humanities", 2, false), leaf("Teacher Training", 2, true)],
            ),
        );

        let summary = engine.evaluate(
            &[record("C1", RecordStatus::Completed)],
            LanguageTrack::TrackA,
        );

        let teacher = summary
            .warnings
            .iter()
            .find(|w| w.message.starts_with("Teacher Training"))
            .expect("shortfall warning expected");
        assert_eq!(teacher.severity, Severity::Error);
        assert!(!summary.can_graduate);
    }

    #[test]
    fn test_planned_record_covers_mandatory_course() {
        let engine = single_course_engine();
        let summary = engine.evaluate(
            &[record("C1", RecordStatus::Planned)],
            LanguageTrack::TrackA,
        );

        assert!(summary.missing_required.is_empty());
        assert_eq!(summary.total_planned, 2);
        // Planned credits do not count as completed, so graduation is still
        // out of reach.
        assert!(!summary.can_graduate);
    }

    #[test]
    fn test_warning_order_follows_evaluation_steps() {
        let engine = single_course_engine();
        let summary = engine.evaluate(&[], LanguageTrack::TrackA);

        let kinds: Vec<WarningKind> = summary.warnings.iter().map(|w| w.kind).collect();
        assert_eq!(
            kinds,
            vec![
                WarningKind::InsufficientCredits, // total shortfall
                WarningKind::InsufficientCredits, // Humanities leaf
                WarningKind::MissingRequired,
            ]
        );
    }

    #[test]
    fn test_prerequisite_advisory_is_informational() {
        let mut advanced = course("C2", 2, "Humanities", false);
        advanced.prerequisite = vec!["C1".to_string()];
        let catalog =
            CourseCatalog::new(vec![course("C1", 2, "Humanities", false), advanced]).unwrap();
        let engine = RequirementEngine::new(catalog, spec(2, vec![leaf("Humanities", 2, false)]));

        // C2 is planned but its prerequisite C1 is only planned, not
        // completed.
        let summary = engine.evaluate(
            &[
                record("C1", RecordStatus::Planned),
                record("C2", RecordStatus::Planned),
            ],
            LanguageTrack::TrackA,
        );

        let advisory = summary
            .warnings
            .iter()
            .find(|w| w.kind == WarningKind::PrerequisiteNotMet)
            .expect("advisory expected");
        assert_eq!(advisory.severity, Severity::Info);
        assert_eq!(advisory.related_course_ids, vec!["C1"]);

        // Completing the prerequisite clears the advisory.
        let summary = engine.evaluate(
            &[
                record("C1", RecordStatus::Completed),
                record("C2", RecordStatus::Planned),
            ],
            LanguageTrack::TrackA,
        );
        assert!(summary
            .warnings
            .iter()
            .all(|w| w.kind != WarningKind::PrerequisiteNotMet));
        assert!(summary.can_graduate);
    }

    #[test]
    fn test_recommendations_skip_recorded_and_off_track_courses() {
        let catalog = CourseCatalog::new(vec![
            course("H1", 2, "Humanities", false),
            course("H2", 2, "Humanities", false),
            course("H3", 2, "Humanities", false),
            course("H4", 2, "Humanities", false),
            course("LB1", 4, "Language B", false),
        ])
        .unwrap();
        let engine = RequirementEngine::new(
            catalog,
            spec(
                8,
                vec![leaf("Humanities", 8, false), leaf("Language B", 4, false)],
            ),
        );

        let recommendations = engine.recommend_courses(
            &[record("H1", RecordStatus::Completed)],
            LanguageTrack::TrackA,
        );

        // Only the Humanities leaf is recommended; Language B is off-track.
        assert_eq!(recommendations.len(), 1);
        let humanities = &recommendations[0];
        assert_eq!(humanities.category, "Humanities");
        assert_eq!(humanities.priority, 1);
        assert_eq!(humanities.credits_needed, 6);

        let ids: Vec<&str> = humanities.candidates.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["H2", "H3", "H4"]);
    }

    #[test]
    fn test_recommendations_empty_when_satisfied() {
        let engine = single_course_engine();
        let recommendations = engine.recommend_courses(
            &[record("C1", RecordStatus::Completed)],
            LanguageTrack::TrackA,
        );

        assert!(recommendations.is_empty());
    }
}
