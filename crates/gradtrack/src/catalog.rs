//! Course catalog: ordered, id-indexed, read-only reference data.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::category::CourseCategory;
use crate::error::ConfigError;
use crate::types::{Course, CourseTerm};

/// On-disk shape of a catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub courses: Vec<Course>,
}

/// The static list of all offerable courses for a program, unique by id.
///
/// Load order is preserved; [`sorted_by`] returns reordered views without
/// disturbing it.
///
/// [`sorted_by`]: CourseCatalog::sorted_by
#[derive(Debug, Clone)]
pub struct CourseCatalog {
    courses: Vec<Course>,
    by_id: HashMap<String, usize>,
}

impl CourseCatalog {
    /// Builds a catalog, rejecting duplicate ids and zero-credit courses.
    pub fn new(courses: Vec<Course>) -> Result<Self, ConfigError> {
        let mut by_id = HashMap::with_capacity(courses.len());

        for (idx, course) in courses.iter().enumerate() {
            if course.credits == 0 {
                return Err(ConfigError::NonPositiveCredits {
                    id: course.id.clone(),
                });
            }
            if by_id.insert(course.id.clone(), idx).is_some() {
                return Err(ConfigError::DuplicateCourseId {
                    id: course.id.clone(),
                });
            }
        }

        Ok(Self { courses, by_id })
    }

    /// Loads and validates a catalog from a JSON file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let file: CatalogFile =
            serde_json::from_str(&content).map_err(|e| ConfigError::parse(path, e))?;
        let catalog = Self::new(file.courses)?;

        info!(
            "Loaded catalog with {} courses from {}",
            catalog.len(),
            path.display()
        );

        Ok(catalog)
    }

    /// Looks up a course by id.
    pub fn get(&self, id: &str) -> Option<&Course> {
        self.by_id.get(id).map(|&idx| &self.courses[idx])
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn iter(&self) -> impl Iterator<Item = &Course> {
        self.courses.iter()
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Applies free-text and attribute filters, preserving catalog order.
    pub fn filter(&self, criteria: &SearchCriteria) -> Vec<&Course> {
        self.courses
            .iter()
            .filter(|course| criteria.matches(course))
            .collect()
    }

    /// Returns the courses reordered by the given key.
    pub fn sorted_by(&self, key: SortKey) -> Vec<&Course> {
        let mut courses: Vec<&Course> = self.courses.iter().collect();

        match key {
            SortKey::YearThenTerm => {
                courses.sort_by(|a, b| a.year.cmp(&b.year).then(a.term.cmp(&b.term)));
            }
            SortKey::Category => {
                courses.sort_by(|a, b| a.category.canonical_label().cmp(b.category.canonical_label()));
            }
            SortKey::Name => {
                courses.sort_by(|a, b| a.name.cmp(&b.name));
            }
        }

        courses
    }
}

/// Free-text and attribute filters for catalog queries.
///
/// Every field is optional; an empty criteria set matches everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    /// Matched case-insensitively against id, name, and English name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,

    /// Courses with year 0 (open to all years) match any requested year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CourseCategory>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<CourseTerm>,

    #[serde(default)]
    pub only_required: bool,
}

impl SearchCriteria {
    fn matches(&self, course: &Course) -> bool {
        if let Some(keyword) = &self.keyword {
            let keyword = keyword.to_lowercase();
            let name_match = course.name.to_lowercase().contains(&keyword);
            let name_en_match = course
                .name_en
                .as_ref()
                .is_some_and(|n| n.to_lowercase().contains(&keyword));
            let id_match = course.id.to_lowercase().contains(&keyword);

            if !name_match && !name_en_match && !id_match {
                return false;
            }
        }

        if let Some(instructor) = &self.instructor {
            if !course
                .instructor
                .to_lowercase()
                .contains(&instructor.to_lowercase())
            {
                return false;
            }
        }

        if let Some(year) = self.year {
            if course.year != year && course.year != 0 {
                return false;
            }
        }

        if let Some(category) = &self.category {
            if course.category != *category {
                return false;
            }
        }

        if let Some(term) = self.term {
            if course.term != term {
                return false;
            }
        }

        if self.only_required && !course.is_required {
            return false;
        }

        true
    }
}

/// Orderings for course listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Academic year, then first-half before second-half before full-year.
    YearThenTerm,
    Category,
    Name,
}
