//! Requirement specification: external JSON configuration, validated at the
//! load boundary so the engine can assume structurally sound input.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::category::CourseCategory;
use crate::error::ConfigError;

/// Top-level graduation requirement specification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraduationRequirements {
    /// Overall credit threshold for graduation.
    pub total_credits: u32,

    /// Ordered category requirements; order is preserved through to the
    /// summary's breakdown rows.
    pub categories: Vec<RequirementCategory>,
}

/// One entry in the requirement list: either a leaf carrying its own credit
/// thresholds, or a parent grouping subcategories. Never both.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementCategory {
    /// Canonical category label for a leaf; a free display name for a
    /// parent grouping.
    pub category: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_credits: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_credits: Option<u32>,

    /// Whether a shortfall in this leaf blocks graduation.
    #[serde(default)]
    pub is_required: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subcategories: Vec<SubcategoryRequirement>,
}

impl RequirementCategory {
    fn has_own_threshold(&self) -> bool {
        self.min_credits.is_some() || self.required_credits.is_some()
    }
}

/// A subcategory leaf under a parent requirement entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubcategoryRequirement {
    /// Canonical category label.
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_credits: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_credits: Option<u32>,
}

impl GraduationRequirements {
    /// Loads and validates a requirement spec from a JSON file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let requirements: GraduationRequirements =
            serde_json::from_str(&content).map_err(|e| ConfigError::parse(path, e))?;
        requirements.validate()?;

        info!(
            "Loaded requirement spec from {}: {} total credits across {} leaves",
            path.display(),
            requirements.total_credits,
            requirements.leaves().len()
        );

        Ok(requirements)
    }

    /// Rejects structurally invalid specs: a zero graduation threshold,
    /// entries mixing direct thresholds with subcategories, and leaves
    /// carrying no threshold at all.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_credits == 0 {
            return Err(ConfigError::NonPositiveTotal);
        }

        for entry in &self.categories {
            if !entry.subcategories.is_empty() {
                if entry.has_own_threshold() {
                    return Err(ConfigError::MixedCategory {
                        category: entry.category.clone(),
                    });
                }
                for sub in &entry.subcategories {
                    if sub.min_credits.is_none() && sub.required_credits.is_none() {
                        return Err(ConfigError::MissingThreshold {
                            category: sub.name.clone(),
                        });
                    }
                }
            } else if !entry.has_own_threshold() {
                return Err(ConfigError::MissingThreshold {
                    category: entry.category.clone(),
                });
            }
        }

        Ok(())
    }

    /// Flattens the category tree into ordered requirement leaves, applying
    /// the required-falls-back-to-min rule.
    pub(crate) fn leaves(&self) -> Vec<RequirementLeaf> {
        let mut leaves = Vec::new();

        for entry in &self.categories {
            if entry.subcategories.is_empty() {
                leaves.push(RequirementLeaf {
                    category: CourseCategory::from(entry.category.clone()),
                    required_credits: entry
                        .required_credits
                        .or(entry.min_credits)
                        .unwrap_or(0),
                    mandatory: entry.is_required,
                });
            } else {
                for sub in &entry.subcategories {
                    leaves.push(RequirementLeaf {
                        category: CourseCategory::from(sub.name.clone()),
                        required_credits: sub.required_credits.or(sub.min_credits).unwrap_or(0),
                        // A subcategory is never itself mandatory; only a
                        // direct leaf can escalate its shortfall to an error.
                        mandatory: false,
                    });
                }
            }
        }

        leaves
    }
}

/// A single category or subcategory entry carrying its own threshold.
#[derive(Debug, Clone)]
pub(crate) struct RequirementLeaf {
    pub category: CourseCategory,
    pub required_credits: u32,
    pub mandatory: bool,
}
