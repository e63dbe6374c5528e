//! Canonical requirement-bucket categories and the raw-label lookup table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical course category, as used by the requirement specification.
///
/// Catalog files carry raw labels in several shapes: the plain Japanese
/// label, the plain English label, or a combined bilingual form. The
/// `From<String>` conversion applies a fixed lookup table once, at the serde
/// boundary, so every downstream consumer works with one enumerated type.
///
/// Labels outside the table pass through unchanged as [`Other`]: an unknown
/// category never breaks aggregation, it simply matches no requirement
/// bucket. Its credits still count toward the grand total.
///
/// [`Other`]: CourseCategory::Other
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CourseCategory {
    Humanities,
    SocialScience,
    NaturalScience,
    LanguageA,
    LanguageB,
    HealthAndSports,
    CareerDesign,
    InformationAndMedia,
    MathematicalInformation,
    SocialInformation,
    MediaExpression,
    Comprehensive,
    TeacherTraining,
    /// An unmapped raw label, carried through untouched.
    Other(String),
}

impl CourseCategory {
    /// The normalized label the requirement spec uses for this category.
    pub fn canonical_label(&self) -> &str {
        match self {
            CourseCategory::Humanities => "Humanities",
            CourseCategory::SocialScience => "Social Science",
            CourseCategory::NaturalScience => "Natural Science",
            CourseCategory::LanguageA => "Language A",
            CourseCategory::LanguageB => "Language B",
            CourseCategory::HealthAndSports => "Health and Sports",
            CourseCategory::CareerDesign => "Career Design",
            CourseCategory::InformationAndMedia => "Information and Media",
            CourseCategory::MathematicalInformation => "Mathematical Information",
            CourseCategory::SocialInformation => "Social Information",
            CourseCategory::MediaExpression => "Media Expression",
            CourseCategory::Comprehensive => "Comprehensive",
            CourseCategory::TeacherTraining => "Teacher Training",
            CourseCategory::Other(raw) => raw,
        }
    }

    fn lookup(label: &str) -> Option<CourseCategory> {
        use CourseCategory::*;

        let category = match label {
            "Humanities" | "人文科学系" | "人文科学系(Humanities)" | "Humanities(人文科学系)" => {
                Humanities
            }
            "Social Science"
            | "社会科学系"
            | "社会科学系(Social Science)"
            | "Social Science(社会科学系)" => SocialScience,
            "Natural Science"
            | "自然科学系"
            | "自然科学系(Natural Science)"
            | "Natural Science(自然科学系)" => NaturalScience,
            "Language A" | "語学系A" | "語学系A(Language A)" | "Language A(語学系A)" => LanguageA,
            "Language B" | "語学系B" | "語学系B(Language B)" | "Language B(語学系B)" => LanguageB,
            "Health and Sports"
            | "健康とスポーツ系"
            | "健康とスポーツ系(Health and Sports)"
            | "Health and Sports(健康とスポーツ系)" => HealthAndSports,
            "Career Design"
            | "キャリア・デザイン系"
            | "キャリア・デザイン系(Career Design)"
            | "Career Design(キャリア・デザイン系)" => CareerDesign,
            "Information and Media"
            | "情報・メディア系"
            | "情報・メディア系(Information and Media)"
            | "Information and Media(情報・メディア系)" => InformationAndMedia,
            "Mathematical Information"
            | "数理情報系"
            | "数理情報系(Mathematical Information)"
            | "Mathematical Information(数理情報系)" => MathematicalInformation,
            "Social Information"
            | "社会情報系"
            | "社会情報系(Social Information)"
            | "Social Information(社会情報系)" => SocialInformation,
            "Media Expression"
            | "メディア表現系"
            | "メディア表現系(Media Expression)"
            | "Media Expression(メディア表現系)" => MediaExpression,
            "Comprehensive" | "総合系" | "総合系(Comprehensive)" | "Comprehensive(総合系)" => {
                Comprehensive
            }
            "Teacher Training"
            | "教職課程"
            | "教職課程(Teacher Training)"
            | "Teacher Training(教職課程)" => TeacherTraining,
            _ => return None,
        };

        Some(category)
    }
}

impl From<String> for CourseCategory {
    fn from(raw: String) -> Self {
        CourseCategory::lookup(raw.trim()).unwrap_or(CourseCategory::Other(raw))
    }
}

impl From<CourseCategory> for String {
    fn from(category: CourseCategory) -> Self {
        category.canonical_label().to_string()
    }
}

impl fmt::Display for CourseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_label())
    }
}
