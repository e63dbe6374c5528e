//! CSV rendering of the catalog joined with the student's record statuses.
//!
//! Pure string building; where the bytes go is the caller's concern.

use crate::catalog::CourseCatalog;
use crate::types::CourseRecord;

/// Spreadsheet apps need the BOM to detect UTF-8 in CSV files.
const BOM: &str = "\u{feff}";

fn csv_escape(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn to_csv_line(values: &[String]) -> String {
    values
        .iter()
        .map(|v| csv_escape(v))
        .collect::<Vec<String>>()
        .join(",")
}

/// Builds a CSV listing of every catalog course with the student's status.
pub fn records_to_csv(catalog: &CourseCatalog, records: &[CourseRecord]) -> String {
    let header: Vec<String> = [
        "id",
        "name",
        "nameEn",
        "credits",
        "category",
        "year",
        "term",
        "instructor",
        "required",
        "status",
        "notes",
    ]
    .into_iter()
    .map(|s| s.to_string())
    .collect();

    let mut lines = Vec::with_capacity(catalog.len() + 1);
    lines.push(to_csv_line(&header));

    for course in catalog.iter() {
        let status = records
            .iter()
            .find(|r| r.course_id == course.id)
            .map(|r| r.status.label())
            .unwrap_or("not-taken");

        lines.push(to_csv_line(&[
            course.id.clone(),
            course.name.clone(),
            course.name_en.clone().unwrap_or_default(),
            course.credits.to_string(),
            course.category.to_string(),
            course.year.to_string(),
            course.term.label().to_string(),
            course.instructor.clone(),
            if course.is_required {
                "required".to_string()
            } else {
                String::new()
            },
            status.to_string(),
            course.notes.clone().unwrap_or_default(),
        ]));
    }

    format!("{BOM}{}\n", lines.join("\n"))
}
