use std::fmt;

use chrono::{DateTime, NaiveDateTime};
use serde::Serialize;

use crate::models::{Category, EventDraft};

const LOCAL_DATE_TIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldProblem {
    Missing,
    UnknownCategory,
    InvalidDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub problem: FieldProblem,
}

impl FieldError {
    fn new(field: &'static str, problem: FieldProblem) -> Self {
        Self { field, problem }
    }
}

/// Every field that failed validation, in draft field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub fields: Vec<FieldError>,
}

impl ValidationError {
    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.field).collect()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid fields: {}", self.field_names().join(", "))
    }
}

impl std::error::Error for ValidationError {}

/// A draft whose fields all passed validation, with the category resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDraft {
    pub title: String,
    pub description: String,
    pub date: String,
    pub location: String,
    pub category: Category,
}

pub fn validate_draft(draft: &EventDraft) -> Result<ValidDraft, ValidationError> {
    let mut fields = Vec::new();

    for (name, value) in [
        ("title", &draft.title),
        ("description", &draft.description),
    ] {
        if is_blank(value) {
            fields.push(FieldError::new(name, FieldProblem::Missing));
        }
    }

    if is_blank(&draft.date) {
        fields.push(FieldError::new("date", FieldProblem::Missing));
    } else if !is_iso_timestamp(&draft.date) {
        fields.push(FieldError::new("date", FieldProblem::InvalidDate));
    }

    if is_blank(&draft.location) {
        fields.push(FieldError::new("location", FieldProblem::Missing));
    }

    let category = if is_blank(&draft.category) {
        fields.push(FieldError::new("category", FieldProblem::Missing));
        None
    } else {
        match draft.category.parse::<Category>() {
            Ok(category) => Some(category),
            Err(_) => {
                fields.push(FieldError::new("category", FieldProblem::UnknownCategory));
                None
            }
        }
    };

    match category {
        Some(category) if fields.is_empty() => Ok(ValidDraft {
            title: draft.title.clone(),
            description: draft.description.clone(),
            date: draft.date.clone(),
            location: draft.location.clone(),
            category,
        }),
        _ => Err(ValidationError { fields }),
    }
}

pub fn validate_creator(creator_id: &str) -> Result<(), ValidationError> {
    if is_blank(creator_id) {
        return Err(ValidationError {
            fields: vec![FieldError::new("creatorId", FieldProblem::Missing)],
        });
    }
    Ok(())
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// RFC 3339 with an offset, or a local date-time without one.
fn is_iso_timestamp(value: &str) -> bool {
    let value = value.trim();
    DateTime::parse_from_rfc3339(value).is_ok()
        || LOCAL_DATE_TIME_FORMATS
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(value, fmt).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn draft() -> EventDraft {
        EventDraft {
            title: "Launch".to_string(),
            description: "d".to_string(),
            date: "2025-01-01T10:00:00Z".to_string(),
            location: "HQ".to_string(),
            category: "Meetup".to_string(),
        }
    }

    #[test]
    fn test_complete_draft_is_valid() {
        let valid = validate_draft(&draft()).unwrap();
        assert_eq!(valid.category, Category::Meetup);
        assert_eq!(valid.title, "Launch");
    }

    #[rstest]
    #[case("2025-01-01T10:00:00Z")]
    #[case("2025-01-01T10:00:00+02:00")]
    #[case("2025-06-15T09:00:00")]
    #[case("2025-06-15T09:00:00.250")]
    #[case("2025-06-15T09:00")]
    fn test_accepts_iso_timestamps(#[case] date: &str) {
        let draft = EventDraft {
            date: date.to_string(),
            ..draft()
        };
        assert!(validate_draft(&draft).is_ok(), "{date} should be accepted");
    }

    #[rstest]
    #[case("title")]
    #[case("description")]
    #[case("date")]
    #[case("location")]
    #[case("category")]
    fn test_blank_field_is_reported_missing(#[case] field: &str) {
        let mut draft = draft();
        match field {
            "title" => draft.title = "   ".to_string(),
            "description" => draft.description = String::new(),
            "date" => draft.date = String::new(),
            "location" => draft.location = "\t".to_string(),
            _ => draft.category = String::new(),
        }

        let err = validate_draft(&draft).unwrap_err();
        assert_eq!(err.fields.len(), 1);
        assert_eq!(err.fields[0].field, field);
        assert_eq!(err.fields[0].problem, FieldProblem::Missing);
    }

    #[test]
    fn test_reports_every_failing_field() {
        let draft = EventDraft {
            title: String::new(),
            date: "next tuesday".to_string(),
            category: "Party".to_string(),
            ..draft()
        };

        let err = validate_draft(&draft).unwrap_err();
        assert_eq!(
            err.fields,
            vec![
                FieldError::new("title", FieldProblem::Missing),
                FieldError::new("date", FieldProblem::InvalidDate),
                FieldError::new("category", FieldProblem::UnknownCategory),
            ]
        );
        assert_eq!(err.to_string(), "invalid fields: title, date, category");
    }

    #[test]
    fn test_blank_creator_is_rejected() {
        let err = validate_creator("  ").unwrap_err();
        assert_eq!(err.field_names(), vec!["creatorId"]);
        assert!(validate_creator("u1").is_ok());
    }
}
