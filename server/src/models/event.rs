use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The fixed set of categories an event can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Conference,
    Workshop,
    Meetup,
    Seminar,
    Networking,
    Social,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Conference,
        Category::Workshop,
        Category::Meetup,
        Category::Seminar,
        Category::Networking,
        Category::Social,
        Category::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Conference => "Conference",
            Category::Workshop => "Workshop",
            Category::Meetup => "Meetup",
            Category::Seminar => "Seminar",
            Category::Networking => "Networking",
            Category::Social => "Social",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Case-insensitive on the trimmed input.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCategory(wanted.to_string()))
    }
}

/// A persisted event record. Serialized with the camelCase field names
/// used by the storage slot and the HTTP API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    /// ISO-8601 timestamp, kept exactly as the creator supplied it.
    pub date: String,
    pub location: String,
    pub category: Category,
    pub creator_id: String,
    pub attendees: u32,
}

/// The caller-supplied part of an event, used for create and update.
/// Absent fields deserialize as empty so validation can name them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub date: String,
    pub location: String,
    pub category: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Meetup", Category::Meetup)]
    #[case("  workshop ", Category::Workshop)]
    #[case("CONFERENCE", Category::Conference)]
    fn test_category_parses_case_insensitively(#[case] input: &str, #[case] expected: Category) {
        assert_eq!(input.parse::<Category>(), Ok(expected));
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        assert_eq!(
            "Party".parse::<Category>(),
            Err(UnknownCategory("Party".to_string()))
        );
    }

    #[test]
    fn test_draft_missing_fields_deserialize_empty() {
        let draft: EventDraft = serde_json::from_str(r#"{"title":"x"}"#).unwrap();
        assert_eq!(draft.title, "x");
        assert!(draft.description.is_empty());
        assert!(draft.category.is_empty());
    }

    #[test]
    fn test_event_uses_camel_case_wire_names() {
        let event = Event {
            id: "e-1".to_string(),
            title: "Launch".to_string(),
            description: "d".to_string(),
            date: "2025-01-01T10:00:00Z".to_string(),
            location: "HQ".to_string(),
            category: Category::Meetup,
            creator_id: "u1".to_string(),
            attendees: 3,
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "e-1",
                "title": "Launch",
                "description": "d",
                "date": "2025-01-01T10:00:00Z",
                "location": "HQ",
                "category": "Meetup",
                "creatorId": "u1",
                "attendees": 3
            })
        );
    }
}
