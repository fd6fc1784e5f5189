use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::models::{Category, Event};

pub const SEED_CREATOR_ID: &str = "system";

/// What hydration does when the persisted slot is absent or empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SeedPolicy {
    /// Start with the demonstration events.
    #[default]
    SeedOnEmpty,
    /// Start with an empty collection.
    StartEmpty,
}

impl SeedPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeedPolicy::SeedOnEmpty => "seed-on-empty",
            SeedPolicy::StartEmpty => "start-empty",
        }
    }
}

impl fmt::Display for SeedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeedPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "seed-on-empty" | "seed" => Ok(SeedPolicy::SeedOnEmpty),
            "start-empty" | "empty" => Ok(SeedPolicy::StartEmpty),
            other => Err(other.to_string()),
        }
    }
}

fn demo(
    title: &str,
    description: &str,
    date: &str,
    location: &str,
    category: Category,
    attendees: u32,
) -> Event {
    Event {
        id: Uuid::new_v4().to_string(),
        title: title.to_string(),
        description: description.to_string(),
        date: date.to_string(),
        location: location.to_string(),
        category,
        creator_id: SEED_CREATOR_ID.to_string(),
        attendees,
    }
}

/// Demonstration events, each with a freshly generated id.
pub fn default_events() -> Vec<Event> {
    vec![
        demo(
            "Tech Conference 2025",
            "Annual technology conference featuring talks from industry leaders about the latest trends in software development, AI, and cloud computing.",
            "2025-06-15T09:00:00",
            "Convention Center, Hall A",
            Category::Conference,
            42,
        ),
        demo(
            "React Workshop for Beginners",
            "Hands-on workshop to learn React fundamentals. Bring your laptop and we'll build a small application together.",
            "2025-05-20T14:00:00",
            "Tech Hub, Room 302",
            Category::Workshop,
            18,
        ),
        demo(
            "Developer Meetup: AI & Machine Learning",
            "Casual networking event for developers interested in AI and machine learning technologies. Food and drinks provided.",
            "2025-05-25T18:30:00",
            "Downtown Coffee Shop",
            Category::Meetup,
            25,
        ),
        demo(
            "Web Performance Optimization Seminar",
            "Learn techniques to improve your website loading times and overall performance from industry experts.",
            "2025-06-05T10:00:00",
            "Business Center, Suite 200",
            Category::Seminar,
            15,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventDraft;
    use crate::store::validation::validate_draft;
    use std::collections::HashSet;

    #[test]
    fn test_default_events_have_unique_ids() {
        let events = default_events();
        let ids: HashSet<_> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(events.len(), 4);
        assert_eq!(ids.len(), 4);
        assert!(events.iter().all(|e| e.creator_id == SEED_CREATOR_ID));
    }

    #[test]
    fn test_default_events_pass_draft_validation() {
        for event in default_events() {
            let draft = EventDraft {
                title: event.title,
                description: event.description,
                date: event.date,
                location: event.location,
                category: event.category.to_string(),
            };
            assert!(validate_draft(&draft).is_ok());
        }
    }

    #[test]
    fn test_seed_policy_parsing() {
        assert_eq!("seed-on-empty".parse::<SeedPolicy>(), Ok(SeedPolicy::SeedOnEmpty));
        assert_eq!(" Start-Empty ".parse::<SeedPolicy>(), Ok(SeedPolicy::StartEmpty));
        assert!("sometimes".parse::<SeedPolicy>().is_err());
    }
}
