//! Announcement Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Announcement entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Announcement {
    pub id: Option<String>,
    pub title: String,
    pub content: String,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create announcement payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AnnouncementCreate {
    #[validate(length(min = 1))]
    pub title: String,
    pub content: String,
    pub is_active: Option<bool>,
}

/// Update announcement payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AnnouncementUpdate {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_active: Option<bool>,
}

/// Pick "the" active announcement.
///
/// Several announcements may be flagged active at once; the most recently
/// updated one wins so the tie-break is deterministic rather than depending
/// on store iteration order.
pub fn active_announcement(announcements: &[Announcement]) -> Option<&Announcement> {
    announcements
        .iter()
        .filter(|a| a.is_active)
        .max_by_key(|a| a.updated_at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn announcement(title: &str, is_active: bool, updated_secs: i64) -> Announcement {
        Announcement {
            id: Some(format!("ann_{title}")),
            title: title.to_string(),
            content: String::new(),
            is_active,
            created_at: None,
            updated_at: Some(Utc.timestamp_opt(updated_secs, 0).unwrap()),
        }
    }

    #[test]
    fn most_recently_updated_active_wins() {
        let anns = vec![
            announcement("old", true, 100),
            announcement("inactive", false, 300),
            announcement("new", true, 200),
        ];
        assert_eq!(active_announcement(&anns).unwrap().title, "new");
    }

    #[test]
    fn none_when_all_inactive() {
        let anns = vec![announcement("a", false, 100)];
        assert!(active_announcement(&anns).is_none());
    }
}
