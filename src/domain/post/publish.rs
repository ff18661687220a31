// src/domain/post/publish.rs
use crate::domain::post::query::PostField;
use crate::domain::translation::{Comparison, Condition, FieldValue};
use chrono::{DateTime, Utc};

/// A post is live when it is not a draft and its publish time has passed.
pub fn is_live(draft: bool, published_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    !draft && published_at <= now
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishState {
    Draft,
    Scheduled,
    Live,
}

impl PublishState {
    pub fn of(draft: bool, published_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if draft {
            PublishState::Draft
        } else if is_live(draft, published_at, now) {
            PublishState::Live
        } else {
            PublishState::Scheduled
        }
    }
}

/// Predicate form of [`is_live`] for queries.
pub fn live_conditions(now: DateTime<Utc>) -> Vec<Condition<PostField>> {
    vec![
        Condition::eq(PostField::Draft, FieldValue::Bool(false)),
        Condition::new(PostField::PublishedAt, Comparison::Le, FieldValue::Time(now)),
    ]
}

/// Non-draft posts published strictly before `date`. Unlike
/// [`live_conditions`] this ignores the current time.
pub fn published_before_conditions(date: DateTime<Utc>) -> Vec<Condition<PostField>> {
    vec![
        Condition::eq(PostField::Draft, FieldValue::Bool(false)),
        Condition::new(PostField::PublishedAt, Comparison::Lt, FieldValue::Time(date)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn live_boundary_is_inclusive() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        assert!(is_live(false, now, now));
        assert!(!is_live(false, now + Duration::seconds(1), now));
        assert!(!is_live(true, now - Duration::days(1), now));
    }

    #[test]
    fn classifies_publish_state() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(PublishState::of(true, now, now), PublishState::Draft);
        assert_eq!(
            PublishState::of(false, now + Duration::hours(1), now),
            PublishState::Scheduled
        );
        assert_eq!(PublishState::of(false, now, now), PublishState::Live);
    }
}
