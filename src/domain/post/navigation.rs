// src/domain/post/navigation.rs
//! Queries over the published timeline.
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::locale::Locale;
use crate::domain::post::publish;
use crate::domain::post::query::{PostField, PostOrder, PostQuery};
use crate::domain::translation::{Comparison, Condition, FieldValue};
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

/// Earliest non-draft post published strictly after `published_at`.
pub fn next_query(published_at: DateTime<Utc>, locale: Locale) -> PostQuery {
    PostQuery::new(locale)
        .translated()
        .filter(Condition::new(
            PostField::PublishedAt,
            Comparison::Gt,
            FieldValue::Time(published_at),
        ))
        .filter(Condition::eq(PostField::Draft, FieldValue::Bool(false)))
        .order(PostOrder::OldestFirst)
        .limit(1)
}

/// Latest non-draft post published strictly before `published_at`. Only the
/// draft flag is checked, not the current time.
pub fn previous_query(published_at: DateTime<Utc>, locale: Locale) -> PostQuery {
    published_before_query(published_at, locale).limit(1)
}

pub fn published_before_query(date: DateTime<Utc>, locale: Locale) -> PostQuery {
    PostQuery::new(locale)
        .translated()
        .filters(publish::published_before_conditions(date))
        .order(PostOrder::NewestFirst)
}

/// Every post published within the month of `date`, whatever its locale
/// coverage or draft state.
pub fn month_query(date: NaiveDate, locale: Locale) -> DomainResult<PostQuery> {
    let (start, end) = month_bounds(date)?;
    Ok(PostQuery::new(locale)
        .filters(range_conditions(start, end))
        .order(PostOrder::NewestFirst))
}

pub fn year_query(date: NaiveDate, locale: Locale) -> DomainResult<PostQuery> {
    let (start, end) = year_bounds(date)?;
    Ok(PostQuery::new(locale)
        .translated()
        .filters(range_conditions(start, end))
        .order(PostOrder::NewestFirst))
}

pub fn recent_query(count: u32, now: DateTime<Utc>, locale: Locale) -> PostQuery {
    PostQuery::new(locale)
        .live(now)
        .order(PostOrder::NewestFirst)
        .limit(count)
}

pub fn popular_query(count: u32, locale: Locale) -> PostQuery {
    PostQuery::new(locale)
        .translated()
        .order(PostOrder::MostViewed)
        .limit(count)
}

fn range_conditions(start: DateTime<Utc>, end: DateTime<Utc>) -> [Condition<PostField>; 2] {
    [
        Condition::new(PostField::PublishedAt, Comparison::Ge, FieldValue::Time(start)),
        Condition::new(PostField::PublishedAt, Comparison::Le, FieldValue::Time(end)),
    ]
}

fn start_of_day(date: NaiveDate) -> DomainResult<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
        .ok_or_else(|| DomainError::invalid("date", "is out of range"))
}

fn first_of_month(year: i32, month: u32) -> DomainResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| DomainError::invalid("date", "is out of range"))
}

/// `[start of month, end of month]`, both inclusive, at microsecond precision.
pub fn month_bounds(date: NaiveDate) -> DomainResult<(DateTime<Utc>, DateTime<Utc>)> {
    let start = first_of_month(date.year(), date.month())?;
    let next = if date.month() == 12 {
        first_of_month(date.year() + 1, 1)?
    } else {
        first_of_month(date.year(), date.month() + 1)?
    };
    Ok((
        start_of_day(start)?,
        start_of_day(next)? - Duration::microseconds(1),
    ))
}

pub fn year_bounds(date: NaiveDate) -> DomainResult<(DateTime<Utc>, DateTime<Utc>)> {
    let start = first_of_month(date.year(), 1)?;
    let next = first_of_month(date.year() + 1, 1)?;
    Ok((
        start_of_day(start)?,
        start_of_day(next)? - Duration::microseconds(1),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::post::query::LocaleJoin;
    use chrono::{TimeZone, Timelike};

    fn en() -> Locale {
        Locale::new("en").unwrap()
    }

    #[test]
    fn month_bounds_cover_the_whole_month() {
        let (start, end) = month_bounds(NaiveDate::from_ymd_opt(2024, 2, 17).unwrap()).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());
        assert_eq!(end.day(), 29);
        assert_eq!((end.hour(), end.minute(), end.second()), (23, 59, 59));

        let (_, december_end) =
            month_bounds(NaiveDate::from_ymd_opt(2023, 12, 5).unwrap()).unwrap();
        assert_eq!(december_end.year(), 2023);
        assert_eq!(december_end.month(), 12);
    }

    #[test]
    fn month_listing_is_not_locale_joined_but_year_listing_is() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(month_query(date, en()).unwrap().join, LocaleJoin::Left);
        assert_eq!(year_query(date, en()).unwrap().join, LocaleJoin::Inner);
    }

    #[test]
    fn previous_checks_only_the_draft_flag() {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        let query = previous_query(at, en());
        assert_eq!(query.order, PostOrder::NewestFirst);
        assert_eq!(query.limit, Some(1));
        assert!(
            query
                .conditions
                .iter()
                .all(|c| !(c.field == PostField::PublishedAt && c.comparison == Comparison::Le))
        );
    }

    #[test]
    fn next_orders_ascending() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let query = next_query(at, en());
        assert_eq!(query.order, PostOrder::OldestFirst);
        assert_eq!(query.limit, Some(1));
    }
}
