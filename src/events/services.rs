use sqlx::PgPool;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, Time};
use tracing::{info, warn};

use crate::error::ApiError;
use crate::events::dto::{ClassifiedEvents, EventView};
use crate::events::repo::EventWithCreatorRow;

/// Derived state of an event. Never stored; recomputed on every read from
/// (date, time, completed, now).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventPhase {
    Upcoming,
    Completed,
    PastUncompleted,
}

const HMS: &[FormatItem<'static>] = format_description!("[hour]:[minute]:[second]");
const HM: &[FormatItem<'static>] = format_description!("[hour]:[minute]");

/// Wall-clock strings come straight from clients as "HH:MM" or "HH:MM:SS".
/// Anything else falls back to midnight so a malformed time never poisons
/// the whole listing.
fn parse_wall_clock(s: &str) -> Option<Time> {
    let s = s.trim();
    Time::parse(s, HMS).or_else(|_| Time::parse(s, HM)).ok()
}

pub fn classify(date: time::Date, time: &str, completed: bool, now: OffsetDateTime) -> EventPhase {
    if completed {
        return EventPhase::Completed;
    }
    let wall = parse_wall_clock(time).unwrap_or(Time::MIDNIGHT);
    let starts_at = PrimitiveDateTime::new(date, wall).assume_utc();
    if starts_at >= now {
        EventPhase::Upcoming
    } else {
        EventPhase::PastUncompleted
    }
}

/// Split events into the three public buckets: upcoming soonest-first, the
/// other two newest-first.
pub fn bucket_events(rows: Vec<EventWithCreatorRow>, now: OffsetDateTime) -> ClassifiedEvents {
    let mut buckets = ClassifiedEvents::default();
    for row in rows {
        let phase = classify(row.date, &row.time, row.completed, now);
        let view = EventView::from(row);
        match phase {
            EventPhase::Upcoming => buckets.upcoming.push(view),
            EventPhase::Completed => buckets.completed.push(view),
            EventPhase::PastUncompleted => buckets.past_uncompleted.push(view),
        }
    }
    buckets
        .upcoming
        .sort_by(|a, b| (a.date, a.time.as_str()).cmp(&(b.date, b.time.as_str())));
    buckets
        .completed
        .sort_by(|a, b| (b.date, b.time.as_str()).cmp(&(a.date, a.time.as_str())));
    buckets
        .past_uncompleted
        .sort_by(|a, b| (b.date, b.time.as_str()).cmp(&(a.date, a.time.as_str())));
    buckets
}

/// NotJoined -> Joined, the only transition. The participation insert and
/// the counter increment commit together or not at all, so
/// `participant_count` never diverges from the join-record count. A lost
/// insert race reports the same error as a plain repeat join.
pub async fn join_event(db: &PgPool, event_id: i32, user_id: i32) -> Result<(), ApiError> {
    let mut tx = db.begin().await?;

    let exists = sqlx::query_scalar::<_, i32>("SELECT id FROM events WHERE id = $1")
        .bind(event_id)
        .fetch_optional(&mut *tx)
        .await?;
    if exists.is_none() {
        return Err(ApiError::NotFound("Event not found."));
    }

    let inserted = sqlx::query(
        "INSERT INTO event_participants (event_id, user_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
    )
    .bind(event_id)
    .bind(user_id)
    .execute(&mut *tx)
    .await?;
    if inserted.rows_affected() == 0 {
        warn!(event_id, user_id, "repeat join rejected");
        return Err(ApiError::AlreadyJoined);
    }

    sqlx::query("UPDATE events SET participant_count = participant_count + 1 WHERE id = $1")
        .bind(event_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    info!(event_id, user_id, "user joined event");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};
    use time::OffsetDateTime;

    fn row(
        id: i32,
        date: time::Date,
        time: &str,
        completed: bool,
    ) -> EventWithCreatorRow {
        EventWithCreatorRow {
            id,
            title: format!("event {id}"),
            description: "desc".into(),
            location: "campus garden".into(),
            date,
            time: time.into(),
            image_url: None,
            completed,
            participant_count: 0,
            created_by: 1,
            created_at: OffsetDateTime::UNIX_EPOCH,
            creator_name: "Admin".into(),
            creator_username: "admin1".into(),
        }
    }

    #[test]
    fn wall_clock_accepts_both_shapes() {
        assert_eq!(parse_wall_clock("09:30"), Some(Time::from_hms(9, 30, 0).unwrap()));
        assert_eq!(
            parse_wall_clock("23:59:59"),
            Some(Time::from_hms(23, 59, 59).unwrap())
        );
        assert_eq!(parse_wall_clock("half past nine"), None);
        assert_eq!(parse_wall_clock(""), None);
    }

    #[test]
    fn event_one_minute_in_the_future_is_upcoming() {
        let now = datetime!(2026-06-15 12:00:00 UTC);
        assert_eq!(
            classify(date!(2026 - 06 - 15), "12:01", false, now),
            EventPhase::Upcoming
        );
    }

    #[test]
    fn completed_flag_overrides_date_and_time() {
        let now = datetime!(2026-06-15 12:00:00 UTC);
        assert_eq!(
            classify(date!(2026 - 06 - 15), "12:01", true, now),
            EventPhase::Completed
        );
        assert_eq!(
            classify(date!(2020 - 01 - 01), "00:00", true, now),
            EventPhase::Completed
        );
    }

    #[test]
    fn past_event_without_completion_is_past_uncompleted() {
        let now = datetime!(2026-06-15 12:00:00 UTC);
        assert_eq!(
            classify(date!(2026 - 06 - 15), "11:59", false, now),
            EventPhase::PastUncompleted
        );
        assert_eq!(
            classify(date!(2026 - 06 - 14), "23:00", false, now),
            EventPhase::PastUncompleted
        );
    }

    #[test]
    fn event_starting_exactly_now_is_upcoming() {
        let now = datetime!(2026-06-15 12:00:00 UTC);
        assert_eq!(
            classify(date!(2026 - 06 - 15), "12:00:00", false, now),
            EventPhase::Upcoming
        );
    }

    #[test]
    fn unparseable_time_falls_back_to_midnight() {
        let now = datetime!(2026-06-15 12:00:00 UTC);
        // Same calendar day at midnight is already in the past at noon.
        assert_eq!(
            classify(date!(2026 - 06 - 15), "around lunch", false, now),
            EventPhase::PastUncompleted
        );
        assert_eq!(
            classify(date!(2026 - 06 - 16), "around lunch", false, now),
            EventPhase::Upcoming
        );
    }

    #[test]
    fn buckets_split_and_order_correctly() {
        let now = datetime!(2026-06-15 12:00:00 UTC);
        let rows = vec![
            row(1, date!(2026 - 06 - 20), "10:00", false), // upcoming, later
            row(2, date!(2026 - 06 - 16), "09:00", false), // upcoming, sooner
            row(3, date!(2026 - 06 - 01), "10:00", true),  // completed, older
            row(4, date!(2026 - 06 - 10), "10:00", true),  // completed, newer
            row(5, date!(2026 - 06 - 14), "10:00", false), // past uncompleted
        ];
        let buckets = bucket_events(rows, now);

        let ids = |v: &[EventView]| v.iter().map(|e| e.id).collect::<Vec<_>>();
        assert_eq!(ids(&buckets.upcoming), vec![2, 1]);
        assert_eq!(ids(&buckets.completed), vec![4, 3]);
        assert_eq!(ids(&buckets.past_uncompleted), vec![5]);
        assert!(buckets.upcoming[0].creator.is_some());
    }

    #[test]
    fn same_day_events_order_by_time_within_bucket() {
        let now = datetime!(2026-06-15 12:00:00 UTC);
        let rows = vec![
            row(1, date!(2026 - 06 - 16), "15:00", false),
            row(2, date!(2026 - 06 - 16), "09:30", false),
        ];
        let buckets = bucket_events(rows, now);
        assert_eq!(
            buckets.upcoming.iter().map(|e| e.id).collect::<Vec<_>>(),
            vec![2, 1]
        );
    }
}
