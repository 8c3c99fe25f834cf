//! Time-window calculator
//!
//! Pure calendar math for the two voting tracks: the canonical Sunday
//! 11:00 deadline, the Monday week identifier scoping Sunday cohorts,
//! and flexible deadlines derived from a date plus meal slot. All math
//! runs in UTC, the engine's single house timezone.

use chrono::{DateTime, Datelike, Days, Duration, NaiveDate, Timelike, Utc, Weekday};

use crate::types::MealSlot;

/// Hour of day at which Sunday voting closes
const SUNDAY_DEADLINE_HOUR: u32 = 11;

/// Nearest upcoming Sunday at 11:00:00.000, strictly after `now`.
///
/// If `now` is at or past this Sunday's 11:00 the deadline rolls to the
/// Sunday one week later, so the result is never `<= now`.
pub fn next_sunday_deadline(now: DateTime<Utc>) -> DateTime<Utc> {
    let days_ahead = (7 - now.weekday().num_days_from_sunday()) % 7;
    let candidate = (now.date_naive() + Days::new(u64::from(days_ahead)))
        .and_hms_opt(SUNDAY_DEADLINE_HOUR, 0, 0)
        .unwrap()
        .and_utc();

    if candidate <= now {
        candidate + Duration::days(7)
    } else {
        candidate
    }
}

/// Stable key partitioning Sunday items into weekly cohorts: epoch
/// millis of the Monday 00:00 opening the week whose Sunday deadline
/// `next_sunday_deadline(now)` falls in.
///
/// Always exactly 6 days 11 hours before the Sunday deadline, so every
/// item sharing a deadline shares a week id.
pub fn current_week_id(now: DateTime<Utc>) -> i64 {
    let today = now.date_naive();
    let monday = match now.weekday() {
        Weekday::Sun => {
            let todays_deadline = today
                .and_hms_opt(SUNDAY_DEADLINE_HOUR, 0, 0)
                .unwrap()
                .and_utc();
            if now < todays_deadline {
                // Still inside this week's round; its Monday is behind us.
                today - Days::new(6)
            } else {
                today + Days::new(1)
            }
        }
        weekday => today - Days::new(u64::from(weekday.num_days_from_monday())),
    };

    monday.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp_millis()
}

/// Deadline for a flexible item: `base` at the slot's closing hour.
///
/// Deliberately never rolls forward; choosing a past date (or a slot
/// whose hour has already passed today) yields an already-closed
/// deadline, which downstream filtering handles.
pub fn meal_deadline(slot: MealSlot, base: NaiveDate) -> DateTime<Utc> {
    base.and_hms_opt(slot.deadline_hour(), 0, 0).unwrap().and_utc()
}

/// True when both instants fall in the same calendar minute
pub fn same_instant_to_minute(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.date_naive() == b.date_naive() && a.hour() == b.hour() && a.minute() == b.minute()
}

/// True when the instant falls on the given calendar day
pub fn same_calendar_day(instant: DateTime<Utc>, day: NaiveDate) -> bool {
    instant.date_naive() == day
}
