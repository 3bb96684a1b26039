//! Open/closed evaluation against a weekly schedule.
//!
//! All functions take the current instant explicitly (no system clock
//! access). The instant is localized to the evaluator's reference timezone
//! through the IANA database, so daylight-saving changes move the local
//! wall clock the way customers see it.
//!
//! # Functions
//!
//! - [`AvailabilityEvaluator::is_open_now`] — Is the current local minute inside a range?
//! - [`AvailabilityEvaluator::next_opening`] — Scan up to a week ahead for the next opening
//! - [`AvailabilityEvaluator::next_opening_description`] — The same, as display text
//! - [`AvailabilityEvaluator::status`] — Both combined into an [`EvaluationResult`]

use std::fmt;

use chrono::{DateTime, Datelike, Utc, Weekday};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::clock::Clock;
use crate::error::HoursError;
use crate::schedule::{weekday_name, OpeningHours, TimeOfDay};

/// Timezone used when none is configured.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Europe::Rome;

/// Shown when no opening exists within the lookahead window.
pub const FALLBACK_DESCRIPTION: &str = "Please check opening hours";

pub const OPEN_MESSAGE: &str = "Restaurant is currently open for orders!";

/// Number of day-offsets scanned for the next opening, today included.
pub const LOOKAHEAD_DAYS: u8 = 7;

// ── Results ─────────────────────────────────────────────────────────────────

/// Outcome of [`AvailabilityEvaluator::status`], ready for a status banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub is_open: bool,
    /// Empty while open.
    pub next_opening_description: String,
    pub status_message: String,
}

impl EvaluationResult {
    fn open() -> Self {
        Self {
            is_open: true,
            next_opening_description: String::new(),
            status_message: OPEN_MESSAGE.to_string(),
        }
    }

    fn closed(next_opening_description: String) -> Self {
        let status_message =
            format!("Restaurant is currently closed. We'll be open {next_opening_description}.");
        Self {
            is_open: false,
            next_opening_description,
            status_message,
        }
    }
}

/// The next opening found by the forward scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NextOpening {
    /// Days after the current local day (0 = today).
    pub day_offset: u8,
    pub weekday: Weekday,
    pub time: TimeOfDay,
}

impl fmt::Display for NextOpening {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.day_offset {
            0 => write!(f, "Today at {}", self.time),
            1 => write!(f, "Tomorrow at {}", self.time),
            _ => write!(f, "{} at {}", weekday_name(self.weekday), self.time),
        }
    }
}

// ── AvailabilityEvaluator ───────────────────────────────────────────────────

/// Evaluates [`OpeningHours`] in a fixed reference timezone.
///
/// Holds no mutable state; share it freely across threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityEvaluator {
    timezone: Tz,
}

impl Default for AvailabilityEvaluator {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEZONE)
    }
}

impl AvailabilityEvaluator {
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }

    /// Build an evaluator from an IANA timezone name (e.g. `"Europe/Rome"`).
    ///
    /// # Errors
    ///
    /// Returns [`HoursError::InvalidTimezone`] if the name is not a valid IANA timezone.
    pub fn from_timezone_name(name: &str) -> Result<Self, HoursError> {
        parse_timezone(name).map(Self::new)
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// `now` on the reference timezone's wall clock.
    pub fn local_time(&self, now: DateTime<Utc>) -> DateTime<Tz> {
        now.with_timezone(&self.timezone)
    }

    /// Whether the current local minute falls inside one of today's ranges.
    ///
    /// Boundaries are inclusive: exactly at closing time still counts as open.
    /// A day without a schedule is closed.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use hours_engine::{AvailabilityEvaluator, OpeningHours};
    ///
    /// let hours = OpeningHours::from_json(
    ///     r#"{"saturday": {"open": "11:00", "close": "23:00"}}"#,
    /// ).unwrap();
    /// let evaluator = AvailabilityEvaluator::from_timezone_name("Europe/Rome").unwrap();
    ///
    /// // Saturday Feb 21 2026, 22:00 UTC = 23:00 in Rome (CET)
    /// let now = Utc.with_ymd_and_hms(2026, 2, 21, 22, 0, 0).unwrap();
    /// assert!(evaluator.is_open_now(&hours, now));
    /// ```
    pub fn is_open_now(&self, hours: &OpeningHours, now: DateTime<Utc>) -> bool {
        let (weekday, minute) = self.position(now);
        let open = hours
            .day(weekday)
            .is_some_and(|schedule| schedule.contains(minute));
        debug!(weekday = %weekday, minute = %minute, open, "evaluated opening hours");
        open
    }

    /// The next opening strictly after `now`, looking at most six days ahead.
    ///
    /// Today only counts openings later than the current minute (lunch
    /// before dinner on weekdays). Every later day contributes its first
    /// opening. Returns `None` when nothing is scheduled in the window.
    pub fn next_opening(&self, hours: &OpeningHours, now: DateTime<Utc>) -> Option<NextOpening> {
        let (today, current) = self.position(now);

        let mut weekday = today;
        for day_offset in 0..LOOKAHEAD_DAYS {
            if day_offset > 0 {
                weekday = weekday.succ();
            }

            let Some(schedule) = hours.day(weekday) else {
                trace!(day_offset, weekday = %weekday, "no hours scheduled");
                continue;
            };

            let candidate = if day_offset == 0 {
                schedule.opening_after(current)
            } else {
                Some(schedule.first_opening())
            };

            if let Some(time) = candidate {
                return Some(NextOpening {
                    day_offset,
                    weekday,
                    time,
                });
            }
            trace!(day_offset, weekday = %weekday, "no opening left today");
        }

        warn!(
            timezone = %self.timezone,
            "no opening found within {LOOKAHEAD_DAYS} days; check the configured schedule"
        );
        None
    }

    /// Display text for the next opening: `"Today at 18:00"`,
    /// `"Tomorrow at 12:00"`, `"Wednesday at 12:00"`, or
    /// [`FALLBACK_DESCRIPTION`].
    pub fn next_opening_description(&self, hours: &OpeningHours, now: DateTime<Utc>) -> String {
        self.next_opening(hours, now)
            .map(|next| next.to_string())
            .unwrap_or_else(|| FALLBACK_DESCRIPTION.to_string())
    }

    /// Combine open/closed with the next opening into a displayable result.
    pub fn status(&self, hours: &OpeningHours, now: DateTime<Utc>) -> EvaluationResult {
        if self.is_open_now(hours, now) {
            EvaluationResult::open()
        } else {
            EvaluationResult::closed(self.next_opening_description(hours, now))
        }
    }

    /// [`status`](Self::status) at the instant reported by `clock`.
    pub fn status_from_clock<C: Clock + ?Sized>(
        &self,
        hours: &OpeningHours,
        clock: &C,
    ) -> EvaluationResult {
        self.status(hours, clock.now())
    }

    /// Local weekday and minute-of-day of `now`.
    fn position(&self, now: DateTime<Utc>) -> (Weekday, TimeOfDay) {
        let local = self.local_time(now);
        (local.weekday(), TimeOfDay::of(&local))
    }
}

/// Parse an IANA timezone string into `Tz`.
pub fn parse_timezone(s: &str) -> Result<Tz, HoursError> {
    s.trim()
        .parse::<Tz>()
        .map_err(|_| HoursError::InvalidTimezone(format!("'{}'", s)))
}

// ── Tests ───────────────────────────────────────────────────────────────────
