//! Weekly opening-hours model.
//!
//! An [`OpeningHours`] value maps each weekday to an optional [`DaySchedule`].
//! Monday–Friday carry a lunch and a dinner range; Saturday and Sunday carry a
//! single range. A missing day is closed all day.
//!
//! All time validation happens here, when a schedule is built or
//! deserialized. Once constructed, a schedule can be evaluated without any
//! failure path.
//!
//! # Wire format
//!
//! ```json
//! {
//!   "monday": {
//!     "lunch":  { "open": "12:00", "close": "14:30" },
//!     "dinner": { "open": "18:00", "close": "22:00" }
//!   },
//!   "saturday": { "open": "11:00", "close": "23:00" }
//! }
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::HoursError;

/// Days in schedule order (Monday first), used for iteration and diagnostics.
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

// ── TimeOfDay ───────────────────────────────────────────────────────────────

/// A wall-clock time with minute precision, stored as minutes after midnight.
///
/// Parsed from and rendered as 24-hour `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);
    pub const LAST_MINUTE: TimeOfDay = TimeOfDay(23 * 60 + 59);

    /// Build a time from hour (0-23) and minute (0-59).
    ///
    /// # Errors
    ///
    /// Returns [`HoursError::InvalidScheduleFormat`] if either component is out of range.
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self, HoursError> {
        if hour > 23 || minute > 59 {
            return Err(HoursError::InvalidScheduleFormat(format!(
                "{hour:02}:{minute:02} is outside 00:00-23:59"
            )));
        }
        Ok(Self((hour * 60 + minute) as u16))
    }

    /// Build a time from minutes after midnight, `None` past 23:59.
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes <= Self::LAST_MINUTE.0).then_some(Self(minutes))
    }

    /// The minute-of-day of any clock reading, seconds truncated.
    pub fn of<T: Timelike>(t: &T) -> Self {
        Self((t.hour() * 60 + t.minute()) as u16)
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u32 {
        u32::from(self.0 / 60)
    }

    pub fn minute(self) -> u32 {
        u32::from(self.0 % 60)
    }
}

impl FromStr for TimeOfDay {
    type Err = HoursError;

    /// Parse `HH:MM` (24-hour). A single-digit hour is accepted; minutes must be two digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || HoursError::InvalidScheduleFormat(format!("'{s}' is not a valid HH:MM time"));

        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
        let all_digits = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(hour) || hour.len() > 2 || !all_digits(minute) || minute.len() != 2 {
            return Err(invalid());
        }

        let hour: u32 = hour.parse().map_err(|_| invalid())?;
        let minute: u32 = minute.parse().map_err(|_| invalid())?;
        Self::from_hm(hour, minute).map_err(|_| invalid())
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = HoursError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(t: TimeOfDay) -> Self {
        t.to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

// ── TimeRange ───────────────────────────────────────────────────────────────

/// A contiguous open/close interval within one day. Both ends are inclusive.
///
/// Overnight ranges are not supported: a range whose `close` is before its
/// `open` contains no minute at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeRange {
    pub open: TimeOfDay,
    pub close: TimeOfDay,
}

impl TimeRange {
    pub fn new(open: TimeOfDay, close: TimeOfDay) -> Self {
        Self { open, close }
    }

    /// Parse a range from two `HH:MM` strings.
    pub fn parse(open: &str, close: &str) -> Result<Self, HoursError> {
        Ok(Self::new(open.parse()?, close.parse()?))
    }

    pub fn contains(&self, t: TimeOfDay) -> bool {
        self.open <= t && t <= self.close
    }

    pub fn is_inverted(&self) -> bool {
        self.close < self.open
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.open, self.close)
    }
}

// ── DaySchedule ─────────────────────────────────────────────────────────────

/// Opening hours for a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DaySchedule {
    /// Monday–Friday: separate lunch and dinner service.
    Weekday { lunch: TimeRange, dinner: TimeRange },
    /// Saturday and Sunday: one continuous range.
    Weekend(TimeRange),
}

impl DaySchedule {
    /// Whether `t` falls inside any sub-range. Lunch and dinner are checked independently.
    pub fn contains(&self, t: TimeOfDay) -> bool {
        match self {
            DaySchedule::Weekday { lunch, dinner } => lunch.contains(t) || dinner.contains(t),
            DaySchedule::Weekend(range) => range.contains(t),
        }
    }

    /// Opening time of the first sub-range (lunch on weekdays).
    pub fn first_opening(&self) -> TimeOfDay {
        match self {
            DaySchedule::Weekday { lunch, .. } => lunch.open,
            DaySchedule::Weekend(range) => range.open,
        }
    }

    /// The next opening strictly after `t` on the same day.
    ///
    /// On weekdays lunch is tried before dinner; once `t` has reached the
    /// lunch opening only dinner remains a candidate.
    pub fn opening_after(&self, t: TimeOfDay) -> Option<TimeOfDay> {
        match self {
            DaySchedule::Weekday { lunch, dinner } => {
                if t < lunch.open {
                    Some(lunch.open)
                } else if t < dinner.open {
                    Some(dinner.open)
                } else {
                    None
                }
            }
            DaySchedule::Weekend(range) => (t < range.open).then_some(range.open),
        }
    }

    /// Whether this variant is the right shape for `day`.
    pub fn fits(&self, day: Weekday) -> bool {
        matches!(
            (self, is_weekend(day)),
            (DaySchedule::Weekday { .. }, false) | (DaySchedule::Weekend(_), true)
        )
    }

    fn periods(&self) -> Vec<(Period, TimeRange)> {
        match *self {
            DaySchedule::Weekday { lunch, dinner } => {
                vec![(Period::Lunch, lunch), (Period::Dinner, dinner)]
            }
            DaySchedule::Weekend(range) => vec![(Period::AllDay, range)],
        }
    }
}

impl fmt::Display for DaySchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DaySchedule::Weekday { lunch, dinner } => write!(f, "lunch {lunch}, dinner {dinner}"),
            DaySchedule::Weekend(range) => write!(f, "{range}"),
        }
    }
}

/// Which sub-range of a day a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    Lunch,
    Dinner,
    AllDay,
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Period::Lunch => "lunch",
            Period::Dinner => "dinner",
            Period::AllDay => "hours",
        })
    }
}

// ── OpeningHours ────────────────────────────────────────────────────────────

/// The weekly schedule: one optional [`DaySchedule`] per weekday.
///
/// Immutable once built; evaluation never mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawOpeningHours", into = "RawOpeningHours")]
pub struct OpeningHours {
    /// Indexed by `Weekday::num_days_from_sunday`.
    days: [Option<DaySchedule>; 7],
}

impl OpeningHours {
    /// A schedule with every day closed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the schedule for `day`.
    ///
    /// # Errors
    ///
    /// Returns [`HoursError::InvalidScheduleFormat`] if a weekend shape is
    /// given for Monday–Friday or a weekday shape for Saturday/Sunday.
    pub fn with_day(mut self, day: Weekday, schedule: DaySchedule) -> Result<Self, HoursError> {
        if !schedule.fits(day) {
            return Err(shape_mismatch(day));
        }
        self.days[slot(day)] = Some(schedule);
        Ok(self)
    }

    /// Close `day` entirely.
    pub fn without_day(mut self, day: Weekday) -> Self {
        self.days[slot(day)] = None;
        self
    }

    pub fn day(&self, day: Weekday) -> Option<&DaySchedule> {
        self.days[slot(day)].as_ref()
    }

    /// True when no day has any hours.
    pub fn is_unscheduled(&self) -> bool {
        self.days.iter().all(Option::is_none)
    }

    /// Parse a schedule from its JSON wire format.
    ///
    /// # Errors
    ///
    /// Returns [`HoursError::InvalidScheduleFormat`] for malformed JSON,
    /// unknown day keys, bad `HH:MM` strings, or a day entry of the wrong shape.
    pub fn from_json(json: &str) -> Result<Self, HoursError> {
        let raw: RawOpeningHours = serde_json::from_str(json)
            .map_err(|e| HoursError::InvalidScheduleFormat(e.to_string()))?;
        raw.try_into()
    }

    /// Render the schedule in its JSON wire format.
    pub fn to_json_pretty(&self) -> String {
        let raw = RawOpeningHours::from(self.clone());
        // Every field is a string or an object of strings.
        serde_json::to_string_pretty(&raw).unwrap_or_default()
    }

    /// Report non-fatal problems an administrator should know about.
    ///
    /// None of these stop evaluation: an inverted range never matches and a
    /// missing day is closed.
    pub fn lint(&self) -> Vec<ScheduleWarning> {
        if self.is_unscheduled() {
            return vec![ScheduleWarning::NoOpenings];
        }

        let mut warnings = Vec::new();
        for day in WEEK {
            let Some(schedule) = self.day(day) else {
                warnings.push(ScheduleWarning::UnscheduledDay(day));
                continue;
            };
            for (period, range) in schedule.periods() {
                if range.is_inverted() {
                    warnings.push(ScheduleWarning::InvertedRange { day, period, range });
                }
            }
        }
        warnings
    }
}

/// A non-fatal schedule problem found by [`OpeningHours::lint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleWarning {
    /// `close` is before `open`, so the range never matches.
    InvertedRange {
        day: Weekday,
        period: Period,
        range: TimeRange,
    },
    /// The day has no entry and is closed all day.
    UnscheduledDay(Weekday),
    /// No day has an entry; the business will always read as closed.
    NoOpenings,
}

impl fmt::Display for ScheduleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleWarning::InvertedRange { day, period, range } => write!(
                f,
                "{} {period} closes ({}) before it opens ({}) and will never match",
                day_key(*day),
                range.close,
                range.open
            ),
            ScheduleWarning::UnscheduledDay(day) => {
                write!(f, "{} has no opening hours and is closed all day", day_key(*day))
            }
            ScheduleWarning::NoOpenings => {
                f.write_str("no day has opening hours; status will always read closed")
            }
        }
    }
}

// ── Weekday helpers ─────────────────────────────────────────────────────────

pub fn is_weekend(day: Weekday) -> bool {
    matches!(day, Weekday::Sat | Weekday::Sun)
}

/// Full English day name, as shown to customers ("Wednesday").
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Lowercase key used in the wire format ("wednesday").
pub fn day_key(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

fn slot(day: Weekday) -> usize {
    day.num_days_from_sunday() as usize
}

fn shape_mismatch(day: Weekday) -> HoursError {
    let expected = if is_weekend(day) {
        "a single open/close range"
    } else {
        "lunch and dinner ranges"
    };
    HoursError::InvalidScheduleFormat(format!("{} expects {expected}", day_key(day)))
}

// ── Wire format ─────────────────────────────────────────────────────────────

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawOpeningHours {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    monday: Option<RawDay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tuesday: Option<RawDay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    wednesday: Option<RawDay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    thursday: Option<RawDay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    friday: Option<RawDay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    saturday: Option<RawDay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sunday: Option<RawDay>,
}

impl RawOpeningHours {
    fn entry_mut(&mut self, day: Weekday) -> &mut Option<RawDay> {
        match day {
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
            Weekday::Sun => &mut self.sunday,
        }
    }
}

/// One day as written: either `lunch` + `dinner` or `open` + `close`.
/// Times stay as strings so errors can name the offending field.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDay {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lunch: Option<RawRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dinner: Option<RawRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    open: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    close: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRange {
    open: String,
    close: String,
}

impl RawRange {
    fn parse(&self, field: &str) -> Result<TimeRange, HoursError> {
        Ok(TimeRange::new(
            parse_field(&self.open, &format!("{field}.open"))?,
            parse_field(&self.close, &format!("{field}.close"))?,
        ))
    }
}

impl From<TimeRange> for RawRange {
    fn from(range: TimeRange) -> Self {
        Self {
            open: range.open.to_string(),
            close: range.close.to_string(),
        }
    }
}

fn parse_field(value: &str, field: &str) -> Result<TimeOfDay, HoursError> {
    value.parse().map_err(|e: HoursError| match e {
        HoursError::InvalidScheduleFormat(msg) => {
            HoursError::InvalidScheduleFormat(format!("{field}: {msg}"))
        }
        other => other,
    })
}

impl RawDay {
    fn into_schedule(self, day: Weekday) -> Result<DaySchedule, HoursError> {
        let key = day_key(day);
        let schedule = match self {
            RawDay {
                lunch: Some(lunch),
                dinner: Some(dinner),
                open: None,
                close: None,
            } => DaySchedule::Weekday {
                lunch: lunch.parse(&format!("{key}.lunch"))?,
                dinner: dinner.parse(&format!("{key}.dinner"))?,
            },
            RawDay {
                lunch: None,
                dinner: None,
                open: Some(open),
                close: Some(close),
            } => DaySchedule::Weekend(TimeRange::new(
                parse_field(&open, &format!("{key}.open"))?,
                parse_field(&close, &format!("{key}.close"))?,
            )),
            _ => return Err(shape_mismatch(day)),
        };

        if !schedule.fits(day) {
            return Err(shape_mismatch(day));
        }
        Ok(schedule)
    }
}

impl From<DaySchedule> for RawDay {
    fn from(schedule: DaySchedule) -> Self {
        match schedule {
            DaySchedule::Weekday { lunch, dinner } => RawDay {
                lunch: Some(lunch.into()),
                dinner: Some(dinner.into()),
                ..RawDay::default()
            },
            DaySchedule::Weekend(range) => RawDay {
                open: Some(range.open.to_string()),
                close: Some(range.close.to_string()),
                ..RawDay::default()
            },
        }
    }
}

impl TryFrom<RawOpeningHours> for OpeningHours {
    type Error = HoursError;

    fn try_from(mut raw: RawOpeningHours) -> Result<Self, Self::Error> {
        let mut hours = OpeningHours::new();
        for day in WEEK {
            if let Some(entry) = raw.entry_mut(day).take() {
                hours.days[slot(day)] = Some(entry.into_schedule(day)?);
            }
        }
        Ok(hours)
    }
}

impl From<OpeningHours> for RawOpeningHours {
    fn from(hours: OpeningHours) -> Self {
        let mut raw = RawOpeningHours::default();
        for day in WEEK {
            *raw.entry_mut(day) = hours.day(day).copied().map(RawDay::from);
        }
        raw
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
