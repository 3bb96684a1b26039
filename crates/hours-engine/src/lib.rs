//! # hours-engine
//!
//! Deterministic opening-hours evaluation for a restaurant storefront.
//!
//! Given a weekly schedule and the current instant, the engine decides
//! whether the restaurant is open, finds the next opening within a week, and
//! renders the status line shown to customers. Schedule times are read in
//! one reference timezone, DST included.
//!
//! ## Modules
//!
//! - [`schedule`] — Weekly schedule model, `HH:MM` parsing, wire format, admin lint
//! - [`availability`] — Open/closed check, next-opening scan, status messages
//! - [`clock`] — Injectable time sources
//! - [`error`] — Error types

pub mod availability;
pub mod clock;
pub mod error;
pub mod schedule;

pub use availability::{
    parse_timezone, AvailabilityEvaluator, EvaluationResult, NextOpening, DEFAULT_TIMEZONE,
    FALLBACK_DESCRIPTION, OPEN_MESSAGE,
};
pub use clock::{parse_instant, Clock, FixedClock, SystemClock};
pub use error::HoursError;
pub use schedule::{DaySchedule, OpeningHours, ScheduleWarning, TimeOfDay, TimeRange};
