//! Presentation-oriented view of the occupancy grid.
//!
//! Purely a reshaping of the literal backend data: row count, per-row slot
//! count, and ordering are preserved, and no availability judgment is made —
//! that belongs to [`crate::slots`].

use studiocal_core::{normalize_status, CanonicalStatus, StatusFallback};

use crate::types::{CalendarGrid, SlotView, StudioRow};

/// A studio row ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayStudio {
    pub id: String,
    pub name: String,
    pub periods: Vec<DisplayPeriod>,
}

/// One period cell ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayPeriod {
    pub id: String,
    /// The period identifier doubles as its own label.
    pub label: String,
    /// `"HH:mm–HH:mm"`.
    pub time_range: String,
    pub status: CanonicalStatus,
    pub reservation_type: Option<String>,
    pub event_name: Option<String>,
}

/// Converts a grid into display-ready studio rows.
///
/// `fallback` decides how unrecognized status tokens render; display surfaces
/// have historically leaned [`StatusFallback::Free`].
#[must_use]
pub fn to_display_studios(grid: &CalendarGrid, fallback: StatusFallback) -> Vec<DisplayStudio> {
    grid.rows
        .iter()
        .map(|row| display_studio(row, fallback))
        .collect()
}

fn display_studio(row: &StudioRow, fallback: StatusFallback) -> DisplayStudio {
    DisplayStudio {
        id: row.studio_id.clone(),
        name: row.studio_name.clone(),
        periods: row
            .slots
            .iter()
            .map(|slot| display_period(slot, fallback))
            .collect(),
    }
}

fn display_period(slot: &SlotView, fallback: StatusFallback) -> DisplayPeriod {
    DisplayPeriod {
        id: slot.period_id.clone(),
        label: slot.period_id.clone(),
        time_range: format_time_range(&slot.start_time, &slot.end_time),
        status: normalize_status(&slot.status, fallback),
        reservation_type: slot.reservation_type.clone(),
        event_name: slot.event_name.clone(),
    }
}

/// Renders a start/end pair as `"HH:mm–HH:mm"`.
///
/// Full timestamps are reduced to their time-of-day component; bare `"HH:mm"`
/// inputs pass through unchanged.
#[must_use]
pub fn format_time_range(start: &str, end: &str) -> String {
    format!("{}–{}", clock_part(start), clock_part(end))
}

/// Extracts `HH:mm` from a timestamp: the first five characters after the
/// date-time separator, or the whole string when no separator is present.
fn clock_part(time: &str) -> &str {
    match time.split_once('T') {
        Some((_, clock)) => clock.get(..5).unwrap_or(clock),
        None => time,
    }
}
