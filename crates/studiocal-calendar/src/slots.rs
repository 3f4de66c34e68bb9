//! Projection of the occupancy grid into genuinely free slots.

use chrono::NaiveDate;
use studiocal_core::status::STATUS_EMPTY;

use crate::types::{CalendarGrid, SlotView};

/// A (studio, period) pair judged empty for a given date.
///
/// Ephemeral: recomputed on demand from the latest grid, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailableSlot {
    pub studio_id: String,
    pub usage_date: NaiveDate,
    pub period: String,
}

/// Derives the flattened list of available slots from a grid.
///
/// A cell counts as empty when it carries no booking identifier, or when its
/// raw status is the empty token — the status text is authoritative even if an
/// identifier is somehow present. Output follows row order then per-row slot
/// order; (studio, period) pairs are unique within a grid by construction, so
/// no deduplication is needed. A grid with zero rows yields an empty list.
#[must_use]
pub fn available_slots(grid: &CalendarGrid) -> Vec<AvailableSlot> {
    let mut slots = Vec::new();
    for row in &grid.rows {
        for slot in &row.slots {
            if is_empty_cell(slot) {
                slots.push(AvailableSlot {
                    studio_id: row.studio_id.clone(),
                    usage_date: grid.usage_date,
                    period: slot.period_id.clone(),
                });
            }
        }
    }
    slots
}

/// Emptiness predicate: booking-id absence is the primary signal, the empty
/// status token the corroborating one.
fn is_empty_cell(slot: &SlotView) -> bool {
    let has_booking = slot.booking_id.as_deref().is_some_and(|id| !id.is_empty());
    !has_booking || slot.status == STATUS_EMPTY
}

#[cfg(test)]
mod tests {
    use studiocal_core::status::{STATUS_CONFIRMED, STATUS_IN_USE, STATUS_RESERVED};

    use super::*;
    use crate::types::StudioRow;

    fn slot(period: &str, status: &str, booking_id: Option<&str>) -> SlotView {
        SlotView {
            period_id: period.to_string(),
            status: status.to_string(),
            booking_id: booking_id.map(str::to_string),
            reservation_type: None,
            event_name: None,
            grace_expired: false,
            start_time: "09:00".to_string(),
            end_time: "10:30".to_string(),
        }
    }

    fn grid(rows: Vec<StudioRow>) -> CalendarGrid {
        CalendarGrid {
            usage_date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            period_order: vec!["P1".to_string(), "P2".to_string()],
            rows,
        }
    }

    #[test]
    fn empty_grid_yields_no_slots() {
        assert!(available_slots(&grid(vec![])).is_empty());
    }

    #[test]
    fn only_unbooked_cells_are_projected() {
        let g = grid(vec![StudioRow {
            studio_id: "A".to_string(),
            studio_name: "Studio A".to_string(),
            slots: vec![
                slot("P1", STATUS_EMPTY, None),
                slot("P2", STATUS_CONFIRMED, Some("bk1")),
                slot("P3", STATUS_IN_USE, Some("bk2")),
            ],
        }]);

        let slots = available_slots(&g);
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].studio_id, "A");
        assert_eq!(slots[0].period, "P1");
        assert_eq!(slots[0].usage_date, g.usage_date);
    }

    #[test]
    fn empty_status_is_authoritative_over_stray_booking_id() {
        let g = grid(vec![StudioRow {
            studio_id: "A".to_string(),
            studio_name: "Studio A".to_string(),
            slots: vec![slot("P1", STATUS_EMPTY, Some("ghost"))],
        }]);
        assert_eq!(available_slots(&g).len(), 1);
    }

    #[test]
    fn blank_booking_id_counts_as_absent() {
        let g = grid(vec![StudioRow {
            studio_id: "A".to_string(),
            studio_name: "Studio A".to_string(),
            slots: vec![slot("P1", STATUS_RESERVED, Some(""))],
        }]);
        assert_eq!(available_slots(&g).len(), 1);
    }

    #[test]
    fn output_follows_row_then_slot_order_and_never_exceeds_cell_count() {
        let g = grid(vec![
            StudioRow {
                studio_id: "A".to_string(),
                studio_name: "Studio A".to_string(),
                slots: vec![slot("P1", STATUS_EMPTY, None), slot("P2", STATUS_EMPTY, None)],
            },
            StudioRow {
                studio_id: "B".to_string(),
                studio_name: "Studio B".to_string(),
                slots: vec![slot("P1", STATUS_EMPTY, None)],
            },
        ]);

        let slots = available_slots(&g);
        assert!(slots.len() <= 3);
        let keys: Vec<(String, String)> = slots
            .into_iter()
            .map(|s| (s.studio_id, s.period))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("A".to_string(), "P1".to_string()),
                ("A".to_string(), "P2".to_string()),
                ("B".to_string(), "P1".to_string()),
            ]
        );
    }
}
