//! Wire types for the booking backend's JSON contracts.
//!
//! One canonical schema for the calendar grid. Period identifiers are plain
//! strings ordered by the server-supplied `periodOrder` sequence — the valid
//! set has varied across backend versions (five vs six periods), so the count
//! is never hardcoded and ordering is never inferred from a lexical sort.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One studio × period cell as received from the backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotView {
    pub period_id: String,
    /// Raw backend status token; see `studiocal_core::status` for the vocabulary.
    pub status: String,
    #[serde(default)]
    pub booking_id: Option<String>,
    #[serde(default)]
    pub reservation_type: Option<String>,
    /// Present only for event-type reservations.
    #[serde(default)]
    pub event_name: Option<String>,
    #[serde(default)]
    pub grace_expired: bool,
    /// Either bare `"HH:mm"` or a full timestamp like `"2024-04-01T09:00:00"`.
    pub start_time: String,
    pub end_time: String,
}

/// One studio's ordered slots for the requested date.
///
/// The server returns exactly one row per studio; studios absent from the
/// response have no slots that day.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudioRow {
    pub studio_id: String,
    pub studio_name: String,
    pub slots: Vec<SlotView>,
}

/// The full occupancy snapshot for one date.
///
/// Constructed fresh on every fetch and never mutated in place; each reload
/// fully replaces any state derived from the previous grid.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarGrid {
    pub usage_date: NaiveDate,
    /// Authoritative period sequence for this grid.
    pub period_order: Vec<String>,
    pub rows: Vec<StudioRow>,
}

/// One equipment line item on a booking request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentItem {
    pub equipment_id: String,
    pub quantity: u32,
}

/// Booking-creation payload; a straight pass-through with no derivation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub studio_id: String,
    pub period: String,
    pub usage_date: NaiveDate,
    pub reservation_type: String,
    pub members: Vec<String>,
    pub equipment_items: Vec<EquipmentItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
}

/// Acknowledgment returned by the booking-creation endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingResponse {
    pub booking_id: String,
    pub studio_id: String,
    pub period: String,
    pub usage_date: NaiveDate,
    pub reservation_type: String,
    pub status: String,
    pub message: String,
}

/// Error payload shape used by the backend on rejected requests.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}
