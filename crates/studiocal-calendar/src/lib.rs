//! Booking-calendar client and derivation engine.
//!
//! Fetches the per-date studio × period occupancy grid from the booking
//! backend, normalizes the backend's status vocabulary into canonical UI
//! states, and derives secondary views from the immutable grid snapshot:
//! available slots ([`slots`]), display-ready studio rows ([`display`]), and a
//! point-queryable lookup table ([`store`]).

pub mod client;
pub mod display;
pub mod error;
pub mod slots;
pub mod store;
pub mod types;

pub use client::CalendarClient;
pub use display::{to_display_studios, DisplayPeriod, DisplayStudio};
pub use error::CalendarError;
pub use slots::{available_slots, AvailableSlot};
pub use store::{CalendarStore, CellState};
pub use types::{
    CalendarGrid, CreateBookingRequest, CreateBookingResponse, EquipmentItem, SlotView, StudioRow,
};
