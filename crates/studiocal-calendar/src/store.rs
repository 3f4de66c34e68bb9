//! Stateful orchestrator over the fetched calendar grid.
//!
//! [`CalendarStore`] owns the current date, the authoritative studio and
//! period sequences, and a flat lookup table rebuilt from scratch on every
//! load. Readers get point lookups and on-demand derived views over the
//! retained immutable grid snapshot; all mutation flows through the store's
//! own operations.

use std::collections::HashMap;

use chrono::{Local, NaiveDate};
use studiocal_core::{normalize_status, CanonicalStatus, StatusFallback};

use crate::client::CalendarClient;
use crate::display::{to_display_studios, DisplayStudio};
use crate::error::CalendarError;
use crate::slots::{available_slots, AvailableSlot};
use crate::types::CalendarGrid;

/// Canonical per-cell record used for point queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellState {
    pub status: CanonicalStatus,
    pub booking_id: Option<String>,
    pub reservation_type: Option<String>,
    pub event_name: Option<String>,
    pub grace_expired: bool,
}

/// Lookup store for one date's occupancy, keyed by (studio, period).
pub struct CalendarStore {
    usage_date: NaiveDate,
    studio_filter: Option<String>,
    studios: Vec<String>,
    periods: Vec<String>,
    cells: HashMap<String, CellState>,
    grid: Option<CalendarGrid>,
    loading: bool,
    error: Option<String>,
    /// Monotonically increasing request generation; responses from superseded
    /// requests are discarded instead of racing last-write-wins.
    generation: u64,
    fallback: StatusFallback,
}

impl CalendarStore {
    /// Creates a store for today's date.
    ///
    /// `fallback` applies to unrecognized status tokens when building the
    /// lookup table; booking flows lean [`StatusFallback::Booked`].
    #[must_use]
    pub fn new(fallback: StatusFallback) -> Self {
        Self::with_date(Local::now().date_naive(), fallback)
    }

    /// Creates a store for a specific date.
    #[must_use]
    pub fn with_date(usage_date: NaiveDate, fallback: StatusFallback) -> Self {
        Self {
            usage_date,
            studio_filter: None,
            studios: Vec::new(),
            periods: Vec::new(),
            cells: HashMap::new(),
            grid: None,
            loading: false,
            error: None,
            generation: 0,
            fallback,
        }
    }

    /// Sets the displayed date. Does not fetch; the caller decides when to
    /// reload, so repeated date-picker edits don't issue a request each.
    pub fn set_date(&mut self, date: NaiveDate) {
        self.usage_date = date;
    }

    /// Restricts subsequent loads to one studio; `None` clears the filter.
    pub fn set_studio_filter(&mut self, studio_id: Option<String>) {
        self.studio_filter = studio_id.filter(|id| !id.is_empty());
    }

    #[must_use]
    pub fn usage_date(&self) -> NaiveDate {
        self.usage_date
    }

    /// Studio identifiers from the latest grid, in server row order.
    #[must_use]
    pub fn studios(&self) -> &[String] {
        &self.studios
    }

    /// Authoritative period sequence from the latest grid.
    #[must_use]
    pub fn periods(&self) -> &[String] {
        &self.periods
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Last transport error message, cleared on the next load attempt.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The latest successfully fetched grid snapshot.
    #[must_use]
    pub fn grid(&self) -> Option<&CalendarGrid> {
        self.grid.as_ref()
    }

    /// O(1) point lookup; `None` when the (studio, period) pair is absent for
    /// the loaded date, which is an expected case rather than an error.
    #[must_use]
    pub fn get_cell(&self, studio_id: &str, period: &str) -> Option<&CellState> {
        self.cells.get(&cell_key(studio_id, period))
    }

    /// Available slots derived on demand from the retained grid snapshot.
    #[must_use]
    pub fn available_slots(&self) -> Vec<AvailableSlot> {
        self.grid.as_ref().map(available_slots).unwrap_or_default()
    }

    /// Display view derived on demand from the retained grid snapshot.
    #[must_use]
    pub fn display_studios(&self, fallback: StatusFallback) -> Vec<DisplayStudio> {
        self.grid
            .as_ref()
            .map(|grid| to_display_studios(grid, fallback))
            .unwrap_or_default()
    }

    /// Fetches the grid for the current date and filter, then atomically
    /// replaces the studio list, period sequence, and lookup table.
    ///
    /// On failure the previous table is left untouched and the error message
    /// recorded. The loading flag ends false on both outcomes. Composes
    /// [`CalendarStore::begin_load`] and [`CalendarStore::apply_result`];
    /// callers driving the fetch themselves (to overlap requests) use those
    /// two directly.
    pub async fn load(&mut self, client: &CalendarClient) {
        let generation = self.begin_load();
        let result = client
            .fetch_calendar(self.usage_date, self.studio_filter.as_deref())
            .await;
        self.apply_result(generation, result);
    }

    /// Starts a load attempt: bumps the request generation, sets the loading
    /// flag, and clears the last error. Returns the generation token to hand
    /// back to [`CalendarStore::apply_result`] once the fetch resolves.
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        self.generation
    }

    /// Applies a fetch outcome for the given generation token.
    ///
    /// A result from a superseded request — one whose token is no longer the
    /// newest — is discarded without touching any state, including the loading
    /// flag the newer request now owns. The newest result clears the flag and
    /// either replaces all derived state or records the error message leaving
    /// the previous table untouched.
    pub fn apply_result(&mut self, generation: u64, result: Result<CalendarGrid, CalendarError>) {
        if generation != self.generation {
            tracing::debug!(
                generation,
                newest = self.generation,
                "discarding stale calendar response"
            );
            return;
        }
        self.loading = false;

        match result {
            Ok(grid) => {
                tracing::debug!(
                    date = %grid.usage_date,
                    rows = grid.rows.len(),
                    periods = grid.period_order.len(),
                    "applying calendar grid"
                );
                self.apply_grid(grid);
            }
            Err(e) => {
                tracing::warn!(date = %self.usage_date, error = %e, "calendar load failed");
                self.error = Some(e.to_string());
            }
        }
    }

    /// Rebuilds all derived state from a fresh grid. Wholesale replacement:
    /// studios that vanished from the response leave no ghost entries.
    fn apply_grid(&mut self, grid: CalendarGrid) {
        let cell_count = grid.rows.iter().map(|r| r.slots.len()).sum();
        let mut cells = HashMap::with_capacity(cell_count);
        for row in &grid.rows {
            for slot in &row.slots {
                cells.insert(
                    cell_key(&row.studio_id, &slot.period_id),
                    CellState {
                        status: normalize_status(&slot.status, self.fallback),
                        booking_id: slot.booking_id.clone(),
                        reservation_type: slot.reservation_type.clone(),
                        event_name: slot.event_name.clone(),
                        grace_expired: slot.grace_expired,
                    },
                );
            }
        }

        self.studios = grid.rows.iter().map(|r| r.studio_id.clone()).collect();
        self.periods = grid.period_order.clone();
        self.cells = cells;
        self.grid = Some(grid);
    }
}

fn cell_key(studio_id: &str, period: &str) -> String {
    format!("{studio_id}:{period}")
}
