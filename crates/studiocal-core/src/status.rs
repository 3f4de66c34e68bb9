//! Canonical occupancy statuses and the backend status vocabulary.
//!
//! The backend speaks a closed set of Japanese status tokens; the UI speaks
//! exactly four canonical states. [`normalize_status`] is the single total
//! mapping between the two. Unknown tokens never fail — they resolve to a
//! caller-chosen [`StatusFallback`], because consumers legitimately disagree on
//! the safe side: a display layer prefers to show an unknown cell as free,
//! while the booking store prefers to treat it as booked.

use serde::Serialize;

/// Backend token for an unoccupied cell.
pub const STATUS_EMPTY: &str = "空";
/// Backend token for a tentative reservation.
pub const STATUS_RESERVED: &str = "予約済み";
/// Backend token for a confirmed reservation.
pub const STATUS_CONFIRMED: &str = "予約確定";
/// Backend token for a studio currently in use.
pub const STATUS_IN_USE: &str = "使用中";
/// Backend token for a canceled reservation.
pub const STATUS_CANCELED: &str = "予約キャンセル";

/// UI-facing occupancy state. Exactly four values; both reservation tokens
/// (tentative and confirmed) collapse into [`CanonicalStatus::Booked`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalStatus {
    Free,
    Booked,
    InUse,
    Canceled,
}

impl std::fmt::Display for CanonicalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CanonicalStatus::Free => write!(f, "free"),
            CanonicalStatus::Booked => write!(f, "booked"),
            CanonicalStatus::InUse => write!(f, "in_use"),
            CanonicalStatus::Canceled => write!(f, "canceled"),
        }
    }
}

/// Policy for status tokens outside the known vocabulary.
///
/// Chosen explicitly per call site rather than baked into the mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFallback {
    /// Unknown tokens count as unoccupied.
    Free,
    /// Unknown tokens count as occupied (the safe side for booking flows).
    Booked,
}

impl StatusFallback {
    fn status(self) -> CanonicalStatus {
        match self {
            StatusFallback::Free => CanonicalStatus::Free,
            StatusFallback::Booked => CanonicalStatus::Booked,
        }
    }
}

/// Maps a raw backend status token to its canonical UI status.
///
/// Pure and total: tokens outside the known vocabulary resolve to `fallback`.
#[must_use]
pub fn normalize_status(raw: &str, fallback: StatusFallback) -> CanonicalStatus {
    match raw {
        STATUS_EMPTY => CanonicalStatus::Free,
        STATUS_RESERVED | STATUS_CONFIRMED => CanonicalStatus::Booked,
        STATUS_IN_USE => CanonicalStatus::InUse,
        STATUS_CANCELED => CanonicalStatus::Canceled,
        _ => fallback.status(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tokens_map_to_canonical_statuses() {
        assert_eq!(
            normalize_status(STATUS_EMPTY, StatusFallback::Booked),
            CanonicalStatus::Free
        );
        assert_eq!(
            normalize_status(STATUS_IN_USE, StatusFallback::Free),
            CanonicalStatus::InUse
        );
        assert_eq!(
            normalize_status(STATUS_CANCELED, StatusFallback::Free),
            CanonicalStatus::Canceled
        );
    }

    #[test]
    fn tentative_and_confirmed_both_map_to_booked() {
        assert_eq!(
            normalize_status(STATUS_RESERVED, StatusFallback::Free),
            CanonicalStatus::Booked
        );
        assert_eq!(
            normalize_status(STATUS_CONFIRMED, StatusFallback::Free),
            CanonicalStatus::Booked
        );
    }

    #[test]
    fn unknown_token_resolves_to_free_fallback() {
        assert_eq!(
            normalize_status("メンテナンス中", StatusFallback::Free),
            CanonicalStatus::Free
        );
    }

    #[test]
    fn unknown_token_resolves_to_booked_fallback() {
        assert_eq!(
            normalize_status("メンテナンス中", StatusFallback::Booked),
            CanonicalStatus::Booked
        );
        assert_eq!(
            normalize_status("", StatusFallback::Booked),
            CanonicalStatus::Booked
        );
    }

    #[test]
    fn canonical_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&CanonicalStatus::InUse).unwrap(),
            "\"in_use\""
        );
        assert_eq!(
            serde_json::to_string(&CanonicalStatus::Free).unwrap(),
            "\"free\""
        );
    }
}
