//! Driving port for the daily content catalogue.
//!
//! The catalogue is loaded once at startup into an owned object (failing the
//! boot when the backing file is missing or malformed) and is infallible
//! thereafter, so the port exposes no error path.

use crate::domain::content::{ContentDay, DayIndex};

/// Read-only access to the loaded content catalogue.
pub trait ContentCatalogue: Send + Sync {
    /// The catalogue entry for `day`.
    ///
    /// Default-selection policy: when no record carries the requested index
    /// the first record in catalogue order is returned instead. Lookup never
    /// fails after a successful load.
    fn content_for(&self, day: DayIndex) -> ContentDay;

    /// Number of records in the catalogue.
    fn len(&self) -> usize;

    /// Whether the catalogue holds no records. Always `false` for a
    /// successfully loaded catalogue.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
