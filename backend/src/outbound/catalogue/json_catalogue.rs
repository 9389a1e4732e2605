//! JSON-file-backed content catalogue.
//!
//! The catalogue file is a JSON array of `{ "day": n, "questions": [...] }`
//! records. It is read exactly once, at startup, into an owned
//! [`JsonContentCatalogue`] that is shared by reference for the life of the
//! process; a missing or malformed file fails the boot rather than being
//! papered over at request time.

use std::collections::HashMap;
use std::path::Path;

use crate::domain::content::{ContentDay, DayIndex};
use crate::domain::ports::ContentCatalogue;

/// Errors raised while loading the catalogue file.
#[derive(Debug, thiserror::Error)]
pub enum CatalogueLoadError {
    /// The backing file could not be read.
    #[error("failed to read content catalogue at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// The file contents are not a valid catalogue.
    #[error("failed to parse content catalogue at {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    /// The file parsed but holds no records.
    #[error("content catalogue at {path} holds no records")]
    Empty { path: String },
}

/// In-memory catalogue loaded from a JSON file.
#[derive(Debug, Clone)]
pub struct JsonContentCatalogue {
    records: Vec<ContentDay>,
    by_day: HashMap<DayIndex, usize>,
    // Fallback entry for day indexes with no record of their own.
    first: ContentDay,
}

impl JsonContentCatalogue {
    /// Load the catalogue from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogueLoadError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogueLoadError::Io {
            path: display.clone(),
            source,
        })?;
        let records: Vec<ContentDay> =
            serde_json::from_str(&raw).map_err(|source| CatalogueLoadError::Parse {
                path: display.clone(),
                source,
            })?;
        Self::from_records(records).ok_or(CatalogueLoadError::Empty { path: display })
    }

    /// Build a catalogue from already-parsed records.
    ///
    /// Returns `None` for an empty record set. When several records carry
    /// the same day index the first occurrence wins.
    pub fn from_records(records: Vec<ContentDay>) -> Option<Self> {
        let first = records.first()?.clone();
        let mut by_day = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            by_day.entry(record.day()).or_insert(position);
        }
        Some(Self {
            records,
            by_day,
            first,
        })
    }
}

impl ContentCatalogue for JsonContentCatalogue {
    fn content_for(&self, day: DayIndex) -> ContentDay {
        match self.by_day.get(&day).and_then(|i| self.records.get(*i)) {
            Some(entry) => entry.clone(),
            None => self.first.clone(),
        }
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}
