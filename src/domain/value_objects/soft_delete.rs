//! Soft-delete marker shared by games and cards
//!
//! Rows are never physically removed. Storage keeps a `deleted_on` unix
//! timestamp (0 while live) next to an `is_del` flag; this type holds only
//! the timestamp so the flag can always be derived from it.

use chrono::{DateTime, TimeZone, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SoftDelete {
    deleted_on: Option<DateTime<Utc>>,
}

impl SoftDelete {
    pub fn live() -> Self {
        Self { deleted_on: None }
    }

    pub fn deleted_at(at: DateTime<Utc>) -> Self {
        Self {
            deleted_on: Some(at),
        }
    }

    /// Rebuild the marker from its stored column pair.
    ///
    /// Returns `None` when the pair is inconsistent (flag set without a
    /// timestamp or the other way round).
    pub fn from_columns(deleted_on: i64, is_del: i64) -> Option<Self> {
        match (deleted_on, is_del) {
            (0, 0) => Some(Self::live()),
            (secs, 1) if secs > 0 => Utc.timestamp_opt(secs, 0).single().map(Self::deleted_at),
            _ => None,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_on.is_some()
    }

    /// `(deleted_on, is_del)` as stored
    pub fn to_columns(&self) -> (i64, i64) {
        match self.deleted_on {
            Some(at) => (at.timestamp(), 1),
            None => (0, 0),
        }
    }
}
