//! Error type for table construction and resizing.

use thiserror::Error;

/// Failures a table operation can report. Lookups never fail; a missing
/// key is an ordinary `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// The slot array could not be allocated. The table that issued the
    /// request keeps its previous storage.
    #[error("allocation failed for a slot array of {slots} slots")]
    AllocFailed { slots: usize },

    /// No prime capacity `>= requested` fits in `usize`.
    #[error("capacity overflow: no prime table size >= {requested}")]
    CapacityOverflow { requested: usize },
}

pub type Result<T> = std::result::Result<T, TableError>;
