//! Errors raised by merge operations

use crate::buffer::BufferRole;
use crate::translate::BufferPair;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    #[error("No region {index} between {pair} ({count} available)")]
    RegionOutOfRange {
        pair: BufferPair,
        index: usize,
        count: usize,
    },
    #[error("Copying from the {0} pane is disabled")]
    CopyDisabled(BufferRole),
    #[error("Region {0} has no lines to copy")]
    NothingToCopy(usize),
    #[error("The {0} pane is read-only")]
    ReadOnly(BufferRole),
}
