//! Trine Core - Three-pane diff alignment engine
//!
//! This library turns character-level edit scripts between a `left`, a
//! `common` and a `right` text into line-range regions that a viewer can
//! highlight, connect and copy between.

pub mod buffer;
pub mod classify;
pub mod edit;
pub mod engine;
pub mod error;
pub mod line_index;
pub mod merge;
pub mod region;
pub mod simplify;
pub mod translate;

pub use buffer::{normalize_content, BufferRole, Buffers, EditableBuffer, StringBuffer, TextBuffer};
pub use classify::{classify, ChangeKind};
pub use edit::{normalize_newline_splits, CharDiff, EditOp, SemanticCharDiff};
pub use engine::{
    DiffEngine, DiffOptions, PaneOptions, PaneOverrides, PassOutcome, ThreeWayDiff,
    DEFAULT_MAX_DIFFS,
};
pub use error::MergeError;
pub use line_index::{LineIndex, Span};
pub use merge::{CopyDirection, CopyLinks, MergeSession, Refresh};
pub use region::DiffRegion;
pub use simplify::{simplify, Granularity};
pub use translate::{translate, BufferPair};
