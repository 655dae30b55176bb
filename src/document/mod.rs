//! Annotated dialogue documents.
//!
//! A document is a flat text buffer plus a list of annotation units that
//! address it by character offsets. Units come in nested layers:
//!
//! - [`UnitKind::Dialogue`] - turns between two dice rolls
//! - [`UnitKind::Turn`] (and its typographic twin [`UnitKind::Paragraph`])
//! - [`UnitKind::Segment`] - parts of a turn split by segment markers
//!
//! # Module Structure
//!
//! - [`buffer`] - text buffer and per-turn layout
//! - [`dialogue`] - dialogue boundary detection
//! - [`unit`] - annotation units and identifiers
//! - [`builder`] - pipeline orchestration

pub mod buffer;
pub mod builder;
pub mod dialogue;
mod span;
pub mod unit;

pub use buffer::{SegmentBorders, TextBuffer, TurnLayout, UnbalancedSegments};
pub use builder::{convert, ConversionStats, Document, DocumentBuilder};
pub use dialogue::{ClosedDialogue, DialogueEvents, DialogueTracker};
pub use span::Span;
pub use unit::{AnnotationUnit, Feature, IdAllocator, Metadata, UnitId, UnitKind};
