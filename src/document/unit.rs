//! Annotation units.

use std::fmt;

use super::Span;

/// Prefix of every unit identifier.
const ID_PREFIX: &str = "stac_";

/// Width of each unit class's identifier band.
const BAND_WIDTH: u64 = 10_000_000;

/// Layer a unit belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    /// Typographic unit mirroring a turn
    Paragraph,
    Turn,
    Segment,
    Dialogue,
}

impl UnitKind {
    /// Type tag written to the annotation file.
    pub fn type_name(&self) -> &'static str {
        match self {
            UnitKind::Paragraph => "paragraph",
            UnitKind::Turn => "Turn",
            UnitKind::Segment => "Segment",
            UnitKind::Dialogue => "Dialogue",
        }
    }

    fn band(&self) -> u64 {
        match self {
            UnitKind::Paragraph => 1,
            UnitKind::Turn => 2,
            UnitKind::Segment => 3,
            UnitKind::Dialogue => 4,
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Unit identifier, unique within one document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitId(String);

impl UnitId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hands out identifiers from one counter per unit class.
///
/// Every class owns a numeric band, so identifiers never collide across
/// classes and depend only on emission order.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    paragraphs: u64,
    turns: u64,
    segments: u64,
    dialogues: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, kind: UnitKind) -> UnitId {
        let counter = match kind {
            UnitKind::Paragraph => &mut self.paragraphs,
            UnitKind::Turn => &mut self.turns,
            UnitKind::Segment => &mut self.segments,
            UnitKind::Dialogue => &mut self.dialogues,
        };
        *counter += 1;
        debug_assert!(*counter < BAND_WIDTH, "{kind} identifier band exhausted");
        UnitId(format!("{ID_PREFIX}{}", kind.band() * BAND_WIDTH + *counter))
    }
}

/// Provenance stub attached to every unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub author: String,
    /// Seconds since the epoch when the conversion ran
    pub creation_date: i64,
    pub last_modifier: String,
    pub last_modification_date: i64,
}

impl Metadata {
    pub fn new(author: impl Into<String>, creation_date: i64) -> Self {
        Self {
            author: author.into(),
            creation_date,
            last_modifier: "n/a".to_string(),
            last_modification_date: 0,
        }
    }
}

/// One named feature of a unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    pub name: &'static str,
    pub value: String,
}

/// A typed, positioned annotation over the text buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationUnit {
    pub id: UnitId,
    pub kind: UnitKind,
    pub metadata: Metadata,
    pub features: Vec<Feature>,
    pub span: Span,
}

impl AnnotationUnit {
    /// Value of the named feature, if present.
    pub fn feature(&self, name: &str) -> Option<&str> {
        self.features
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }
}
