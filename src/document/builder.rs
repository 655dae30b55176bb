//! Turns transcript rows into a text buffer and its annotation units.

use crate::config::Config;
use crate::error::Result;
use crate::transcript::TurnRecord;

use super::buffer::{TextBuffer, TurnLayout};
use super::dialogue::{DialogueEvents, DialogueTracker};
use super::unit::{AnnotationUnit, Feature, IdAllocator, Metadata, UnitKind};
use super::Span;

/// A converted transcript: the flattened text and the units addressing it.
#[derive(Debug, Clone)]
pub struct Document {
    buffer: TextBuffer,
    units: Vec<AnnotationUnit>,
    stats: ConversionStats,
}

/// Counters describing one conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStats {
    pub rows: usize,
    pub turns: usize,
    pub segments: usize,
    pub dialogues: usize,
    /// Turns whose segments were dropped
    pub unbalanced_turns: usize,
    /// Zero-width dialogues that were not emitted
    pub suppressed_dialogues: usize,
}

impl Document {
    pub fn text(&self) -> &str {
        self.buffer.as_str()
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn units(&self) -> &[AnnotationUnit] {
        &self.units
    }

    pub fn stats(&self) -> ConversionStats {
        self.stats
    }

    /// Units of one kind, in document order.
    pub fn units_of(&self, kind: UnitKind) -> impl Iterator<Item = &AnnotationUnit> {
        self.units.iter().filter(move |unit| unit.kind == kind)
    }

    /// Text covered by a unit.
    pub fn unit_text(&self, unit: &AnnotationUnit) -> Option<&str> {
        self.buffer.slice(unit.span)
    }
}

/// Builds a [`Document`] row by row.
///
/// Owns every piece of running state: the buffer, the identifier counters
/// and the dialogue tracker.
pub struct DocumentBuilder<'a> {
    config: &'a Config,
    creation_date: i64,
    buffer: TextBuffer,
    units: Vec<AnnotationUnit>,
    ids: IdAllocator,
    dialogues: DialogueTracker<'a>,
    stats: ConversionStats,
}

impl<'a> DocumentBuilder<'a> {
    /// `creation_date` (seconds since the epoch) stamps every unit.
    pub fn new(config: &'a Config, creation_date: i64) -> Self {
        Self {
            config,
            creation_date,
            buffer: TextBuffer::new(),
            units: Vec::new(),
            ids: IdAllocator::new(),
            dialogues: DialogueTracker::new(&config.transcript, &config.dialogue),
            stats: ConversionStats::default(),
        }
    }

    /// Convert all rows.
    pub fn build(mut self, rows: &[TurnRecord]) -> Result<Document> {
        for (index, record) in rows.iter().enumerate() {
            if !record.is_server(&self.config.transcript.server_emitter) {
                self.add_turn(record)?;
            } else if self.dialogues.is_trigger(record) {
                self.close_dialogue(rows, index);
            }
        }

        if let Some(span) = self.dialogues.trailing(self.buffer.len()) {
            self.push_dialogue(span, DialogueEvents::default());
        }

        self.stats.rows = rows.len();
        tracing::info!(
            turns = self.stats.turns,
            segments = self.stats.segments,
            dialogues = self.stats.dialogues,
            "Built annotation document"
        );

        Ok(Document {
            buffer: self.buffer,
            units: self.units,
            stats: self.stats,
        })
    }

    fn add_turn(&mut self, record: &TurnRecord) -> Result<()> {
        let developments = record.development_counts()?;
        let layout = self.buffer.append_turn(
            &record.id,
            &record.emitter,
            &record.text,
            self.config.transcript.segment_marker,
        );
        tracing::debug!(row = record.row, span = %layout.span, "Appended turn");

        if self.config.annotation.paragraphs {
            self.push_unit(UnitKind::Paragraph, Vec::new(), layout.span);
        }

        let features = vec![
            feature("Identifier", &record.id),
            feature("Timestamp", &record.timestamp),
            feature("Emitter", &record.emitter),
            feature("Resources", record.known_resources()),
            feature("Developments", &developments),
            feature("Comments", &self.config.annotation.comments_placeholder),
        ];
        self.push_unit(UnitKind::Turn, features, layout.span);
        self.stats.turns += 1;

        self.add_segments(record, &layout);
        Ok(())
    }

    fn add_segments(&mut self, record: &TurnRecord, layout: &TurnLayout) {
        match layout.borders.spans() {
            Ok(spans) => {
                for span in spans {
                    self.push_unit(UnitKind::Segment, Vec::new(), span);
                    self.stats.segments += 1;
                }
            }
            Err(e) => {
                tracing::warn!(row = record.row, id = %record.id, "Skipping segments: {}", e);
                self.stats.unbalanced_turns += 1;
            }
        }
    }

    fn close_dialogue(&mut self, rows: &[TurnRecord], index: usize) {
        let end = self.buffer.last_offset();
        match self.dialogues.close(rows, index, end) {
            Some(closed) => self.push_dialogue(closed.span, closed.events),
            None => self.stats.suppressed_dialogues += 1,
        }
    }

    fn push_dialogue(&mut self, span: Span, events: DialogueEvents) {
        let features = vec![
            feature("Dice_rolling", &events.dice_rolling),
            feature("Gets", &events.gets),
            feature("Trades", &events.trades),
        ];
        self.push_unit(UnitKind::Dialogue, features, span);
        self.stats.dialogues += 1;
    }

    fn push_unit(&mut self, kind: UnitKind, features: Vec<Feature>, span: Span) {
        self.units.push(AnnotationUnit {
            id: self.ids.next(kind),
            kind,
            metadata: Metadata::new(&self.config.annotation.author, self.creation_date),
            features,
            span,
        });
    }
}

fn feature(name: &'static str, value: &str) -> Feature {
    Feature {
        name,
        value: value.to_string(),
    }
}

/// Convert loaded rows into a document.
pub fn convert(rows: &[TurnRecord], config: &Config, creation_date: i64) -> Result<Document> {
    DocumentBuilder::new(config, creation_date).build(rows)
}
