//! Dialogue boundary detection.
//!
//! A dialogue is the run of turns between two dice rolls. The game engine
//! (the Server emitter) announces every roll, so each Server row mentioning
//! a roll closes the current dialogue. The rows around that announcement
//! describe what happened at the boundary:
//!
//! - rolls and resource gains announced right after the trigger, up to the
//!   next human turn;
//! - the latest trade announced since the previous boundary.

use crate::config::{DialogueConfig, TranscriptConfig};
use crate::transcript::TurnRecord;

use super::Span;

/// Server announcements aggregated into a dialogue's features.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogueEvents {
    /// Space-joined roll announcements, starting with the trigger
    pub dice_rolling: String,
    /// Space-joined resource gains following the roll
    pub gets: String,
    /// Latest trade since the previous boundary
    pub trades: String,
}

/// A dialogue span closed at a trigger row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosedDialogue {
    pub span: Span,
    pub events: DialogueEvents,
}

/// Tracks dialogue borders across the row scan.
#[derive(Debug, Clone)]
pub struct DialogueTracker<'a> {
    server_emitter: &'a str,
    markers: &'a DialogueConfig,
    /// Right border of the last closed dialogue
    last_border: Option<usize>,
    /// Row index of the last trigger
    last_trigger: Option<usize>,
}

impl<'a> DialogueTracker<'a> {
    pub fn new(transcript: &'a TranscriptConfig, markers: &'a DialogueConfig) -> Self {
        Self {
            server_emitter: &transcript.server_emitter,
            markers,
            last_border: None,
            last_trigger: None,
        }
    }

    /// Whether a row closes the current dialogue.
    pub fn is_trigger(&self, record: &TurnRecord) -> bool {
        record.is_server(self.server_emitter) && record.text.contains(&self.markers.roll_marker)
    }

    /// Close the dialogue at `rows[index]`, whose trigger was seen when the
    /// buffer's last character was at `end`.
    ///
    /// Returns `None` when the dialogue would be empty.
    pub fn close(&mut self, rows: &[TurnRecord], index: usize, end: usize) -> Option<ClosedDialogue> {
        let start = self.last_border.unwrap_or(0);
        let events = self.collect_events(rows, index);

        self.last_border = Some(end);
        self.last_trigger = Some(index);

        if start == end {
            tracing::debug!(row = rows[index].row, offset = end, "Suppressing empty dialogue");
            return None;
        }

        Some(ClosedDialogue {
            span: Span::new(start, end),
            events,
        })
    }

    /// The dialogue covering whatever follows the last boundary.
    ///
    /// `len` is the final buffer length. Returns `None` when the last
    /// boundary already closed at the buffer's last character.
    pub fn trailing(&self, len: usize) -> Option<Span> {
        let last_offset = len.saturating_sub(1);
        match self.last_border {
            Some(border) if border == last_offset => None,
            Some(border) => Some(Span::new(border, len)),
            None => Some(Span::new(0, len)),
        }
    }

    fn collect_events(&self, rows: &[TurnRecord], index: usize) -> DialogueEvents {
        let mut rolls = vec![rows[index].text.as_str()];
        let mut gets = Vec::new();

        for row in rows[index + 1..]
            .iter()
            .take_while(|row| row.is_server(self.server_emitter))
        {
            if row.text.contains(&self.markers.roll_marker) {
                rolls.push(&row.text);
            }
            if row.text.contains(&self.markers.gets_marker) {
                gets.push(row.text.as_str());
            }
        }

        let floor = self.last_trigger.map_or(0, |t| t + 1);
        let trades = rows[floor..=index]
            .iter()
            .rev()
            .find(|row| {
                row.is_server(self.server_emitter) && row.text.contains(&self.markers.trade_marker)
            })
            .map(|row| row.text.clone())
            .unwrap_or_default();

        DialogueEvents {
            dice_rolling: rolls.join(" "),
            gets: gets.join(" "),
            trades,
        }
    }
}
