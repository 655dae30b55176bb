//! Integration tests for the conversion pipeline (library API)

use std::fs;

use csv2glozz::document::{Document, UnitKind};
use csv2glozz::{convert, convert_file, transcript, Config, ConversionError};

use crate::helpers::{load_fixture, position_indices, temp_fixture};

const CREATED: i64 = 1_700_000_000;

fn pilot_document() -> Document {
    let config = Config::default();
    let rows = transcript::load_str(&load_fixture("pilot.soclog.seg.csv"), &config.transcript)
        .expect("fixture loads");
    convert(&rows, &config, CREATED).expect("fixture converts")
}

// ============================================================================
// Layout
// ============================================================================

#[test]
fn snapshot_pilot_layout() {
    let document = pilot_document();
    let layout = document
        .units()
        .iter()
        .map(|unit| {
            format!(
                "{} {} {:?}",
                unit.kind,
                unit.span,
                document.unit_text(unit).unwrap_or("<out of range>")
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    insta::assert_snapshot!("pilot_layout", layout);
}

#[test]
fn text_buffer_drops_server_rows_and_markers() {
    let document = pilot_document();

    assert_eq!(
        document.text(),
        " 4 : Alice : anyone have wood?I can give clay 5 : Bob : no sorry \
         7 : Cat : okdone 11 : Bob : nice "
    );
    assert!(!document.text().contains('&'));
}

#[test]
fn turns_cover_rendered_rows_separated_by_single_spaces() {
    let document = pilot_document();
    let config = Config::default();
    let rows = transcript::load_str(&load_fixture("pilot.soclog.seg.csv"), &config.transcript)
        .unwrap();
    let speakers: Vec<_> = rows.iter().filter(|r| r.emitter != "Server").collect();
    let turns: Vec<_> = document.units_of(UnitKind::Turn).collect();
    assert_eq!(turns.len(), speakers.len());

    let mut expected_start = 1;
    for (turn, row) in turns.iter().zip(&speakers) {
        let rendered = format!("{} : {} : {}", row.id, row.emitter, row.text.replace('&', ""));
        assert_eq!(document.unit_text(turn), Some(rendered.as_str()));
        assert_eq!(turn.span.start, expected_start);
        expected_start = turn.span.end + 1;
    }
    assert_eq!(expected_start, document.buffer().len());
}

#[test]
fn segments_nest_in_turns_and_count_markers() {
    let document = pilot_document();
    let turns: Vec<_> = document.units_of(UnitKind::Turn).collect();
    let segments: Vec<_> = document.units_of(UnitKind::Segment).collect();

    // markers per speaker row: 1, 0, 2, 0
    assert_eq!(segments.len(), 2 + 1 + 3 + 1);
    for segment in segments {
        assert!(turns.iter().any(|turn| turn.span.contains(&segment.span)));
    }
}

#[test]
fn dialogues_are_contiguous_and_end_at_buffer_length() {
    let document = pilot_document();
    let dialogues: Vec<_> = document.units_of(UnitKind::Dialogue).collect();

    assert_eq!(dialogues.len(), 2);
    assert_eq!(dialogues[0].span.start, 0);
    for pair in dialogues.windows(2) {
        assert_eq!(pair[0].span.end, pair[1].span.start);
    }
    assert_eq!(dialogues.last().unwrap().span.end, document.buffer().len());

    for turn in document.units_of(UnitKind::Turn) {
        let enclosing = dialogues
            .iter()
            .filter(|d| d.span.contains(&turn.span))
            .count();
        assert_eq!(enclosing, 1, "turn {} must sit in exactly one dialogue", turn.span);
    }
}

#[test]
fn dialogue_features_aggregate_server_events() {
    let document = pilot_document();
    let first = document.units_of(UnitKind::Dialogue).next().unwrap();

    assert_eq!(first.feature("Dice_rolling"), Some("Bob rolled a 6 and a 3."));
    assert_eq!(first.feature("Gets"), Some("Cat gets 2 ore. Alice gets 1 sheep."));
    assert_eq!(
        first.feature("Trades"),
        Some("Alice traded 1 clay for 1 wood from Cat.")
    );
    assert_eq!(document.stats().suppressed_dialogues, 1);
}

#[test]
fn turn_features_are_normalised() {
    let document = pilot_document();
    let turn = document.units_of(UnitKind::Turn).next().unwrap();

    assert_eq!(turn.feature("Resources"), Some("clay=3; ore=1"));
    assert_eq!(turn.feature("Developments"), Some("roads=2; settlements=1"));

    let bob = document.units_of(UnitKind::Turn).nth(1).unwrap();
    assert_eq!(bob.feature("Developments"), Some("roads=1; settlements=2; cities=0"));
}

// ============================================================================
// Files
// ============================================================================

#[test]
fn convert_file_writes_pair_beside_input() {
    let (dir, path) = temp_fixture("pilot.soclog.seg.csv");

    let converted = convert_file(&path, &Config::default(), None, CREATED).unwrap();

    assert_eq!(converted.paths.text, dir.path().join("pilot.ac"));
    assert_eq!(converted.paths.annotations, dir.path().join("pilot.aa"));
    let text = fs::read_to_string(&converted.paths.text).unwrap();
    assert_eq!(text, pilot_document().text());
    assert_eq!(converted.sizes.text_bytes, text.len() as u64);
    assert_eq!(converted.stats.turns, 4);
}

#[test]
fn annotation_indices_stay_within_text() {
    let (_dir, path) = temp_fixture("pilot.soclog.seg.csv");
    let converted = convert_file(&path, &Config::default(), None, CREATED).unwrap();

    let text = fs::read_to_string(&converted.paths.text).unwrap();
    let xml = fs::read_to_string(&converted.paths.annotations).unwrap();
    let indices = position_indices(&xml);
    let len = text.chars().count();

    // two positions per unit
    assert_eq!(indices.len(), 2 * pilot_document().units().len());
    assert!(indices.iter().all(|&index| index <= len));
}

#[test]
fn conversion_is_reproducible() {
    let (_dir, path) = temp_fixture("pilot.soclog.seg.csv");

    let first = convert_file(&path, &Config::default(), None, CREATED).unwrap();
    let first_xml = fs::read(&first.paths.annotations).unwrap();
    let first_text = fs::read(&first.paths.text).unwrap();

    let second = convert_file(&path, &Config::default(), None, CREATED).unwrap();
    assert_eq!(fs::read(&second.paths.annotations).unwrap(), first_xml);
    assert_eq!(fs::read(&second.paths.text).unwrap(), first_text);
}

#[test]
fn malformed_row_leaves_no_output() {
    let (dir, path) = temp_fixture("malformed.csv");

    let err = convert_file(&path, &Config::default(), None, CREATED).unwrap_err();

    assert!(matches!(err, ConversionError::MalformedRow { row: 2, fields: 4, .. }));
    assert!(!dir.path().join("malformed.ac").exists());
    assert!(!dir.path().join("malformed.aa").exists());
}

#[test]
fn missing_input_is_an_io_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = convert_file(&dir.path().join("absent.csv"), &Config::default(), None, CREATED)
        .unwrap_err();

    assert!(matches!(err, ConversionError::Io { .. }));
    assert!(err.to_string().contains("absent.csv"));
}
