//! Glozz `.aa` annotation XML.
//!
//! ```text
//! <annotations version="1.0" encoding="UTF-8" standalone="no">
//!     <unit id="stac_20000001">
//!         <metadata>author, creation-date, lastModifier, lastModificationDate</metadata>
//!         <characterisation>
//!             <type>Turn</type>
//!             <featureSet><feature name="Emitter">Alice</feature>...</featureSet>
//!         </characterisation>
//!         <positioning>
//!             <start><singlePosition index="1"/></start>
//!             <end><singlePosition index="19"/></end>
//!         </positioning>
//!     </unit>
//! </annotations>
//! ```

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::document::{AnnotationUnit, Document};
use crate::error::Result;

const GENERATED_BY: &str = concat!(" Generated by csv2glozz ", env!("CARGO_PKG_VERSION"), " ");

/// Serialize a document's units as Glozz XML.
pub fn write_annotations<W: Write>(document: &Document, inner: W) -> Result<()> {
    let mut writer = Writer::new_with_indent(inner, b'\t', 1);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new("annotations").with_attributes([
        ("version", "1.0"),
        ("encoding", "UTF-8"),
        ("standalone", "no"),
    ])))?;
    writer.write_event(Event::Comment(BytesText::new(GENERATED_BY)))?;

    for unit in document.units() {
        write_unit(&mut writer, unit)?;
    }

    writer.write_event(Event::End(BytesEnd::new("annotations")))?;
    writer.get_mut().write_all(b"\n")?;
    Ok(())
}

/// Serialize to an in-memory string.
pub fn to_xml_string(document: &Document) -> Result<String> {
    let mut out = Vec::new();
    write_annotations(document, &mut out)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

fn write_unit<W: Write>(writer: &mut Writer<W>, unit: &AnnotationUnit) -> Result<()> {
    writer.write_event(Event::Start(
        BytesStart::new("unit").with_attributes([("id", unit.id.as_str())]),
    ))?;

    start(writer, "metadata")?;
    text_element(writer, BytesStart::new("author"), &unit.metadata.author)?;
    text_element(
        writer,
        BytesStart::new("creation-date"),
        &unit.metadata.creation_date.to_string(),
    )?;
    text_element(writer, BytesStart::new("lastModifier"), &unit.metadata.last_modifier)?;
    text_element(
        writer,
        BytesStart::new("lastModificationDate"),
        &unit.metadata.last_modification_date.to_string(),
    )?;
    end(writer, "metadata")?;

    start(writer, "characterisation")?;
    text_element(writer, BytesStart::new("type"), unit.kind.type_name())?;
    if unit.features.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new("featureSet")))?;
    } else {
        start(writer, "featureSet")?;
        for feature in &unit.features {
            text_element(
                writer,
                BytesStart::new("feature").with_attributes([("name", feature.name)]),
                &feature.value,
            )?;
        }
        end(writer, "featureSet")?;
    }
    end(writer, "characterisation")?;

    start(writer, "positioning")?;
    position(writer, "start", unit.span.start)?;
    position(writer, "end", unit.span.end)?;
    end(writer, "positioning")?;

    end(writer, "unit")
}

fn position<W: Write>(writer: &mut Writer<W>, name: &str, index: usize) -> Result<()> {
    start(writer, name)?;
    let index = index.to_string();
    writer.write_event(Event::Empty(
        BytesStart::new("singlePosition").with_attributes([("index", index.as_str())]),
    ))?;
    end(writer, name)
}

/// An element holding text, or an empty element when there is none.
fn text_element<W: Write>(writer: &mut Writer<W>, element: BytesStart<'_>, text: &str) -> Result<()> {
    if text.is_empty() {
        writer.write_event(Event::Empty(element))?;
        return Ok(());
    }
    let name = String::from_utf8_lossy(element.name().as_ref()).into_owned();
    writer.write_event(Event::Start(element))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    end(writer, &name)
}

fn start<W: Write>(writer: &mut Writer<W>, name: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    Ok(())
}

fn end<W: Write>(writer: &mut Writer<W>, name: &str) -> Result<()> {
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
