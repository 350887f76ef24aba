//! Rendering rows back into list-feed request bodies.
//!
//! Insert bodies are built from scratch out of the row's map. Update bodies
//! are a streaming rewrite of the original entry XML: every event is copied
//! through untouched except the outer `<entry>` start tag (whose
//! server-assigned attributes must not go back on the wire) and the field
//! elements named by the row. Rewriting instead of regenerating is what
//! keeps server-only fields intact.

use std::collections::HashSet;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::QName;
use quick_xml::{Reader, Writer};

use crate::{key, Entry, Row, RowError, ATOM_NS, GSX_NS};

const FIELD_PREFIX: &str = "gsx";

/// The fixed namespace-declaring open tag emitted at the head of both
/// outgoing shapes.
fn entry_open_tag() -> BytesStart<'static> {
    let mut start = BytesStart::new("entry");
    start.push_attribute(("xmlns", ATOM_NS));
    start.push_attribute(("xmlns:gsx", GSX_NS));
    start
}

pub(crate) fn insert_xml(row: &Row) -> Result<String, RowError> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Start(entry_open_tag()))?;

    for (field, value) in row.iter() {
        let tag = format!("{FIELD_PREFIX}:{field}");
        writer.write_event(Event::Start(BytesStart::new(tag.as_str())))?;
        writer.write_event(Event::Text(BytesText::new(value.unwrap_or(""))))?;
        writer.write_event(Event::End(BytesEnd::new(tag.as_str())))?;
    }

    writer.write_event(Event::End(BytesEnd::new("entry")))?;
    Ok(String::from_utf8(writer.into_inner())?)
}

pub(crate) fn update_xml(row: &Row, entry: &Entry) -> Result<String, RowError> {
    let mut reader = Reader::from_str(entry.xml());
    reader.config_mut().trim_text(false);

    let mut writer = Writer::new(Vec::new());
    let mut buf = Vec::new();

    let mut depth: usize = 0;
    let mut rewritten: HashSet<String> = HashSet::new();

    loop {
        let event = reader.read_event_into(&mut buf)?;
        match event {
            Event::Eof => break,
            Event::Start(ref e) => {
                if depth == 0 && e.local_name().as_ref() == b"entry" {
                    writer.write_event(Event::Start(entry_open_tag()))?;
                } else if depth == 1 {
                    if let Some(field) = field_key(e.name()) {
                        if row.contains_key(&field) {
                            rewrite_field(&mut reader, &mut writer, e, row.get(&field).unwrap_or(""))?;
                            rewritten.insert(field);
                            // the whole element, end tag included, is consumed
                            buf.clear();
                            continue;
                        }
                    }
                    writer.write_event(Event::Start(e.to_owned()))?;
                } else {
                    writer.write_event(Event::Start(e.to_owned()))?;
                }
                depth += 1;
            }
            Event::Empty(ref e) => {
                if depth == 1 {
                    if let Some(field) = field_key(e.name()) {
                        if row.contains_key(&field) {
                            let tag = String::from_utf8(e.name().as_ref().to_vec())?;
                            writer.write_event(Event::Start(e.to_owned()))?;
                            writer.write_event(Event::Text(BytesText::new(
                                row.get(&field).unwrap_or(""),
                            )))?;
                            writer.write_event(Event::End(BytesEnd::new(tag)))?;
                            rewritten.insert(field);
                            buf.clear();
                            continue;
                        }
                    }
                }
                writer.write_event(Event::Empty(e.to_owned()))?;
            }
            Event::End(ref e) => {
                depth = depth.saturating_sub(1);
                writer.write_event(Event::End(e.to_owned()))?;
            }
            _ => {
                writer.write_event(event.to_owned())?;
            }
        }
        buf.clear();
    }

    for field in row.keys() {
        if !rewritten.contains(field) {
            // a key added after the entry was fetched has no node to rewrite
            log::debug!("no {FIELD_PREFIX}:{field} element in entry; leaving request body unchanged");
        }
    }

    Ok(String::from_utf8(writer.into_inner())?)
}

/// Replace a field element's content with `value`, keeping its start tag
/// (attributes included) as-is.
fn rewrite_field(
    reader: &mut Reader<&[u8]>,
    writer: &mut Writer<Vec<u8>>,
    start: &BytesStart<'_>,
    value: &str,
) -> Result<(), RowError> {
    let tag = String::from_utf8(start.name().as_ref().to_vec())?;
    writer.write_event(Event::Start(start.to_owned()))?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    reader.read_to_end_into(start.name(), &mut Vec::new())?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

/// The row key a field element responds to, or `None` for non-field
/// elements. List feeds emit field children under the `gsx` prefix; the
/// local name normalizes to the row key.
fn field_key(name: QName<'_>) -> Option<String> {
    let prefix = name.prefix()?;
    if prefix.as_ref() != FIELD_PREFIX.as_bytes() {
        return None;
    }
    std::str::from_utf8(name.local_name().as_ref())
        .ok()
        .map(key::normalize)
}
