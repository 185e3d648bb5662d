use anyhow::Result;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::Serialize;
use serde_json::Value;
use std::io::Cursor;

/// Singularize common array field names for XML child elements.
fn singular(field: &str) -> &str {
    match field {
        "bars" => "bar",
        "calls" | "puts" => "contract",
        "scores" | "peerScores" | "peer_scores" => "record",
        "points" => "point",
        _ => field,
    }
}

/// Object keys that are not valid element names, e.g. statement items keyed
/// by a number, get wrapped as `<entry key="...">`.
fn is_valid_tag(tag: &str) -> bool {
    let mut chars = tag.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
}

fn start_tag(tag: &str) -> BytesStart<'_> {
    if is_valid_tag(tag) {
        BytesStart::new(tag)
    } else {
        BytesStart::new("entry").with_attributes([("key", tag)])
    }
}

fn end_tag(tag: &str) -> BytesEnd<'_> {
    if is_valid_tag(tag) {
        BytesEnd::new(tag)
    } else {
        BytesEnd::new("entry")
    }
}

fn write_text<W: std::io::Write>(
    writer: &mut Writer<W>,
    tag: &str,
    text: &str,
) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(start_tag(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(end_tag(tag)))?;
    Ok(())
}

/// Recursively write a serde_json::Value as XML elements.
fn write_value<W: std::io::Write>(
    writer: &mut Writer<W>,
    tag: &str,
    value: &Value,
) -> Result<(), quick_xml::Error> {
    match value {
        Value::Null => {
            // Omit null fields entirely
        }
        Value::Bool(b) => write_text(writer, tag, if *b { "true" } else { "false" })?,
        Value::Number(n) => write_text(writer, tag, &n.to_string())?,
        Value::String(s) => write_text(writer, tag, s)?,
        Value::Array(arr) => {
            writer.write_event(Event::Start(start_tag(tag)))?;
            let child_tag = singular(tag);
            for item in arr {
                write_value(writer, child_tag, item)?;
            }
            writer.write_event(Event::End(end_tag(tag)))?;
        }
        Value::Object(map) => {
            writer.write_event(Event::Start(start_tag(tag)))?;
            for (key, val) in map {
                write_value(writer, key, val)?;
            }
            writer.write_event(Event::End(end_tag(tag)))?;
        }
    }
    Ok(())
}

fn finish(writer: Writer<Cursor<Vec<u8>>>) -> Result<String> {
    let buf = writer.into_inner().into_inner();
    Ok(String::from_utf8(buf)?)
}

/// Serialize a slice of Serialize items into an XML string.
pub fn items_to_xml<T: Serialize>(root_tag: &str, item_tag: &str, items: &[T]) -> Result<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    if items.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new(root_tag)))?;
    } else {
        writer.write_event(Event::Start(BytesStart::new(root_tag)))?;
        for item in items {
            let val = serde_json::to_value(item)?;
            write_value(&mut writer, item_tag, &val)?;
        }
        writer.write_event(Event::End(BytesEnd::new(root_tag)))?;
    }

    finish(writer)
}

/// Serialize one untyped document, e.g. quote-summary modules.
pub fn value_to_xml(root_tag: &str, value: &Value) -> Result<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    match value {
        Value::Object(map) if map.is_empty() => {
            writer.write_event(Event::Empty(BytesStart::new(root_tag)))?;
        }
        _ => write_value(&mut writer, root_tag, value)?,
    }
    finish(writer)
}
