//! Response body parsing for the bid-announcement API.
//!
//! The upstream gateway answers JSON (`response.body.items`) when asked, but
//! some endpoint generations ignore the `type` parameter and answer XML
//! `<item>` elements instead. JSON is attempted first; XML is only tried
//! when the body is not JSON at all. A body matching neither shape yields an
//! empty batch, which callers treat exactly like a fetch failure.

use std::collections::HashMap;

use quick_xml::events::Event;
use quick_xml::Reader;
use serde_json::Value;
use tracing::debug;

use crate::record::RawRecord;

pub fn parse_items(body: &str) -> Vec<RawRecord> {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => json_items(&value),
        Err(_) => xml_items(body).unwrap_or_default(),
    }
}

fn json_items(value: &Value) -> Vec<RawRecord> {
    let items = match value.pointer("/response/body/items") {
        Some(Value::Array(items)) => items,
        _ => return Vec::new(),
    };
    items
        .iter()
        .filter_map(RawRecord::from_json)
        .collect()
}

/// Flatten each `<item>` element into tag -> text pairs, direct children
/// only, the way the JSON shape would have carried them.
fn xml_items(body: &str) -> Option<Vec<RawRecord>> {
    let mut reader = Reader::from_str(body);
    let mut records = Vec::new();
    let mut current: Option<HashMap<String, String>> = None;
    let mut field: Option<String> = None;
    let mut text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                if name == "item" {
                    current = Some(HashMap::new());
                } else if current.is_some() {
                    field = Some(name);
                    text.clear();
                }
            }
            Ok(Event::Empty(empty)) => {
                if let (Some(fields), None) = (current.as_mut(), field.as_ref()) {
                    let name = String::from_utf8_lossy(empty.name().as_ref()).into_owned();
                    fields.insert(name, String::new());
                }
            }
            Ok(Event::Text(t)) => {
                if field.is_some() {
                    match t.unescape() {
                        Ok(chunk) => text.push_str(&chunk),
                        Err(_) => return None,
                    }
                }
            }
            Ok(Event::End(end)) => {
                let name = String::from_utf8_lossy(end.name().as_ref()).into_owned();
                if name == "item" {
                    field = None;
                    if let Some(fields) = current.take() {
                        records.push(RawRecord::from_pairs(fields));
                    }
                } else if let Some(open) = field.take() {
                    if open == name {
                        if let Some(fields) = current.as_mut() {
                            fields.insert(open, text.trim().to_string());
                        }
                    }
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                debug!("XML fallback parse failed: {}", e);
                return None;
            }
        }
    }

    Some(records)
}
