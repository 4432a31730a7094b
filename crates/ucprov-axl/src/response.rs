//! AXL response document parsing.
//!
//! Responses are parsed with an event stream into the three shapes the
//! operation library consumes: result rows (`executeSQLQuery`), an affected
//! row count (`executeSQLUpdate`), and a bare return value (`addPhone`).
//! A `<faultstring>` anywhere in the document wins over all of them.

use std::collections::HashMap;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{AxlError, AxlResult};

/// One parsed AXL response document.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AxlResponse {
    /// `<row>` elements, each a flat column-name to text mapping.
    pub rows: Vec<HashMap<String, String>>,
    /// `<rowsUpdated>` count, when present.
    pub rows_updated: Option<u32>,
    /// Text of a `<return>` element with no child elements.
    pub return_text: Option<String>,
}

impl AxlResponse {
    /// Parse a response body, surfacing a remote fault as [`AxlError::Fault`]
    /// before any shape interpretation.
    pub fn parse(xml: &str) -> AxlResult<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut response = AxlResponse::default();
        let mut fault: Option<String> = None;
        // Stack of (local element name, accumulated text) frames.
        let mut frames: Vec<(String, String)> = Vec::new();
        let mut current_row: Option<HashMap<String, String>> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    let name = local_name(e.local_name().as_ref())?;
                    if name == "row" {
                        current_row = Some(HashMap::new());
                    }
                    frames.push((name, String::new()));
                }
                Ok(Event::Empty(e)) => {
                    let name = local_name(e.local_name().as_ref())?;
                    if name == "row" {
                        response.rows.push(HashMap::new());
                    } else if let Some(row) = current_row.as_mut() {
                        row.insert(name, String::new());
                    }
                }
                Ok(Event::Text(t)) => {
                    let text = t
                        .unescape()
                        .map_err(|e| AxlError::MalformedResponse(e.to_string()))?;
                    if let Some((_, buf)) = frames.last_mut() {
                        buf.push_str(&text);
                    }
                }
                Ok(Event::End(_)) => {
                    let Some((name, text)) = frames.pop() else {
                        return Err(AxlError::MalformedResponse(
                            "unbalanced end tag".to_string(),
                        ));
                    };
                    match name.as_str() {
                        "faultstring" => fault = Some(text),
                        "rowsUpdated" => response.rows_updated = text.trim().parse().ok(),
                        "row" => {
                            response.rows.push(current_row.take().unwrap_or_default());
                        }
                        "return" => {
                            let text = text.trim();
                            if response.rows.is_empty()
                                && response.rows_updated.is_none()
                                && !text.is_empty()
                            {
                                response.return_text = Some(text.to_string());
                            }
                        }
                        _ => {
                            if let Some(row) = current_row.as_mut() {
                                row.insert(name, text);
                            }
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => return Err(AxlError::MalformedResponse(e.to_string())),
            }
        }

        match fault {
            Some(message) => Err(AxlError::Fault(message)),
            None => Ok(response),
        }
    }

    /// Value of `column` in the first row, if any.
    #[must_use]
    pub fn first_row_value(&self, column: &str) -> Option<&str> {
        self.rows.first().and_then(|row| row.get(column)).map(String::as_str)
    }

    /// Values of `column` across all rows, skipping rows without it.
    pub fn column_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a str> {
        self.rows
            .iter()
            .filter_map(move |row| row.get(column).map(String::as_str))
    }
}

fn local_name(raw: &[u8]) -> AxlResult<String> {
    std::str::from_utf8(raw)
        .map(str::to_string)
        .map_err(|e| AxlError::MalformedResponse(format!("non-UTF-8 element name: {e}")))
}
