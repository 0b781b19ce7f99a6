// src/services/parser.rs

//! Sitemap document classification.
//!
//! A fetched document is either a `<sitemapindex>` whose `<sitemap><loc>`
//! entries point at further sitemaps, or a `<urlset>` whose `<url><loc>`
//! entries are page URLs. Index detection runs first and only succeeds when
//! at least one child sitemap is listed, so a degenerate index is never
//! mistaken for an empty success.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::error::ParseError;
use crate::models::{Location, ParsedDocument};

/// Root and entry element names for one sitemap document kind.
struct Schema {
    root: &'static str,
    entry: &'static str,
}

const SITEMAP_INDEX: Schema = Schema {
    root: "sitemapindex",
    entry: "sitemap",
};

const URL_SET: Schema = Schema {
    root: "urlset",
    entry: "url",
};

const LOC: &[u8] = b"loc";

/// Classify raw bytes as a sitemap index or a URL set.
pub fn classify(bytes: &[u8]) -> Result<ParsedDocument, ParseError> {
    if let Ok(entries) = extract_locations(bytes, &SITEMAP_INDEX) {
        if !entries.is_empty() {
            return Ok(ParsedDocument::Index { entries });
        }
    }

    let entries = extract_locations(bytes, &URL_SET)?;
    Ok(ParsedDocument::UrlSet { entries })
}

/// Collect `<loc>` values of the root's entry children, in document order.
///
/// Element names are matched by local name. Unknown elements are skipped,
/// and anything after the root element closes is ignored.
fn extract_locations(bytes: &[u8], schema: &Schema) -> Result<Vec<Location>, ParseError> {
    let mut reader = Reader::from_reader(bytes);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut entries = Vec::new();

    // Number of open elements; the root sits at depth 1.
    let mut depth = 0usize;
    let mut in_entry = false;
    let mut loc: Option<String> = None;
    let mut loc_text: Option<String> = None;

    loop {
        let event = reader.read_event_into(&mut buf).map_err(|e| {
            ParseError::malformed(format!(
                "XML error at position {}: {e}",
                reader.buffer_position()
            ))
        })?;

        match event {
            Event::Start(e) => {
                let name = e.local_name();
                match depth {
                    0 => expect_root(name.as_ref(), schema)?,
                    1 if name.as_ref() == schema.entry.as_bytes() => {
                        in_entry = true;
                        loc = None;
                    }
                    2 if in_entry && name.as_ref() == LOC => loc_text = Some(String::new()),
                    _ => {}
                }
                depth += 1;
            }
            Event::Empty(e) => {
                if depth == 0 {
                    expect_root(e.local_name().as_ref(), schema)?;
                    return Ok(entries);
                }
            }
            Event::Text(e) => {
                if depth == 0 {
                    return Err(ParseError::malformed(
                        "unexpected content outside the root element",
                    ));
                }
                if let Some(text) = loc_text.as_mut() {
                    let unescaped = e
                        .unescape()
                        .map_err(|e| ParseError::malformed(e.to_string()))?;
                    text.push_str(&unescaped);
                }
            }
            Event::CData(e) => {
                if depth == 0 {
                    return Err(ParseError::malformed(
                        "unexpected content outside the root element",
                    ));
                }
                if let Some(text) = loc_text.as_mut() {
                    text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                match depth {
                    0 => return Ok(entries),
                    1 if in_entry => {
                        in_entry = false;
                        entries.extend(loc.take());
                    }
                    2 => {
                        if let Some(text) = loc_text.take() {
                            let text = text.trim();
                            if !text.is_empty() {
                                loc = Some(text.to_string());
                            }
                        }
                    }
                    _ => {}
                }
            }
            Event::Eof => {
                let message = if depth == 0 {
                    "no root element"
                } else {
                    "unexpected end of document"
                };
                return Err(ParseError::malformed(message));
            }
            _ => {}
        }
        buf.clear();
    }
}

fn expect_root(name: &[u8], schema: &Schema) -> Result<(), ParseError> {
    if name == schema.root.as_bytes() {
        return Ok(());
    }
    Err(ParseError::malformed(format!(
        "expected <{}> root element, found <{}>",
        schema.root,
        String::from_utf8_lossy(name)
    )))
}
