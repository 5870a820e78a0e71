//! Products navigation page ingestion (boundary adapter).
//!
//! The products page embeds its navigation tree as a JSON blob inside a
//! `<script>` tag; the `globalNav` field of that blob is itself a JSON
//! string. This crate digs the tree out of a saved page and emits one
//! [`SourceBatch`] of raw records, with each record's menu category as its
//! verbatim technology-category hint.
//!
//! **Untrusted boundary**: page markup changes at the source's whim. The
//! adapter fails loudly when the blob cannot be located at all and skips
//! quietly over malformed leaf items; deciding what to do about partial
//! data is the pipeline's job, not this crate's.

use anyhow::{anyhow, Result};
use periodica_core::record::{CategoryHint, RawRecord, SourceBatch};
use scraper::{Html, Selector};
use serde_json::Value;
use std::collections::HashSet;

/// Source identifier recorded on every entity this adapter contributes to.
pub const SOURCE_ID: &str = "nav";

/// Menu entry that aggregates rather than categorizes; always skipped.
const FEATURED_MENU: &str = "Featured Products";

/// Scripts shorter than this cannot hold the full navigation payload.
const MIN_NAV_SCRIPT_LEN: usize = 10_000;

/// Marker that starts the embedded navigation JSON object.
const NAV_DATA_MARKER: &str = r#"{"data":{"items""#;

/// Parse a saved products page into a batch of raw records.
pub fn parse_products_page(html: &str) -> Result<SourceBatch> {
    let nav = extract_global_nav(html)?;
    records_from_nav(&nav)
}

/// Locate and decode the `globalNav` payload embedded in the page.
fn extract_global_nav(html: &str) -> Result<Value> {
    let document = Html::parse_document(html);
    let scripts = Selector::parse("script").unwrap();

    for script in document.select(&scripts) {
        let text: String = script.text().collect();
        if text.len() < MIN_NAV_SCRIPT_LEN || !text.contains("globalNav") {
            continue;
        }
        let Some(start) = text.find(NAV_DATA_MARKER) else {
            continue;
        };
        let object = balanced_object(&text[start..])
            .ok_or_else(|| anyhow!("navigation payload has unbalanced braces"))?;
        let outer: Value = serde_json::from_str(object)?;
        let nav_json = outer["data"]["items"][0]["fields"]["globalNav"]
            .as_str()
            .ok_or_else(|| anyhow!("navigation payload is missing `globalNav`"))?;
        return Ok(serde_json::from_str(nav_json)?);
    }

    Err(anyhow!("could not find navigation data in page"))
}

/// The prefix of `text` spanning one brace-balanced object.
///
/// Brace counting, not JSON parsing. The embedded `globalNav` string does
/// contain braces, but they are serialized JSON and therefore balanced, so
/// the scan still ends on the outer object's closing brace.
fn balanced_object(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    for (i, b) in text.bytes().enumerate() {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(&text[..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Walk the Products menu into raw records.
fn records_from_nav(nav: &Value) -> Result<SourceBatch> {
    let items = nav["items"]
        .as_array()
        .ok_or_else(|| anyhow!("navigation tree has no items"))?;
    let products = items
        .iter()
        .find(|item| item["name"].as_str() == Some("Products"))
        .ok_or_else(|| anyhow!("could not find Products menu"))?;
    let sub_nav = products["subNav"]
        .as_array()
        .ok_or_else(|| anyhow!("Products menu has no subNav"))?;

    let mut batch = SourceBatch::new(SOURCE_ID);
    let mut seen_titles: HashSet<String> = HashSet::new();

    for category in sub_nav {
        let Some(category_name) = category["name"].as_str() else {
            continue;
        };
        let Some(columns) = category["columns"].as_array() else {
            continue;
        };
        if category_name == FEATURED_MENU {
            continue;
        }

        for column in columns {
            for item in column_items(column) {
                let Some(title) = item["title"].as_str() else {
                    continue;
                };
                if !seen_titles.insert(title.to_string()) {
                    continue;
                }
                batch.records.push(RawRecord {
                    display_name: title.to_string(),
                    description: item["body"].as_str().map(str::to_string),
                    link: item["hyperLink"].as_str().map(str::to_string),
                    code: None,
                    hint: CategoryHint {
                        technology_category: Some(category_name.to_string()),
                        ..CategoryHint::default()
                    },
                });
            }
        }
    }

    Ok(batch)
}

/// Items directly on a column plus items inside its sections.
fn column_items(column: &Value) -> Vec<&Value> {
    let mut items = Vec::new();
    if let Some(direct) = column["items"].as_array() {
        items.extend(direct);
    }
    if let Some(sections) = column["sections"].as_array() {
        for section in sections {
            if let Some(nested) = section["items"].as_array() {
                items.extend(nested);
            }
        }
    }
    items
}
