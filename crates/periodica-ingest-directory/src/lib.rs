//! Products directory API ingestion (boundary adapter).
//!
//! The directory endpoint returns a flat `items` array where everything
//! interesting hides behind fallback chains: the display name lives in one
//! of several `additionalFields` keys (or must be rebuilt from the item
//! slug), descriptions may carry markup, links come in half a dozen
//! flavors, and category signals are spread over two tag namespaces plus
//! an embedded badge payload.
//!
//! The adapter resolves those chains and emits one [`SourceBatch`]; the
//! item slug is kept as the record's stable `code` so the merger can match
//! entries whose display names drift between sources.

use anyhow::{anyhow, Result};
use periodica_core::record::{CategoryHint, RawRecord, SourceBatch};
use scraper::Html;
use serde_json::Value;
use std::collections::HashSet;

/// Source identifier recorded on every entity this adapter contributes to.
pub const SOURCE_ID: &str = "directory";

/// Tag namespace carrying human-readable category names.
const TECHNOLOGY_CATEGORIES_NS: &str = "GLOBAL#aws-technology-categories";

/// Tag namespace carrying machine category slugs.
const TECH_CATEGORY_NS: &str = "GLOBAL#aws-tech-category";

/// Parse a directory API response into a batch of raw records.
pub fn parse_directory_response(json_text: &str) -> Result<SourceBatch> {
    let response: Value = serde_json::from_str(json_text)?;
    let items = response["items"]
        .as_array()
        .ok_or_else(|| anyhow!("directory response has no items array"))?;

    let mut batch = SourceBatch::new(SOURCE_ID);
    let mut seen_names: HashSet<String> = HashSet::new();

    for item in items {
        let fields = &item["item"]["additionalFields"];

        let Some(display_name) = item_name(item, fields) else {
            // No usable name at all; nothing to merge on.
            continue;
        };
        if !seen_names.insert(display_name.clone()) {
            continue;
        }

        batch.records.push(RawRecord {
            description: item_description(fields),
            link: item_link(fields),
            code: item["item"]["name"].as_str().map(str::to_string),
            hint: item_hint(item, fields),
            display_name,
        });
    }

    Ok(batch)
}

/// Display name fallback chain: title fields, then the title-cased slug.
fn item_name(item: &Value, fields: &Value) -> Option<String> {
    for key in ["title", "productTitle", "cardTitle"] {
        if let Some(name) = non_empty_str(&fields[key]) {
            return Some(name.to_string());
        }
    }
    if let Some(name) = non_empty_str(&item["item"]["title"]) {
        return Some(name.to_string());
    }
    non_empty_str(&item["item"]["name"]).map(title_case_slug)
}

/// Description fallback chain, markup stripped when present.
fn item_description(fields: &Value) -> Option<String> {
    for key in ["body", "blurb", "description"] {
        if let Some(description) = non_empty_str(&fields[key]) {
            if description.contains('<') && description.contains('>') {
                return Some(strip_html(description));
            }
            return Some(description.to_string());
        }
    }
    None
}

/// Link fallback chain: CTA links, plain URL fields, then nested link
/// objects.
fn item_link(fields: &Value) -> Option<String> {
    for key in ["ctaLink", "primaryCTALink", "secondaryCTALink", "url"] {
        if let Some(link) = non_empty_str(&fields[key]) {
            return Some(link.to_string());
        }
    }
    for key in ["link", "learnMoreLink"] {
        let value = &fields[key];
        if let Some(href) = non_empty_str(&value["href"]) {
            return Some(href.to_string());
        }
        if let Some(link) = non_empty_str(value) {
            return Some(link.to_string());
        }
    }
    None
}

/// Collect category signals: both tag namespaces plus the badge payload.
fn item_hint(item: &Value, fields: &Value) -> CategoryHint {
    let mut hint = CategoryHint::default();
    if let Some(tags) = item["tags"].as_array() {
        for tag in tags {
            let Some(namespace) = tag["tagNamespaceId"].as_str() else {
                continue;
            };
            let name = non_empty_str(&tag["name"]);
            match namespace {
                TECHNOLOGY_CATEGORIES_NS if hint.technology_category.is_none() => {
                    hint.technology_category = name.map(str::to_string);
                }
                TECH_CATEGORY_NS if hint.tech_category_slug.is_none() => {
                    hint.tech_category_slug = name.map(str::to_string);
                }
                _ => {}
            }
        }
    }
    hint.badge = non_empty_str(&fields["badge"]).map(str::to_string);
    hint
}

fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().map(str::trim).filter(|s| !s.is_empty())
}

/// `"interactive-video-service"` → `"Interactive Video Service"`.
fn title_case_slug(slug: &str) -> String {
    slug.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Visible text of an HTML fragment, whitespace-joined.
fn strip_html(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let text: Vec<&str> = fragment
        .root_element()
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();
    text.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(items: Value) -> String {
        serde_json::json!({ "items": items }).to_string()
    }

    #[test]
    fn resolves_names_through_the_fallback_chain() {
        let text = response(serde_json::json!([
            { "item": { "name": "svc-a", "additionalFields": { "title": "Amazon Service A" } } },
            { "item": { "name": "svc-b", "additionalFields": { "productTitle": "Amazon Service B" } } },
            { "item": { "name": "svc-c", "title": "Amazon Service C", "additionalFields": {} } },
            { "item": { "name": "elastic-thing_api", "additionalFields": {} } },
            { "item": { "additionalFields": {} } }
        ]));
        let batch = parse_directory_response(&text).expect("parse");

        let names: Vec<&str> = batch
            .records
            .iter()
            .map(|r| r.display_name.as_str())
            .collect();
        // The nameless fifth item is dropped entirely.
        assert_eq!(
            names,
            vec![
                "Amazon Service A",
                "Amazon Service B",
                "Amazon Service C",
                "Elastic Thing Api"
            ]
        );
        assert_eq!(batch.records[0].code.as_deref(), Some("svc-a"));
    }

    #[test]
    fn strips_markup_from_descriptions() {
        let text = response(serde_json::json!([
            { "item": { "name": "svc", "additionalFields": {
                "title": "Amazon Service",
                "body": "<p>Fast <b>object</b> storage</p>"
            } } }
        ]));
        let batch = parse_directory_response(&text).expect("parse");
        assert_eq!(
            batch.records[0].description.as_deref(),
            Some("Fast object storage")
        );
    }

    #[test]
    fn resolves_links_including_nested_objects() {
        let text = response(serde_json::json!([
            { "item": { "name": "a", "additionalFields": {
                "title": "A", "ctaLink": "https://example.com/a"
            } } },
            { "item": { "name": "b", "additionalFields": {
                "title": "B", "link": { "href": "https://example.com/b" }
            } } },
            { "item": { "name": "c", "additionalFields": {
                "title": "C", "learnMoreLink": "https://example.com/c"
            } } }
        ]));
        let batch = parse_directory_response(&text).expect("parse");
        let links: Vec<Option<&str>> = batch
            .records
            .iter()
            .map(|r| r.link.as_deref())
            .collect();
        assert_eq!(
            links,
            vec![
                Some("https://example.com/a"),
                Some("https://example.com/b"),
                Some("https://example.com/c")
            ]
        );
    }

    #[test]
    fn collects_tags_and_badge_into_the_hint() {
        let text = response(serde_json::json!([
            {
                "item": { "name": "svc", "additionalFields": {
                    "title": "Amazon Service",
                    "badge": "{\"value\":[\"Analytics\"]}"
                } },
                "tags": [
                    { "tagNamespaceId": "GLOBAL#aws-technology-categories", "name": "Analytics" },
                    { "tagNamespaceId": "GLOBAL#aws-tech-category", "name": "analytics" },
                    { "tagNamespaceId": "GLOBAL#unrelated", "name": "ignore me" }
                ]
            }
        ]));
        let batch = parse_directory_response(&text).expect("parse");
        let hint = &batch.records[0].hint;
        assert_eq!(hint.technology_category.as_deref(), Some("Analytics"));
        assert_eq!(hint.tech_category_slug.as_deref(), Some("analytics"));
        assert_eq!(hint.badge.as_deref(), Some("{\"value\":[\"Analytics\"]}"));
    }

    #[test]
    fn duplicate_names_within_a_response_are_skipped() {
        let text = response(serde_json::json!([
            { "item": { "name": "one", "additionalFields": { "title": "Amazon Twin" } } },
            { "item": { "name": "two", "additionalFields": { "title": "Amazon Twin" } } }
        ]));
        let batch = parse_directory_response(&text).expect("parse");
        assert_eq!(batch.records.len(), 1);
    }

    #[test]
    fn missing_items_array_is_an_error() {
        let err = parse_directory_response("{}").expect_err("should fail");
        assert!(err.to_string().contains("items"), "{err}");
    }
}
