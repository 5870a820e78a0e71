//! Category classification and per-run color assignment.
//!
//! Classification is a prioritized chain of pure signals over the record's
//! `CategoryHint`; the first non-empty result wins and everything falls
//! back to [`DEFAULT_CATEGORY`]. Colors come from a fixed palette, handed
//! out in first-seen category order by the run-scoped [`CategoryBook`].

use crate::record::CategoryHint;
use crate::report::Diagnostic;
use serde_json::Value;
use std::collections::HashMap;

/// Catch-all category for records carrying no usable signal.
pub const DEFAULT_CATEGORY: &str = "Other";

/// Fixed palette, cycled by first-seen category order.
pub const PALETTE: [&str; 24] = [
    "#834187", "#878541", "#458741", "#874145", "#c92d39", "#3ac92d", "#2d44c9", "#c9762d",
    "#ef8d22", "#2c22ef", "#ef22e5", "#e5ef22", "#fcc438", "#8d38fc", "#fc38a7", "#a7fc38",
    "#7ab648", "#b6487a", "#b66548", "#48adb6", "#3aa6dd", "#dd703a", "#ddc23a", "#a73add",
];

/// Slug → friendly category name. Unrecognized slugs fall through to the
/// next signal.
pub const SLUG_CATEGORIES: &[(&str, &str)] = &[
    ("analytics", "Analytics"),
    ("data-analytics", "Analytics"),
    ("compute", "Compute"),
    ("storage", "Storage"),
    ("networking-content-dev", "Networking"),
    ("networking", "Networking"),
    ("devtools", "Developer Tools"),
    ("developer-tools", "Developer Tools"),
    ("mgmt-govern", "Management & Governance"),
    ("management-governance", "Management & Governance"),
    ("ai-ml", "Artificial Intelligence (AI)"),
    ("machine-learning", "Artificial Intelligence (AI)"),
    ("ai", "Artificial Intelligence (AI)"),
    ("databases", "Databases"),
    ("app-integration", "Application Integration"),
    ("application-integration", "Application Integration"),
    ("media-services", "Media Services"),
    ("iot", "Internet of Things"),
    ("migration", "Migration"),
    ("euc", "End-User Computing (EUC)"),
    ("end-user-computing-euc", "End-User Computing (EUC)"),
    ("business-apps", "Business Applications"),
    ("business-applications", "Business Applications"),
    ("arch-strategy", "Architecture Strategy"),
    ("architecture-strategy", "Architecture Strategy"),
    ("satellite", "Aerospace & Satellite"),
    ("aerospace-satellite", "Aerospace & Satellite"),
    ("quantum", "Quantum Technologies"),
    ("blockchain", "Blockchain"),
    ("games", "Game Tech"),
    ("game-tech", "Game Tech"),
    ("cost-mgmt", "Cloud Financial Management"),
    ("cloud-financial-management", "Cloud Financial Management"),
    ("serverless", "Serverless"),
    ("mobile", "Mobile"),
];

/// Derive a category name for one record.
///
/// `name` is the entity's clean name, used only to label a malformed-badge
/// diagnostic.
pub fn classify(name: &str, hint: &CategoryHint, diagnostics: &mut Vec<Diagnostic>) -> String {
    if let Some(category) = technology_category(hint) {
        return category;
    }
    if let Some(category) = slug_category(hint) {
        return category;
    }
    match badge_category(hint) {
        Ok(Some(category)) => return category,
        Ok(None) => {}
        Err(detail) => diagnostics.push(Diagnostic::MalformedBadge {
            name: name.to_string(),
            detail,
        }),
    }
    DEFAULT_CATEGORY.to_string()
}

/// Signal 1: a dedicated technology-category tag, used verbatim.
fn technology_category(hint: &CategoryHint) -> Option<String> {
    hint.technology_category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}

/// Signal 2: a tech-category slug mapped through the fixed table.
fn slug_category(hint: &CategoryHint) -> Option<String> {
    let slug = hint.tech_category_slug.as_deref()?.trim().to_ascii_lowercase();
    SLUG_CATEGORIES
        .iter()
        .find(|(s, _)| *s == slug)
        .map(|(_, friendly)| friendly.to_string())
}

/// Signal 3: a badge payload that may embed `{"value": [labels…]}`; the
/// first label wins. A present-but-undecodable payload is an error so the
/// caller can record it; decodable payloads of the wrong shape just yield
/// nothing.
fn badge_category(hint: &CategoryHint) -> Result<Option<String>, String> {
    let Some(badge) = hint.badge.as_deref().map(str::trim).filter(|b| !b.is_empty()) else {
        return Ok(None);
    };
    let value: Value = serde_json::from_str(badge).map_err(|e| e.to_string())?;
    let labels = match &value {
        Value::Object(map) => map.get("value").and_then(Value::as_array),
        _ => None,
    };
    Ok(labels
        .and_then(|l| l.first())
        .and_then(Value::as_str)
        .map(str::to_string))
}

/// CSS-safe class name: the category name with `&`, `,` and spaces removed.
pub fn css_class(category: &str) -> String {
    category
        .chars()
        .filter(|c| !matches!(c, '&' | ',' | ' '))
        .collect()
}

/// Run-scoped color assignments: each first-seen category name gets the
/// next palette entry, cycling once the palette is exhausted.
#[derive(Debug, Clone, Default)]
pub struct CategoryBook {
    assigned: HashMap<String, &'static str>,
    next: usize,
}

impl CategoryBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Color for `category`, assigning the next palette entry on first
    /// sight. Stable within one run.
    pub fn color_for(&mut self, category: &str) -> &'static str {
        if let Some(color) = self.assigned.get(category) {
            return color;
        }
        let color = PALETTE[self.next % PALETTE.len()];
        self.next += 1;
        self.assigned.insert(category.to_string(), color);
        color
    }
}
