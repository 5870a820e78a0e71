//! HTML rendering for a finished table.
//!
//! This module intentionally lives in the CLI crate: it is presentation
//! tooling and should not pull markup concerns into the core. Rendering
//! goes through a template file so the page stays readable/maintainable;
//! the grid tiles and legend are the only generated markup.

use periodica_core::record::{Entity, PeriodicTable};

/// Name lengths past which the tile drops to smaller font sizes.
const LONG_NAME: usize = 11;
const REALLY_LONG_NAME: usize = 20;

/// Render a self-contained HTML page for the table.
pub fn render_html(table: &PeriodicTable) -> String {
    let template = include_str!("../templates/periodic.html");

    let mut styles = String::new();
    let mut legend = String::new();
    let mut tiles = String::new();

    for category in &table.categories {
        styles.push_str(&format!(
            "  .tile.{} {{ background: {}; }}\n",
            category.css_class, category.color
        ));
        legend.push_str(&format!(
            "  <div class=\"entry\"><span class=\"swatch\" style=\"background: {}\"></span>{}</div>\n",
            category.color,
            escape_html(&category.name)
        ));
        for service in &category.services {
            tiles.push_str(&render_tile(service, &category.css_class));
        }
    }

    template
        .replace("{{TITLE}}", &escape_html(&table.title))
        .replace("{{DESCRIPTION}}", &escape_html(&table.description))
        .replace("{{GRID_ROWS}}", &table.grid_rows.to_string())
        .replace("{{CATEGORY_STYLES}}", styles.trim_end())
        .replace("{{TILES}}", tiles.trim_end())
        .replace("{{LEGEND}}", legend.trim_end())
}

fn render_tile(service: &Entity, css_class: &str) -> String {
    let mut classes = format!("tile {css_class}");
    if service.name.len() > REALLY_LONG_NAME {
        classes.push_str(" reallong");
    } else if service.name.len() > LONG_NAME {
        classes.push_str(" long");
    }

    let href = if service.link.is_empty() {
        String::new()
    } else {
        format!(" href=\"{}\"", escape_html(&service.link))
    };
    let title = if service.description.is_empty() {
        String::new()
    } else {
        format!(" title=\"{}\"", escape_html(&service.description))
    };

    format!(
        "    <a class=\"{classes}\" style=\"grid-row: {row}; grid-column: {column};\"{href}{title}>\
<span class=\"prefix\">{prefix}</span>\
<span class=\"symbol\">{symbol}</span>\
<span class=\"name\">{name}</span></a>\n",
        row = service.row,
        column = service.column,
        prefix = escape_html(&service.prefix),
        symbol = escape_html(&service.symbol),
        name = escape_html(&service.name),
    )
}

/// Minimal HTML escaping for text and attribute positions.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
