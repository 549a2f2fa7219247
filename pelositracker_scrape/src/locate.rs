//! Candidate location over unstable markup.
//!
//! The tracker site ships no stable ids or classes, so datasets are
//! found by trying independent heuristics in a fixed priority order:
//! header-keyword match first, then an entity-name marker in the body,
//! then explicit structured-data carriers (`data-*` attributes and
//! embedded JSON script payloads). The first strategy that yields a
//! shape-valid candidate wins. All strategies missing is a legitimate
//! "not found" outcome, reported as an empty list rather than an
//! error.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Which heuristic produced a candidate. Diagnostic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    HeaderKeywords,
    EntityMarker,
    StructuredData,
}

/// A structural node that might, but is not confirmed to, contain the
/// target dataset.
pub enum Candidate<'a> {
    Table(ElementRef<'a>, Strategy),
    Attributed(ElementRef<'a>),
    Payload(serde_json::Value),
}

/// What the caller knows about the dataset it is looking for.
pub struct DatasetHints<'k> {
    /// Case-insensitive substrings expected in header cells.
    pub header_keywords: &'k [&'k str],
    /// Name of the tracked person, expected somewhere in the body of a
    /// relevant table.
    pub entity_marker: &'k str,
    /// `data-*` attribute carrying per-record values, e.g. `data-ticker`.
    pub data_attr: &'k str,
    /// Key expected inside an embedded `application/json` payload.
    pub payload_key: &'k str,
    /// Minimal cell count for a row to count as shape-valid.
    pub min_cells: usize,
}

fn sel(css: &'static str) -> Option<Selector> {
    Selector::parse(css).ok()
}

/// Rows of a table, header included.
pub fn table_rows<'a>(table: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    let Some(tr) = sel("tr") else {
        return Vec::new();
    };
    table.select(&tr).collect()
}

/// Cell texts of a row. Falls back to `th` cells for rows that render
/// their first column as a header cell.
pub fn row_cells(row: ElementRef<'_>) -> Vec<String> {
    let mut cells: Vec<String> = sel("td")
        .map(|td| row.select(&td).map(element_text).collect())
        .unwrap_or_default();
    if cells.is_empty() {
        if let Some(th) = sel("th") {
            cells = row.select(&th).map(element_text).collect();
        }
    }
    cells
}

/// Collapsed visible text of an element.
pub fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Combined lowercase text of a table's header cells.
fn header_text(table: ElementRef<'_>) -> String {
    let Some(th) = sel("th") else {
        return String::new();
    };
    table
        .select(&th)
        .map(|h| element_text(h).to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// True when the table has at least one row of `min_cells` cells
/// beyond the header.
fn has_shape(table: ElementRef<'_>, min_cells: usize) -> bool {
    table_rows(table)
        .into_iter()
        .skip(1)
        .any(|row| row_cells(row).len() >= min_cells)
}

/// Finds candidate elements for a dataset, ranked by strategy
/// priority. Returns as soon as one strategy produces a shape-valid
/// candidate; returns an empty list when every strategy misses.
pub fn locate<'a>(doc: &'a Html, hints: &DatasetHints<'_>) -> Vec<Candidate<'a>> {
    let Some(table_sel) = sel("table") else {
        return Vec::new();
    };
    let tables: Vec<ElementRef<'a>> = doc.select(&table_sel).collect();

    // Strategy 1: header cells mention an expected keyword.
    let by_header: Vec<Candidate<'a>> = tables
        .iter()
        .filter(|t| {
            let header = header_text(**t);
            hints.header_keywords.iter().any(|k| header.contains(k))
        })
        .filter(|t| has_shape(**t, hints.min_cells))
        .map(|t| Candidate::Table(*t, Strategy::HeaderKeywords))
        .collect();
    if !by_header.is_empty() {
        debug!("located {} table(s) by header keywords", by_header.len());
        return by_header;
    }

    // Strategy 2: body text names the tracked entity.
    if !hints.entity_marker.is_empty() {
        let marker = hints.entity_marker.to_lowercase();
        let by_marker: Vec<Candidate<'a>> = tables
            .iter()
            .filter(|t| element_text(**t).to_lowercase().contains(&marker))
            .filter(|t| has_shape(**t, hints.min_cells))
            .map(|t| Candidate::Table(*t, Strategy::EntityMarker))
            .collect();
        if !by_marker.is_empty() {
            debug!("located {} table(s) by entity marker", by_marker.len());
            return by_marker;
        }
    }

    // Strategy 3: explicit structured-data carriers.
    let mut structured: Vec<Candidate<'a>> = Vec::new();
    if !hints.data_attr.is_empty() {
        if let Ok(attr_sel) = Selector::parse(&format!("[{}]", hints.data_attr)) {
            structured.extend(doc.select(&attr_sel).map(Candidate::Attributed));
        }
    }
    if !hints.payload_key.is_empty() {
        if let Some(script_sel) = sel(r#"script[type="application/json"]"#) {
            for script in doc.select(&script_sel) {
                let raw = script.text().collect::<String>();
                if let Ok(value) = serde_json::from_str::<serde_json::Value>(&raw) {
                    if value.get(hints.payload_key).is_some() {
                        structured.push(Candidate::Payload(value));
                    }
                }
            }
        }
    }
    if !structured.is_empty() {
        debug!("located {} structured-data candidate(s)", structured.len());
    }
    structured
}

#[cfg(test)]
mod tests {
    use super::*;

    const HINTS: DatasetHints<'static> = DatasetHints {
        header_keywords: &["ticker", "price", "weight"],
        entity_marker: "Nancy Pelosi",
        data_attr: "data-ticker",
        payload_key: "holdings",
        min_cells: 3,
    };

    #[test]
    fn header_keyword_strategy_wins() {
        let doc = Html::parse_document(
            r#"<table><tr><th>Ticker</th><th>Last Price</th><th>Weight</th></tr>
               <tr><td>NVDA</td><td>$145.89</td><td>19%</td></tr></table>"#,
        );
        let found = locate(&doc, &HINTS);
        assert_eq!(found.len(), 1);
        assert!(matches!(
            found[0],
            Candidate::Table(_, Strategy::HeaderKeywords)
        ));
    }

    #[test]
    fn entity_marker_fallback() {
        let doc = Html::parse_document(
            r#"<table><tr><th>Name</th><th>Date</th><th>Action</th></tr>
               <tr><td>Nancy Pelosi</td><td>1/14/2025</td><td>Purchase</td></tr></table>"#,
        );
        let found = locate(&doc, &HINTS);
        assert_eq!(found.len(), 1);
        assert!(matches!(
            found[0],
            Candidate::Table(_, Strategy::EntityMarker)
        ));
    }

    #[test]
    fn structured_data_fallback() {
        let doc = Html::parse_document(
            r#"<div data-ticker="NVDA" data-price="145.89" data-weight="19"></div>
               <script type="application/json">{"holdings": []}</script>"#,
        );
        let found = locate(&doc, &HINTS);
        assert_eq!(found.len(), 2);
        assert!(matches!(found[0], Candidate::Attributed(_)));
        assert!(matches!(found[1], Candidate::Payload(_)));
    }

    #[test]
    fn no_match_is_empty_not_error() {
        let doc = Html::parse_document("<p>nothing tabular here</p>");
        assert!(locate(&doc, &HINTS).is_empty());
    }

    #[test]
    fn shape_validation_rejects_thin_tables() {
        // Keyword matches but no row reaches the minimum cell count.
        let doc = Html::parse_document(
            r#"<table><tr><th>Ticker</th></tr><tr><td>NVDA</td></tr></table>"#,
        );
        assert!(locate(&doc, &HINTS).is_empty());
    }
}
