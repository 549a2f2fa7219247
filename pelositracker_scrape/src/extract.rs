//! Entity extractors: rendered document to typed records.
//!
//! Each extractor locates its dataset via [`crate::locate`], maps rows
//! or text fragments into records, and silently skips anything
//! malformed. A malformed row never aborts a batch and a missing
//! dataset is an empty result, not an error. Extractors log what they
//! found and what they rejected so a zero-result run can be diagnosed
//! from the trace output alone.

use std::collections::HashSet;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::config::EntityMatcher;
use crate::locate::{self, Candidate, DatasetHints};
use crate::model::{
    FilingStats, Holding, Instrument, PortfolioPerformance, PortfolioStats, PricePoint,
    SectorAllocation, SimilarStock, Trade, TradeAction,
};
use crate::parse;

const HOLDINGS_KEYWORDS: &[&str] = &["ticker", "price", "weight", "holding", "last price"];
const TRADE_TABLE_KEYWORDS: &[&str] = &["politician", "traded", "filed"];
const RECENT_TRADES_LIMIT: usize = 20;

fn sel(css: &'static str) -> Option<Selector> {
    Selector::parse(css).ok()
}

fn truncate(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Full visible text of the document, used by the regex-driven
/// label scanners.
pub fn visible_text(doc: &Html) -> String {
    match sel("body") {
        Some(body) => match doc.select(&body).next() {
            Some(el) => el.text().collect(),
            None => doc.root_element().text().collect(),
        },
        None => String::new(),
    }
}

/// Extracts the holdings list. Rows need at least three cells and a
/// first cell passing the ticker pattern; anything else is dropped.
pub fn holdings(doc: &Html, entity: &EntityMatcher) -> Vec<Holding> {
    let hints = DatasetHints {
        header_keywords: HOLDINGS_KEYWORDS,
        entity_marker: &entity.full_name,
        data_attr: "data-ticker",
        payload_key: "holdings",
        min_cells: 3,
    };

    let mut out = Vec::new();
    for candidate in locate::locate(doc, &hints) {
        match candidate {
            Candidate::Table(table, strategy) => {
                let rows = locate::table_rows(table);
                debug!("holdings table via {strategy:?} with {} row(s)", rows.len());
                for row in rows.into_iter().skip(1) {
                    let cells = locate::row_cells(row);
                    if cells.len() < 3 {
                        continue;
                    }
                    if let Some(holding) = holding_from_cells(&cells) {
                        out.push(holding);
                    }
                }
            }
            Candidate::Attributed(el) => {
                if let Some(holding) = holding_from_attributes(el) {
                    out.push(holding);
                }
            }
            Candidate::Payload(value) => {
                if let Some(parsed) = value
                    .get("holdings")
                    .and_then(|h| serde_json::from_value::<Vec<Holding>>(h.clone()).ok())
                {
                    out.extend(parsed);
                }
            }
        }
        if !out.is_empty() {
            break;
        }
    }
    debug!("extracted {} holding(s)", out.len());
    out
}

fn holding_from_cells(cells: &[String]) -> Option<Holding> {
    let ticker = cells[0].trim();
    if !parse::is_ticker(ticker) {
        return None;
    }
    let price_text = cells[1].trim();
    let weight_text = cells[2].trim();
    let last_price = parse::currency(price_text);
    let weight = parse::percentage(weight_text);
    Some(Holding {
        ticker: ticker.to_string(),
        last_price,
        price_display: if price_text.is_empty() {
            format!("${last_price:.2}")
        } else {
            price_text.to_string()
        },
        weight,
        weight_display: if weight_text.is_empty() {
            format!("{weight:.1}%")
        } else {
            weight_text.to_string()
        },
    })
}

fn holding_from_attributes(el: ElementRef<'_>) -> Option<Holding> {
    let ticker = el.value().attr("data-ticker")?.trim().to_string();
    if !parse::is_ticker(&ticker) {
        return None;
    }
    let last_price = parse::currency(el.value().attr("data-price").unwrap_or("0"));
    let weight = parse::percentage(el.value().attr("data-weight").unwrap_or("0"));
    Some(Holding {
        ticker,
        last_price,
        price_display: format!("${last_price:.2}"),
        weight,
        weight_display: format!("{weight:.1}%"),
    })
}

/// Extracts the portfolio page's recent-trade list from anchors
/// linking to stock detail pages. Deduplicates by ticker with the
/// first occurrence winning, preserving document order as a proxy for
/// recency. Missing dates and amounts become explicit "not available"
/// markers, never omitted fields.
pub fn recent_trades(doc: &Html) -> Vec<Trade> {
    let Some(anchor_sel) = sel("a") else {
        return Vec::new();
    };
    let Ok(ticker_re) = Regex::new(r"/stock/([a-z]+)") else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut trades = Vec::new();
    for link in doc.select(&anchor_sel) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        let href = href.to_lowercase();
        let Some(caps) = ticker_re.captures(&href) else {
            continue;
        };
        let ticker = caps[1].to_uppercase();
        if !parse::is_ticker(&ticker) || !seen.insert(ticker.clone()) {
            continue;
        }

        // Trade context usually lives on the row around the anchor.
        let context = link
            .parent()
            .and_then(ElementRef::wrap)
            .map(locate::element_text)
            .unwrap_or_else(|| locate::element_text(link));

        trades.push(Trade {
            ticker,
            action: TradeAction::from_text(&context),
            traded_date: parse::find_loose_date(&context),
            filed_date: None,
            amount_range: parse::amount_range(&context).unwrap_or_else(|| "N/A".to_string()),
            instrument: Instrument::from_text(&context),
            description: truncate(&context, 100),
        });
        if trades.len() == RECENT_TRADES_LIMIT {
            break;
        }
    }
    debug!("extracted {} recent trade(s) from stock links", trades.len());
    trades
}

/// Extracts the tracked person's trades from a stock detail page.
///
/// The shared table lists several politicians; rows for other people
/// are silently excluded and only counted for diagnostics. Zero
/// matches is a valid empty result, logged with the rejected names so
/// a filter mismatch can be diagnosed.
pub fn stock_trades(doc: &Html, ticker: &str, entity: &EntityMatcher) -> Vec<Trade> {
    let hints = DatasetHints {
        header_keywords: TRADE_TABLE_KEYWORDS,
        entity_marker: &entity.full_name,
        data_attr: "",
        payload_key: "",
        min_cells: 6,
    };

    let mut trades = Vec::new();
    let mut rejected: Vec<String> = Vec::new();
    for candidate in locate::locate(doc, &hints) {
        let Candidate::Table(table, strategy) = candidate else {
            continue;
        };
        let rows = locate::table_rows(table);
        debug!(
            "detail trade table via {strategy:?} with {} row(s) for {ticker}",
            rows.len()
        );
        for row in rows.into_iter().skip(1) {
            let cells = locate::row_cells(row);
            if cells.len() < 6 {
                continue;
            }
            let politician = cells[0].trim();
            if !entity.matches(politician) {
                if !politician.is_empty() {
                    rejected.push(politician.to_string());
                }
                continue;
            }
            trades.push(Trade {
                ticker: ticker.to_uppercase(),
                action: TradeAction::from_text(&cells[3]),
                traded_date: parse::loose_date(&cells[1]).or_else(|| parse::find_loose_date(&cells[1])),
                filed_date: parse::loose_date(&cells[2]).or_else(|| parse::find_loose_date(&cells[2])),
                amount_range: if cells[5].trim().is_empty() {
                    "N/A".to_string()
                } else {
                    cells[5].trim().to_string()
                },
                instrument: Instrument::from_text(&cells[4]),
                description: cells.get(6).map(|c| c.trim().to_string()).unwrap_or_default(),
            });
        }
        if !trades.is_empty() {
            break;
        }
    }

    if trades.is_empty() && !rejected.is_empty() {
        warn!(
            "no rows matched '{}' for {ticker}; rejected: {}",
            entity.full_name,
            rejected.join(", ")
        );
    } else {
        debug!(
            "extracted {} trade(s) for {ticker}, rejected {} other-entity row(s)",
            trades.len(),
            rejected.len()
        );
    }
    trades
}

/// Scans short text nodes for "Name NN%" sector slices. Duplicate
/// names keep their first percentage.
pub fn sectors(doc: &Html) -> Vec<SectorAllocation> {
    let Some(node_sel) = sel("div, li, span") else {
        return Vec::new();
    };
    let Ok(re) = Regex::new(r"^([A-Za-z][A-Za-z\s]*?)\s*(\d+\.?\d*)%$") else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for node in doc.select(&node_sel) {
        let text = locate::element_text(node);
        if text.len() > 60 || !text.contains('%') {
            continue;
        }
        let Some(caps) = re.captures(&text) else {
            continue;
        };
        let name = caps[1].trim().to_string();
        let Ok(percentage) = caps[2].parse::<f64>() else {
            continue;
        };
        if name.is_empty() || !seen.insert(name.to_lowercase()) {
            continue;
        }
        out.push(SectorAllocation { name, percentage });
    }
    out
}

fn labeled_int(text: &str, pattern: &str) -> Option<i64> {
    let re = Regex::new(pattern).ok()?;
    re.captures(text)?.get(1)?.as_str().replace(',', "").parse().ok()
}

/// Scans the page text for filing-cadence labels. Each is
/// independently optional; a page with none yields an all-`None`
/// result, which is valid.
pub fn filing_stats(text: &str) -> FilingStats {
    FilingStats {
        avg_reporting_time: labeled_int(text, r"(?i)Avg\.?\s*Reporting Time[:\s]*(\d+)\s*days?"),
        avg_filing_frequency: labeled_int(text, r"(?i)Avg\.?\s*Filing Frequency[:\s]*(\d+)\s*days?"),
        time_since_last_filing: labeled_int(
            text,
            r"(?i)Time Since Last Filing[:\s]*(\d+)\s*days?",
        ),
    }
}

/// Scans the page text for the headline return percentage and total
/// value. Both optional.
pub fn performance(text: &str) -> PortfolioPerformance {
    let mut perf = PortfolioPerformance::default();

    let perf_patterns = [
        r"([+-]?\d+\.?\d*)%\s*performance",
        r"(?i)performance\s*([+-]?\d+\.?\d*)%",
        r"\+(\d+\.?\d*)%",
        r"↑\s*(\d+\.?\d*)%",
    ];
    for pattern in perf_patterns {
        let Ok(re) = Regex::new(pattern) else {
            continue;
        };
        if let Some(value) = re
            .captures(text)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok())
        {
            perf.performance_percent = Some(value);
            break;
        }
    }

    let value_patterns = [
        r"(?i)Total Value[:\s]*((?:US)?\$[\d,]+\.?\d*\s*[MK]?)",
        r"(?i)Total Invested[:\s]*((?:US)?\$[\d,]+\.?\d*\s*[MK]?)",
        r"((?:US)?\$[\d,]+\.?\d*\s*[MK])",
    ];
    for pattern in value_patterns {
        let Ok(re) = Regex::new(pattern) else {
            continue;
        };
        if let Some(value) = re
            .captures(text)
            .and_then(|c| c.get(1))
            .and_then(|m| parse::compact_dollars(m.as_str()))
        {
            perf.total_invested = Some(value);
            break;
        }
    }
    perf
}

/// Scans the page text for the holdings and copiers counters.
pub fn portfolio_stats(text: &str) -> PortfolioStats {
    PortfolioStats {
        holdings_count: labeled_int(text, r"(?i)(\d+)\s+holdings?"),
        copiers: labeled_int(text, r"(?i)([\d,]+)\s+copiers?"),
    }
}

/// Pulls `{date, value}` chart points embedded in script payloads.
/// Most renders carry none; an empty result is expected and valid.
pub fn historical_performance(doc: &Html) -> Vec<PricePoint> {
    script_points(doc, "value")
}

/// Pulls `{date, price}` history points for the detail-page chart.
pub fn price_history(doc: &Html) -> Vec<PricePoint> {
    script_points(doc, "price")
}

fn script_points(doc: &Html, value_key: &str) -> Vec<PricePoint> {
    let Some(script_sel) = sel("script") else {
        return Vec::new();
    };
    let Ok(re) = Regex::new(&format!(
        r#"\{{[^{{}}]*"date"[^{{}}]*"{value_key}"[^{{}}]*\}}"#
    )) else {
        return Vec::new();
    };

    let mut out = Vec::new();
    for script in doc.select(&script_sel) {
        let raw: String = script.text().collect();
        let lower = raw.to_lowercase();
        if !lower.contains("chart") && !lower.contains(value_key) {
            continue;
        }
        for m in re.find_iter(&raw) {
            let Ok(value) = serde_json::from_str::<serde_json::Value>(m.as_str()) else {
                continue;
            };
            let (Some(date), Some(price)) = (
                value.get("date").and_then(|d| d.as_str()),
                value.get(value_key).and_then(|p| p.as_f64()),
            ) else {
                continue;
            };
            out.push(PricePoint {
                date: date.to_string(),
                price,
            });
        }
    }
    out
}

/// Company name from the first heading that mentions the ticker, with
/// any parenthesised ticker stripped.
pub fn company_name(doc: &Html, ticker: &str) -> String {
    let upper = ticker.to_uppercase();
    if let Some(h1_sel) = sel("h1") {
        let strip = Regex::new(r"\s*\([A-Z]{1,5}\)\s*").ok();
        for heading in doc.select(&h1_sel) {
            let text = locate::element_text(heading);
            if !text.to_uppercase().contains(&upper) {
                continue;
            }
            let name = match &strip {
                Some(re) => re.replace_all(&text, " ").trim().to_string(),
                None => text,
            };
            if !name.is_empty() {
                return name;
            }
        }
    }
    format!("{upper} Corporation")
}

pub fn exchange(text: &str) -> String {
    match Regex::new(r"(?i)\b(Nasdaq|NYSE|AMEX)\b")
        .ok()
        .and_then(|re| re.captures(text).map(|c| c[1].to_string()))
    {
        Some(name) => name,
        None => "N/A".to_string(),
    }
}

/// Current price: a labelled figure first, then the first dollar
/// figure in a plausible stock-price range. `0.0` means unknown.
pub fn current_price(text: &str) -> f64 {
    if let Ok(re) = Regex::new(r"(?i)Current Price[^$]{0,40}\$([\d,]+\.?\d*)") {
        if let Some(price) = re
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| parse::currency(m.as_str()))
        {
            if plausible_price(price) {
                return price;
            }
        }
    }
    if let Ok(re) = Regex::new(r"\$([\d,]+\.?\d*)") {
        for caps in re.captures_iter(text) {
            let price = parse::currency(&caps[1]);
            if plausible_price(price) {
                return price;
            }
        }
    }
    0.0
}

// Stock prices on this site sit between $1 and $10,000; anything
// outside is a date, a volume, or a portfolio total.
fn plausible_price(price: f64) -> bool {
    price > 1.0 && price < 10_000.0
}

pub fn price_change(text: &str) -> f64 {
    Regex::new(r"(?i)24h Change[:\s]*([+-]?[\d,]+\.?\d*)")
        .ok()
        .and_then(|re| re.captures(text).map(|c| parse::currency(&c[1])))
        .unwrap_or(0.0)
}

pub fn price_change_percent(text: &str) -> f64 {
    Regex::new(r"\(([+-]?[\d,]+\.?\d*)%\)")
        .ok()
        .and_then(|re| re.captures(text).map(|c| c[1].replace(',', "").parse().ok()))
        .flatten()
        .unwrap_or(0.0)
}

/// 52-week low/high pair; either side is `0.0` when absent.
pub fn week_range(text: &str) -> (f64, f64) {
    let low = Regex::new(r"(?i)52 Week Range[:\s]*\$?([\d,]+\.?\d*)")
        .ok()
        .and_then(|re| re.captures(text).map(|c| parse::currency(&c[1])))
        .unwrap_or(0.0);
    let high = Regex::new(r"(?i)52 Week Range[:\s]*\$?[\d,]+\.?\d*\s*[—–-]\s*\$?([\d,]+\.?\d*)")
        .ok()
        .and_then(|re| re.captures(text).map(|c| parse::currency(&c[1])))
        .unwrap_or(0.0);
    (low, high)
}

pub fn status_line(text: &str) -> String {
    Regex::new(r"(?i)up\s+([\d,]+\.?\d*)\s*\(([+-]?[\d,]+\.?\d*)%\)")
        .ok()
        .and_then(|re| {
            re.captures(text)
                .map(|c| format!("Currently up {} ({}%)", &c[1], &c[2]))
        })
        .unwrap_or_default()
}

/// First long paragraph that plausibly describes the company.
pub fn description(doc: &Html, ticker: &str) -> String {
    let upper = ticker.to_uppercase();
    if let Some(para_sel) = sel("p, div") {
        for node in doc.select(&para_sel) {
            let text = locate::element_text(node);
            if text.len() <= 50 {
                continue;
            }
            let lower = text.to_lowercase();
            if text.to_uppercase().contains(&upper)
                || lower.contains("corporation")
                || lower.contains("inc")
            {
                return truncate(&text, 500);
            }
        }
    }
    format!("Information about {upper}")
}

/// Related-stock suggestions from a "similar"/"recommended" section.
pub fn similar_stocks(doc: &Html) -> Vec<SimilarStock> {
    let Some(section_sel) = sel(r#"[class*="similar"], [class*="recommend"]"#) else {
        return Vec::new();
    };
    let Some(item_sel) = sel(r#"[class*="stock"], [class*="ticker"], a"#) else {
        return Vec::new();
    };
    let Ok(ticker_re) = Regex::new(r"\b([A-Z]{1,5})\b") else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for section in doc.select(&section_sel) {
        for item in section.select(&item_sel) {
            let text = locate::element_text(item);
            let Some(ticker) = ticker_re.captures(&text).map(|c| c[1].to_string()) else {
                continue;
            };
            if !seen.insert(ticker.clone()) {
                continue;
            }
            out.push(SimilarStock {
                ticker,
                name: text.lines().next().unwrap_or("").trim().to_string(),
                price: 0.0,
                change: 0.0,
                change_percent: 0.0,
                reason: "Based on congressional trading patterns".to_string(),
            });
            if out.len() == 5 {
                return out;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filing_stats_each_label_optional() {
        let text = "Avg. Reporting Time: 23 days and Time Since Last Filing: 38 days";
        let stats = filing_stats(text);
        assert_eq!(stats.avg_reporting_time, Some(23));
        assert_eq!(stats.avg_filing_frequency, None);
        assert_eq!(stats.time_since_last_filing, Some(38));
    }

    #[test]
    fn performance_scan() {
        let perf = performance("Portfolio up +38% performance, Total Value US$168M");
        assert_eq!(perf.performance_percent, Some(38.0));
        assert_eq!(perf.total_invested, Some(168_000_000.0));
    }

    #[test]
    fn performance_absent_is_none() {
        let perf = performance("nothing numeric here");
        assert_eq!(perf.performance_percent, None);
        assert_eq!(perf.total_invested, None);
    }

    #[test]
    fn stats_counters() {
        let stats = portfolio_stats("11 holdings tracked by 15,234 copiers");
        assert_eq!(stats.holdings_count, Some(11));
        assert_eq!(stats.copiers, Some(15234));
    }

    #[test]
    fn week_range_pair() {
        let (low, high) = week_range("52 Week Range: $108.13 — $152.89");
        assert_eq!(low, 108.13);
        assert_eq!(high, 152.89);
    }

    #[test]
    fn current_price_skips_implausible() {
        // 2024 reads as a year, not a price; 145.89 is the first
        // figure inside the plausible band.
        assert_eq!(current_price("as of $11,250,000 total, $145.89 last"), 145.89);
        assert_eq!(current_price("no dollars"), 0.0);
    }

    #[test]
    fn exchange_scan() {
        assert_eq!(exchange("listed on Nasdaq since 1999"), "Nasdaq");
        assert_eq!(exchange("unlisted"), "N/A");
    }

    #[test]
    fn status_scan() {
        assert_eq!(
            status_line("NVDA is up 2.45 (1.65%) today"),
            "Currently up 2.45 (1.65%)"
        );
        assert_eq!(status_line("flat day"), "");
    }

    #[test]
    fn sectors_dedupe_and_shape() {
        let doc = Html::parse_document(
            r#"<ul><li>Technology 85%</li><li>Communication Services 10%</li>
               <li>Technology 85%</li><li>not a sector</li></ul>"#,
        );
        let found = sectors(&doc);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].name, "Technology");
        assert_eq!(found[0].percentage, 85.0);
    }

    #[test]
    fn price_history_from_script_payload() {
        let doc = Html::parse_document(
            r#"<script>var chart = [{"date":"2025-01-01","price":145.89},
               {"date":"2025-01-02","price":147.10}];</script>"#,
        );
        let points = price_history(&doc);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date, "2025-01-01");
        assert_eq!(points[1].price, 147.10);
    }
}
