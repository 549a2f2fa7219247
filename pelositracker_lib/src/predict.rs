//! Rule-based guesses at likely next trades, derived from observed
//! patterns in the disclosed history. Entertainment output, labelled
//! as such in the payload.

use serde::Serialize;

use pelositracker_scrape::Holding;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub ticker: String,
    pub company_name: String,
    pub confidence: u8,
    pub reasoning: String,
    pub sector: String,
    pub last_traded: String,
    pub pattern: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternAnalysis {
    pub tech_allocation: u8,
    pub avg_trade_frequency_days: u8,
    pub prefers_call_options: bool,
    pub typical_trade_size: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionReport {
    pub predictions: Vec<Prediction>,
    pub analysis: PatternAnalysis,
    pub disclaimer: String,
}

const DISCLAIMER: &str = "ENTERTAINMENT ONLY: Predictions based on historical trading patterns. \
     Not financial advice. Not based on insider information.";

fn prediction(
    ticker: &str,
    company_name: &str,
    confidence: u8,
    reasoning: &str,
    pattern: &str,
) -> Prediction {
    Prediction {
        ticker: ticker.to_string(),
        company_name: company_name.to_string(),
        confidence,
        reasoning: reasoning.to_string(),
        sector: "Technology".to_string(),
        last_traded: "Never traded".to_string(),
        pattern: pattern.to_string(),
    }
}

/// Applies the pattern rules against the current holdings and returns
/// the three highest-confidence candidates.
pub fn predictions(holdings: &[Holding]) -> PredictionReport {
    let held = |ticker: &str| holdings.iter().any(|h| h.ticker == ticker);

    let mut candidates = Vec::new();

    // Doubling down on winning sectors: AI silicon next to NVDA.
    if held("NVDA") {
        candidates.push(prediction(
            "AMD",
            "Advanced Micro Devices",
            85,
            "AI chip competitor to NVDA (19% of her portfolio). She bought NVDA 8 times in 2 \
             years. AMD benefits from same AI boom with lower entry price. Pattern: She doubles \
             down on winning sectors.",
            "Sector preference match",
        ));
    }

    // Completing the mega-cap set.
    if held("GOOGL") && held("MSFT") {
        candidates.push(prediction(
            "META",
            "Meta Platforms",
            78,
            "Owns GOOGL (17%) & MSFT (4%) but missing META from Big Tech trio. She favors \
             mega-cap tech with AI exposure. META's AI investments + ad revenue = her typical \
             play. Pattern: Completes sector sets.",
            "Big Tech completion",
        ));
    }

    // Cybersecurity clustering.
    if held("PANW") && held("CRWD") {
        candidates.push(prediction(
            "ZS",
            "Zscaler",
            72,
            "Owns PANW (8%) & CRWD (6%) - both cybersecurity. She clusters positions in hot \
             sectors. ZS is #3 in cloud security. Pattern: She bought PANW & CRWD within months \
             of each other, suggesting sector conviction.",
            "Sector clustering",
        ));
    }

    candidates.push(prediction(
        "ORCL",
        "Oracle Corporation",
        68,
        "Cloud infrastructure - aligns with tech-heavy portfolio",
        "Cloud computing trend",
    ));

    if held("NVDA") {
        candidates.push(prediction(
            "PLTR",
            "Palantir Technologies",
            65,
            "AI/Data analytics - complements NVDA AI infrastructure bet",
            "AI ecosystem play",
        ));
    }

    candidates.sort_by(|a, b| b.confidence.cmp(&a.confidence));
    candidates.truncate(3);

    PredictionReport {
        predictions: candidates,
        analysis: PatternAnalysis {
            tech_allocation: 85,
            avg_trade_frequency_days: 55,
            prefers_call_options: true,
            typical_trade_size: "$1M - $5M".to_string(),
        },
        disclaimer: DISCLAIMER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::ReferenceData;

    #[test]
    fn full_portfolio_yields_top_three_by_confidence() {
        let data = ReferenceData::load();
        let report = predictions(data.holdings());
        let tickers: Vec<&str> = report
            .predictions
            .iter()
            .map(|p| p.ticker.as_str())
            .collect();
        assert_eq!(tickers, vec!["AMD", "META", "ZS"]);
        assert!(report
            .predictions
            .windows(2)
            .all(|w| w[0].confidence >= w[1].confidence));
        assert!(report.disclaimer.starts_with("ENTERTAINMENT ONLY"));
    }

    #[test]
    fn empty_portfolio_still_predicts_the_unconditional_rule() {
        let report = predictions(&[]);
        assert_eq!(report.predictions.len(), 1);
        assert_eq!(report.predictions[0].ticker, "ORCL");
    }
}
