//! Portfolio-versus-index comparison over the monthly value series.

use serde::Serialize;

use crate::fixture::MonthlyValue;

/// Both monthly series plus the headline returns over the whole
/// window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexComparison {
    pub pelosi_data: Vec<MonthlyValue>,
    pub sp500_data: Vec<MonthlyValue>,
    pub pelosi_return: f64,
    pub sp500_return: f64,
    pub outperformance: f64,
    pub period: String,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// First-to-last percentage change of a series.
fn series_return(series: &[MonthlyValue]) -> Option<f64> {
    let first = series.first()?;
    let last = series.last()?;
    if first.value == 0.0 {
        return None;
    }
    Some((last.value - first.value) / first.value * 100.0)
}

/// Computes the comparison between the tracked portfolio and the
/// S&P 500 series. `None` when either series is empty or starts at
/// zero.
pub fn index_comparison(
    portfolio: &[MonthlyValue],
    sp500: &[MonthlyValue],
) -> Option<IndexComparison> {
    let pelosi_return = round2(series_return(portfolio)?);
    let sp500_return = round2(series_return(sp500)?);
    let period = format!(
        "{} - {}",
        portfolio.first().map(|m| m.date.as_str()).unwrap_or(""),
        portfolio.last().map(|m| m.date.as_str()).unwrap_or("")
    );
    Some(IndexComparison {
        pelosi_data: portfolio.to_vec(),
        sp500_data: sp500.to_vec(),
        pelosi_return,
        sp500_return,
        outperformance: round2(pelosi_return - sp500_return),
        period,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::ReferenceData;

    #[test]
    fn reference_series_returns() {
        let data = ReferenceData::load();
        let cmp = index_comparison(data.historical(), data.sp500()).unwrap();
        // 95M -> 168M and 95M -> 141.98M.
        assert_eq!(cmp.pelosi_return, 76.84);
        assert_eq!(cmp.sp500_return, 49.45);
        assert_eq!(cmp.outperformance, 27.39);
        assert_eq!(cmp.period, "2022-05 - 2025-01");
        assert_eq!(cmp.pelosi_data.len(), 33);
    }

    #[test]
    fn empty_series_is_none() {
        let data = ReferenceData::load();
        assert!(index_comparison(&[], data.sp500()).is_none());
        assert!(index_comparison(data.historical(), &[]).is_none());
    }

    #[test]
    fn zero_start_is_none() {
        let flat = vec![
            MonthlyValue {
                date: "2024-01".to_string(),
                value: 0.0,
            },
            MonthlyValue {
                date: "2024-02".to_string(),
                value: 10.0,
            },
        ];
        assert!(index_comparison(&flat, &flat).is_none());
    }
}
