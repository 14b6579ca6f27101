//! Shared fixtures for report tests.

use callcheck_core::data::PriceSnapshot;
use callcheck_core::PredictionConfig;

use crate::export::ReportBundle;

pub fn sample_config() -> PredictionConfig {
    PredictionConfig::from_json(
        r#"{
            "disclaimer": "Not investment advice.",
            "tickers": [
                {"symbol": "SPY", "name": "S&P 500 ETF"},
                {"symbol": "QQQ", "name": "Nasdaq 100 ETF"},
                {"symbol": "IWM", "name": "Russell 2000 ETF"}
            ],
            "events": [
                {"date": "2025-08-08", "title": "First call", "label": "Aug 8", "url": "https://example.com/1"},
                {"date": "2025-09-02", "title": "Second call", "label": "Sep 2", "url": "https://example.com/2"}
            ]
        }"#,
    )
    .unwrap()
}

pub fn sample_snapshot() -> PriceSnapshot {
    PriceSnapshot::from_json(
        r#"{
            "generated_utc": "2025-08-16 01:00:00Z",
            "series": {
                "SPY": {"2025-08-08": 100.0, "2025-08-15": 90.0},
                "QQQ": {"2025-08-08": 400.0, "2025-08-15": 440.0}
            }
        }"#,
    )
    .unwrap()
}

pub fn sample_bundle() -> ReportBundle {
    ReportBundle::build(&sample_config(), &sample_snapshot()).unwrap()
}
