use serde::Deserialize;

use crate::fetch::{ApiRequest, FetchPolicy};

/// Tickers linked from the header.
pub const TRACKED_TICKERS: [&str; 3] = ["AAPL", "MSFT", "GOOGL"];

/// One daily bar. The backend sends plain JSON numbers, so volume may
/// arrive as a float.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StockBar {
    #[serde(default)]
    pub ticker: Option<String>,
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl StockBar {
    pub fn open_text(&self) -> String {
        format_price(self.open)
    }

    pub fn high_text(&self) -> String {
        format_price(self.high)
    }

    pub fn low_text(&self) -> String {
        format_price(self.low)
    }

    pub fn close_text(&self) -> String {
        format_price(self.close)
    }

    pub fn volume_text(&self) -> String {
        format_volume(self.volume)
    }
}

pub fn format_price(value: f64) -> String {
    format!("{value:.2}")
}

/// Whole number with `,` thousands separators.
pub fn format_volume(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Upper-cases and trims a ticker taken from the route.
pub fn normalize_ticker(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

/// `GET /api/stockdata/{ticker}`
pub struct StockPolicy;

impl FetchPolicy for StockPolicy {
    type Input = String;
    type Output = Vec<StockBar>;

    fn label(&self) -> &'static str {
        "stockdata"
    }

    fn validate(&self, ticker: &String) -> Result<(), String> {
        let ticker = ticker.trim();
        if ticker.is_empty() {
            return Err("Please select a stock from the menu.".to_string());
        }
        if !ticker
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        {
            return Err(format!("Unknown ticker symbol: {ticker}"));
        }
        Ok(())
    }

    fn build_request(&self, ticker: &String) -> ApiRequest {
        let ticker = normalize_ticker(ticker);
        ApiRequest::get(format!("/api/stockdata/{}", urlencoding::encode(&ticker)))
    }
}
