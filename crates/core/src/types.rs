use serde::{Deserialize, Serialize};

/// Result record produced by the stock price tool.
///
/// `price` is either the quoted opening price as reported upstream or a
/// human-readable "not available" message naming the ticker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockQuote {
    pub ticker: String,
    pub price: String,
}

impl StockQuote {
    pub fn new(ticker: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            price: price.into(),
        }
    }

    pub fn unavailable(ticker: impl Into<String>) -> Self {
        let ticker = ticker.into();
        let price = format!("Price not available for {} company.", ticker);
        Self { ticker, price }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_mentions_ticker() {
        let quote = StockQuote::unavailable("TSLA");
        assert_eq!(quote.ticker, "TSLA");
        assert_eq!(quote.price, "Price not available for TSLA company.");
    }

    #[test]
    fn serializes_as_flat_record() {
        let value = serde_json::to_value(StockQuote::new("IBM", "187.2300")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "ticker": "IBM", "price": "187.2300" })
        );
    }
}
