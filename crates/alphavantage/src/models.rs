use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One `TIME_SERIES_INTRADAY` bar.
///
/// Alpha Vantage reports every figure as a string; anything else is kept as
/// its JSON text so one odd field never hides the rest of the bar.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct IntradayBar {
    #[serde(rename = "1. open")]
    pub open: Option<String>,
    #[serde(rename = "2. high")]
    pub high: Option<String>,
    #[serde(rename = "3. low")]
    pub low: Option<String>,
    #[serde(rename = "4. close")]
    pub close: Option<String>,
    #[serde(rename = "5. volume")]
    pub volume: Option<String>,
}

impl IntradayBar {
    /// A bar that is not a JSON object decodes with every field absent.
    pub fn from_value(value: &Value) -> Self {
        let field = |name: &str| match value.get(name) {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) => Some(text.clone()),
            Some(other) => Some(other.to_string()),
        };

        Self {
            open: field("1. open"),
            high: field("2. high"),
            low: field("3. low"),
            close: field("4. close"),
            volume: field("5. volume"),
        }
    }
}

/// Raw body of a `TIME_SERIES_INTRADAY` call.
///
/// The series section is named after the requested interval, so everything
/// that is not a known advisory field is kept by name in `sections`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct IntradayResponse {
    #[serde(rename = "Meta Data", default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    #[serde(rename = "Information", default, skip_serializing_if = "Option::is_none")]
    pub information: Option<String>,
    #[serde(rename = "Note", default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(rename = "Error Message", default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(flatten)]
    pub sections: BTreeMap<String, Value>,
}

impl IntradayResponse {
    /// First advisory message the API attached to an otherwise successful reply.
    pub fn advisory(&self) -> Option<&str> {
        self.error_message
            .as_deref()
            .or(self.note.as_deref())
            .or(self.information.as_deref())
    }

    /// The `"Time Series ({interval})"` section, `None` when absent, empty or not an object.
    pub fn time_series(&self, interval: &str) -> Option<IntradaySeries> {
        let bars: BTreeMap<String, Value> = self
            .sections
            .get(&series_key(interval))?
            .as_object()?
            .iter()
            .map(|(timestamp, bar)| (timestamp.clone(), bar.clone()))
            .collect();

        if bars.is_empty() {
            return None;
        }

        Some(IntradaySeries { bars })
    }
}

/// Raw bars keyed by timestamp. Keys are `YYYY-MM-DD HH:MM:SS`, so string order
/// is time order. Bars are decoded only when read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntradaySeries {
    pub bars: BTreeMap<String, Value>,
}

impl IntradaySeries {
    pub fn latest(&self) -> Option<(&str, IntradayBar)> {
        self.bars
            .iter()
            .next_back()
            .map(|(timestamp, bar)| (timestamp.as_str(), IntradayBar::from_value(bar)))
    }

    /// Most recent bars first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = (&str, IntradayBar)> {
        self.bars
            .iter()
            .rev()
            .take(limit)
            .map(|(timestamp, bar)| (timestamp.as_str(), IntradayBar::from_value(bar)))
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }
}

pub fn series_key(interval: &str) -> String {
    format!("Time Series ({})", interval)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(body: Value) -> IntradayResponse {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn latest_is_lexicographically_greatest_key() {
        let body = response(json!({
            "Time Series (5min)": {
                "09:30": { "1. open": "1.0" },
                "09:35": { "1. open": "2.0" },
                "09:25": { "1. open": "3.0" }
            }
        }));

        let series = body.time_series("5min").unwrap();
        let (timestamp, bar) = series.latest().unwrap();
        assert_eq!(timestamp, "09:35");
        assert_eq!(bar.open.as_deref(), Some("2.0"));
    }

    #[test]
    fn odd_older_bar_does_not_spoil_latest() {
        let body = response(json!({
            "Time Series (5min)": {
                "09:25": { "1. open": 99.0 },
                "09:30": "garbage",
                "09:35": { "1. open": "101.5" }
            }
        }));

        let series = body.time_series("5min").unwrap();
        assert_eq!(series.latest().unwrap().1.open.as_deref(), Some("101.5"));
    }

    #[test]
    fn non_string_fields_keep_their_json_text() {
        let bar = IntradayBar::from_value(&json!({ "1. open": 99.0, "5. volume": 1200, "4. close": null }));
        assert_eq!(bar.open.as_deref(), Some("99.0"));
        assert_eq!(bar.volume.as_deref(), Some("1200"));
        assert_eq!(bar.close, None);
        assert_eq!(IntradayBar::from_value(&json!("garbage")), IntradayBar::default());
    }

    #[test]
    fn missing_section_yields_none() {
        let body = response(json!({
            "Information": "The **demo** API key is for demo purposes only."
        }));
        assert!(body.time_series("5min").is_none());
        assert_eq!(
            body.advisory(),
            Some("The **demo** API key is for demo purposes only.")
        );
    }

    #[test]
    fn empty_or_non_object_section_yields_none() {
        assert!(response(json!({ "Time Series (5min)": {} })).time_series("5min").is_none());
        assert!(response(json!({ "Time Series (5min)": [] })).time_series("5min").is_none());
    }

    #[test]
    fn section_name_follows_interval() {
        let body = response(json!({
            "Meta Data": { "2. Symbol": "IBM" },
            "Time Series (1min)": {
                "2024-01-02 16:00:00": { "1. open": "163.5000", "4. close": "163.5500" }
            }
        }));

        assert!(body.time_series("5min").is_none());
        let series = body.time_series("1min").unwrap();
        assert_eq!(series.len(), 1);
        assert!(body.meta.is_some());
    }

    #[test]
    fn bar_without_open_decodes() {
        let body = response(json!({
            "Time Series (5min)": { "10:00": { "4. close": "9.9" } }
        }));
        let series = body.time_series("5min").unwrap();
        assert_eq!(series.latest().unwrap().1.open, None);
    }

    #[test]
    fn recent_walks_newest_first() {
        let body = response(json!({
            "Time Series (5min)": {
                "a": {}, "c": {}, "b": {}
            }
        }));
        let series = body.time_series("5min").unwrap();
        let keys: Vec<&str> = series.recent(2).map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["c", "b"]);
    }
}
