use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::{json, Value};

pub const GET_STOCK_PRICE: &str = "get_stock_price";
pub const GET_ORDER_BOOK: &str = "get_order_book";

/// Declarative contract advertised to the model for one callable function.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ToolSchema {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Value,
}

/// Every function the model may ask for. Only some of them have a local executor.
pub static TOOL_SCHEMAS: Lazy<Vec<ToolSchema>> = Lazy::new(|| {
    vec![
        ToolSchema {
            name: GET_STOCK_PRICE,
            description: "Fetch the current stock price of a specific publicly traded company.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "ticker": {
                        "type": "string",
                        "description": "The stock ticker symbol (e.g., IBM, TSLA) for a publicly traded company, to fetch current price."
                    }
                },
                "required": ["ticker"]
            }),
        },
        ToolSchema {
            name: GET_ORDER_BOOK,
            description: "Fetch the order book data for a specific trading pair or stock ticker.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "ticker": {
                        "type": "string",
                        "description": "The stock ticker symbol (e.g., IBM, TSLA) to fetch order book."
                    }
                },
                "required": ["ticker"]
            }),
        },
    ]
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declares_two_tools_requiring_ticker() {
        let names: Vec<&str> = TOOL_SCHEMAS.iter().map(|s| s.name).collect();
        assert_eq!(names, vec![GET_STOCK_PRICE, GET_ORDER_BOOK]);

        for schema in TOOL_SCHEMAS.iter() {
            assert_eq!(schema.parameters["type"], "object");
            assert_eq!(schema.parameters["required"], json!(["ticker"]));
            assert_eq!(schema.parameters["properties"]["ticker"]["type"], "string");
        }
    }
}
