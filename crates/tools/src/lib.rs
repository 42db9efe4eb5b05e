pub mod args;
pub mod error;
pub mod registry;
pub mod schema;
pub mod stock;

pub use error::ToolError;
pub use registry::{ToolHandler, ToolRegistry};
pub use schema::{ToolSchema, GET_ORDER_BOOK, GET_STOCK_PRICE, TOOL_SCHEMAS};
pub use stock::{get_stock_price, StockPriceArgs, StockPriceTool};
