use std::collections::HashMap;
use std::sync::Arc;

use alphavantage::AlphaVantageClient;
use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::ToolError;
use crate::schema::{ToolSchema, TOOL_SCHEMAS};
use crate::stock::StockPriceTool;

#[async_trait]
pub trait ToolHandler: Send + Sync {
    fn name(&self) -> &'static str;

    async fn invoke(&self, arguments: &Map<String, Value>) -> Result<Value, ToolError>;
}

/// Schemas advertised to the model plus the executors wired to some of them.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    schemas: Vec<ToolSchema>,
    handlers: HashMap<&'static str, Arc<dyn ToolHandler>>,
}

impl ToolRegistry {
    pub fn new(schemas: Vec<ToolSchema>) -> Self {
        Self {
            schemas,
            handlers: HashMap::new(),
        }
    }

    /// Both stock tools advertised, only `get_stock_price` executable.
    pub fn stock_market(client: AlphaVantageClient) -> Self {
        let mut registry = Self::new(TOOL_SCHEMAS.to_vec());
        registry.register(StockPriceTool::new(client));
        registry
    }

    pub fn register<H>(&mut self, handler: H) -> &mut Self
    where
        H: ToolHandler + 'static,
    {
        self.handlers.insert(handler.name(), Arc::new(handler));
        self
    }

    pub fn schemas(&self) -> &[ToolSchema] {
        &self.schemas
    }

    pub fn handler(&self, name: &str) -> Option<Arc<dyn ToolHandler>> {
        self.handlers.get(name).cloned()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut handlers: Vec<&str> = self.handlers.keys().copied().collect();
        handlers.sort_unstable();
        f.debug_struct("ToolRegistry")
            .field("schemas", &self.schemas.iter().map(|s| s.name).collect::<Vec<_>>())
            .field("handlers", &handlers)
            .finish()
    }
}
