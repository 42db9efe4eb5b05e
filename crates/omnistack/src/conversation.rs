#![allow(deprecated)]

use alphavantage::AlphaVantageClient;
use anyhow::{anyhow, Context, Result};
use assistant_core::config::AppConfig;
use async_openai::types::{CreateChatCompletionResponse, FunctionCall};
use serde_json::Value;
use stock_tools::ToolRegistry;
use tracing::{info, instrument, warn};

use crate::client::OmniStackClient;
use crate::messages::{follow_up_messages, opening_messages};
use crate::processor::{process_model_response, requested_function_call};

/// Shown when the model answered with nothing.
const EMPTY_ANSWER: &str = "N/A";

/// How a round trip ended.
#[derive(Debug, Clone)]
pub enum ConversationOutcome {
    /// The model answered directly; no second call was made.
    Answered { content: Option<String> },
    /// A tool ran and the model was asked again with its result.
    ToolAssisted {
        function_call: FunctionCall,
        result: Value,
        answer: Option<String>,
    },
}

impl ConversationOutcome {
    /// Console lines for this outcome.
    pub fn report(&self) -> Vec<String> {
        match self {
            Self::Answered { content } => vec![
                "No function call needed".to_string(),
                format!("Response: {}", display_answer(content.as_deref())),
            ],
            Self::ToolAssisted {
                function_call,
                answer,
                ..
            } => vec![
                format!(
                    "Initial Function Call Request: {}({})",
                    function_call.name, function_call.arguments
                ),
                format!("Final response: {}", display_answer(answer.as_deref())),
            ],
        }
    }
}

/// One user request, up to two model calls. Owns everything it needs for the run.
#[derive(Debug, Clone)]
pub struct Conversation {
    client: OmniStackClient,
    registry: ToolRegistry,
    system_prompt: String,
}

impl Conversation {
    pub fn new(client: OmniStackClient, registry: ToolRegistry, system_prompt: impl Into<String>) -> Self {
        Self {
            client,
            registry,
            system_prompt: system_prompt.into(),
        }
    }

    pub fn from_app_config(config: &AppConfig) -> Result<Self> {
        let client = OmniStackClient::from_app_config(config)?;
        let market = AlphaVantageClient::from_config(&config.market_data)
            .context("failed to build Alpha Vantage client")?;

        Ok(Self::new(
            client,
            ToolRegistry::stock_market(market),
            config.omnistack.system_prompt.clone(),
        ))
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    #[instrument(skip(self, user_input), fields(model = %self.client.model()))]
    pub async fn run(&self, user_input: &str) -> Result<ConversationOutcome> {
        let schemas = self.registry.schemas();

        let messages = opening_messages(&self.system_prompt, user_input)?;
        let response = self.client.complete(messages, schemas).await?;

        let Some(result) = process_model_response(&self.registry, &response).await? else {
            let content = first_content(&response)?;
            if content.is_none() {
                warn!("model replied without a function call and without text");
            }
            return Ok(ConversationOutcome::Answered { content });
        };

        // process_model_response only yields a result when a call was present
        let function_call = requested_function_call(&response)?
            .cloned()
            .ok_or_else(|| anyhow!("tool result produced without a function call"))?;

        info!(
            tool_name = %function_call.name,
            "Sending tool result back to the model"
        );

        let messages = follow_up_messages(&self.system_prompt, user_input, &function_call, &result)?;
        let follow_up = self.client.complete(messages, schemas).await?;
        let answer = first_content(&follow_up)?;

        if answer.is_none() {
            warn!(tool_name = %function_call.name, "follow-up reply carried no text");
        }

        Ok(ConversationOutcome::ToolAssisted {
            function_call,
            result,
            answer,
        })
    }
}

/// Text of the first choice; blank text counts as absent.
fn first_content(response: &CreateChatCompletionResponse) -> Result<Option<String>> {
    let choice = response
        .choices
        .first()
        .ok_or_else(|| anyhow!("chat completion returned no choices"))?;

    Ok(choice
        .message
        .content
        .clone()
        .filter(|content| !content.trim().is_empty()))
}

fn display_answer(answer: Option<&str>) -> &str {
    answer.unwrap_or(EMPTY_ANSWER)
}
