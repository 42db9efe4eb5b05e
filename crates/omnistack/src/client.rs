// The legacy `functions` / `function_call` request fields are deprecated in
// async-openai in favour of tools, but they are what this API speaks.
#![allow(deprecated)]

use anyhow::{Context, Result};
use assistant_core::config::{AppConfig, OmniStackConfig};
use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionFunctionCall, ChatCompletionFunctions, ChatCompletionFunctionsArgs,
        ChatCompletionRequestMessage, CreateChatCompletionRequestArgs,
        CreateChatCompletionResponse,
    },
    Client as OpenAIClient,
};
use std::time::Instant;
use stock_tools::ToolSchema;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone)]
pub struct OmniStackClient {
    client: OpenAIClient<OpenAIConfig>,
    config: OmniStackConfig,
}

impl OmniStackClient {
    pub fn from_app_config(config: &AppConfig) -> Result<Self> {
        Self::new(config.omnistack.clone())
    }

    pub fn new(config: OmniStackConfig) -> Result<Self> {
        let api_key = match config.require_api_key() {
            Ok(key) => key.to_string(),
            Err(err) => {
                warn!(endpoint = %config.endpoint, "{err}; chat requests will be sent unauthenticated");
                String::new()
            }
        };

        let openai_config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(config.endpoint.trim_end_matches('/').to_string());

        Ok(Self {
            client: OpenAIClient::with_config(openai_config),
            config,
        })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// One chat-completion call with every schema attached and `function_call: "auto"`.
    #[instrument(
        skip(self, messages, functions),
        fields(model = %self.config.model, message_count = messages.len())
    )]
    pub async fn complete(
        &self,
        messages: Vec<ChatCompletionRequestMessage>,
        functions: &[ToolSchema],
    ) -> Result<CreateChatCompletionResponse> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(self.config.model.clone())
            .messages(messages)
            .functions(build_functions(functions)?)
            .function_call(ChatCompletionFunctionCall::Auto)
            .build()
            .context("failed to build chat completion request")?;

        let start_time = Instant::now();
        let response = self
            .client
            .chat()
            .create(request)
            .await
            .context("OmniStack chat completion request failed")?;

        info!(
            elapsed_secs = start_time.elapsed().as_secs_f64(),
            choices = response.choices.len(),
            "Received OmniStack chat completion"
        );

        Ok(response)
    }
}

fn build_functions(schemas: &[ToolSchema]) -> Result<Vec<ChatCompletionFunctions>> {
    schemas
        .iter()
        .map(|schema| {
            ChatCompletionFunctionsArgs::default()
                .name(schema.name.to_string())
                .description(schema.description.to_string())
                .parameters(schema.parameters.clone())
                .build()
                .context("failed to build function schema")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stock_tools::TOOL_SCHEMAS;

    #[test]
    fn functions_mirror_tool_schemas() {
        let functions = build_functions(&TOOL_SCHEMAS).unwrap();
        let value = serde_json::to_value(&functions).unwrap();

        assert_eq!(value[0]["name"], "get_stock_price");
        assert_eq!(value[1]["name"], "get_order_book");
        assert_eq!(value[0]["parameters"]["required"][0], "ticker");
    }

    #[test]
    fn missing_api_key_still_builds_client() {
        let client = OmniStackClient::new(OmniStackConfig {
            api_key: None,
            endpoint: "http://localhost:9000/v1/".to_string(),
            model: "gpt-test".to_string(),
            system_prompt: "sys".to_string(),
        })
        .unwrap();

        assert_eq!(client.model(), "gpt-test");
        assert!(client.config.require_api_key().is_err());
    }
}
