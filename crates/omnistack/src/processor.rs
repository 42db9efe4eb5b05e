#![allow(deprecated)]

use anyhow::{anyhow, Context, Result};
use async_openai::types::{CreateChatCompletionResponse, FunctionCall};
use serde_json::Value;
use stock_tools::{args::expect_object, ToolRegistry};
use tracing::{error, info};

/// The function call carried by the first choice, if any.
pub fn requested_function_call(response: &CreateChatCompletionResponse) -> Result<Option<&FunctionCall>> {
    let choice = response
        .choices
        .first()
        .ok_or_else(|| anyhow!("chat completion returned no choices"))?;
    Ok(choice.message.function_call.as_ref())
}

/// Run the tool the model asked for.
///
/// `Ok(None)` means "answer in plain text": no call was requested, or the
/// call was unusable (blank name/arguments, invalid JSON, unknown tool).
/// Argument mismatches and tool failures are returned as errors.
pub async fn process_model_response(
    registry: &ToolRegistry,
    response: &CreateChatCompletionResponse,
) -> Result<Option<Value>> {
    let Some(function_call) = requested_function_call(response)? else {
        return Ok(None);
    };

    let tool_name = function_call.name.as_str();
    let raw_arguments = function_call.arguments.as_str();

    if tool_name.trim().is_empty() || raw_arguments.trim().is_empty() {
        error!(
            tool_name,
            arguments = raw_arguments,
            "Invalid tool name or arguments from model"
        );
        return Ok(None);
    }

    let arguments: Value = match serde_json::from_str(raw_arguments) {
        Ok(value) => value,
        Err(err) => {
            error!(tool_name, arguments = raw_arguments, error = %err, "Invalid JSON arguments from model");
            return Ok(None);
        }
    };

    let Some(handler) = registry.handler(tool_name) else {
        error!(tool_name, "Unknown tool called by the model");
        return Ok(None);
    };

    info!(tool_name, arguments = %arguments, "Executing local tool");

    let arguments = expect_object(tool_name, &arguments)?;
    let output = handler
        .invoke(arguments)
        .await
        .with_context(|| format!("tool `{}` failed", tool_name))?;

    info!(tool_name, output = %output, "Local tool completed");

    Ok(Some(output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alphavantage::AlphaVantageClient;
    use serde_json::json;

    fn registry() -> ToolRegistry {
        // never contacted by these cases
        let client = AlphaVantageClient::new("http://127.0.0.1:1/query", "demo", "5min").unwrap();
        ToolRegistry::stock_market(client)
    }

    fn response(message: Value) -> CreateChatCompletionResponse {
        serde_json::from_value(json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "created": 1_700_000_000,
            "model": "brianne_enoch_victoria",
            "choices": [{ "index": 0, "message": message, "finish_reason": "stop" }]
        }))
        .unwrap()
    }

    fn call(name: &str, arguments: &str) -> CreateChatCompletionResponse {
        response(json!({
            "role": "assistant",
            "content": null,
            "function_call": { "name": name, "arguments": arguments }
        }))
    }

    #[tokio::test]
    async fn plain_text_needs_no_tool() {
        let resp = response(json!({ "role": "assistant", "content": "Why did the chicken..." }));
        assert!(process_model_response(&registry(), &resp).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unknown_tool_is_ignored() {
        let resp = call("get_weather", r#"{"city":"Paris"}"#);
        assert!(process_model_response(&registry(), &resp).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn declared_but_unwired_tool_is_unknown() {
        let resp = call("get_order_book", r#"{"ticker":"IBM"}"#);
        assert!(process_model_response(&registry(), &resp).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn malformed_json_is_ignored() {
        let resp = call("get_stock_price", "{ticker:");
        assert!(process_model_response(&registry(), &resp).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn blank_name_or_arguments_are_ignored() {
        for resp in [call("", r#"{"ticker":"IBM"}"#), call("get_stock_price", "")] {
            assert!(process_model_response(&registry(), &resp).await.unwrap().is_none());
        }
    }

    #[tokio::test]
    async fn argument_mismatch_is_an_error() {
        let resp = call("get_stock_price", r#"{"symbol":"IBM"}"#);
        let err = process_model_response(&registry(), &resp).await.unwrap_err();
        assert!(format!("{err:#}").contains("missing required argument `ticker`"));
    }

    #[tokio::test]
    async fn non_object_arguments_are_an_error() {
        let resp = call("get_stock_price", r#""IBM""#);
        assert!(process_model_response(&registry(), &resp).await.is_err());
    }

    #[tokio::test]
    async fn empty_choices_are_an_error() {
        let resp: CreateChatCompletionResponse = serde_json::from_value(json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "created": 1_700_000_000,
            "model": "m",
            "choices": []
        }))
        .unwrap();
        assert!(process_model_response(&registry(), &resp).await.is_err());
    }
}
