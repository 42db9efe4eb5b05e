#![allow(deprecated)]

use anyhow::{Context, Result};
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestFunctionMessageArgs,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, FunctionCall,
};
use serde_json::Value;

/// System and user turns of a round trip.
pub fn opening_messages(
    system_prompt: &str,
    user_input: &str,
) -> Result<Vec<ChatCompletionRequestMessage>> {
    let system_message = ChatCompletionRequestSystemMessageArgs::default()
        .content(system_prompt)
        .build()
        .context("failed to build system message")?;

    let user_message = ChatCompletionRequestUserMessageArgs::default()
        .content(user_input)
        .build()
        .context("failed to build user message")?;

    Ok(vec![system_message.into(), user_message.into()])
}

/// Fresh message list for the second call: the opening turns, the assistant's
/// function call and the function's JSON-encoded result.
pub fn follow_up_messages(
    system_prompt: &str,
    user_input: &str,
    function_call: &FunctionCall,
    result: &Value,
) -> Result<Vec<ChatCompletionRequestMessage>> {
    let mut messages = opening_messages(system_prompt, user_input)?;

    // Sent as an empty string rather than omitted; strict backends reject a
    // missing assistant content.
    let assistant_message = ChatCompletionRequestAssistantMessageArgs::default()
        .content("")
        .function_call(function_call.clone())
        .build()
        .context("failed to build assistant message")?;

    let function_message = ChatCompletionRequestFunctionMessageArgs::default()
        .name(function_call.name.clone())
        .content(serde_json::to_string(result).context("failed to encode tool result")?)
        .build()
        .context("failed to build function message")?;

    messages.push(ChatCompletionRequestMessage::Assistant(assistant_message));
    messages.push(ChatCompletionRequestMessage::Function(function_message));
    Ok(messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn follow_up_replays_opening_turns() {
        let call = FunctionCall {
            name: "get_stock_price".to_string(),
            arguments: r#"{"ticker":"IBM"}"#.to_string(),
        };
        let result = json!({ "ticker": "IBM", "price": "163.5000" });

        let messages = follow_up_messages("sys", "hello", &call, &result).unwrap();
        let value = serde_json::to_value(&messages).unwrap();

        let roles: Vec<&str> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["role"].as_str().unwrap())
            .collect();
        assert_eq!(roles, vec!["system", "user", "assistant", "function"]);

        assert_eq!(value[0]["content"], "sys");
        assert_eq!(value[1]["content"], "hello");
        assert_eq!(value[2]["content"], "");
        assert_eq!(value[2]["function_call"]["name"], "get_stock_price");
        assert_eq!(value[2]["function_call"]["arguments"], r#"{"ticker":"IBM"}"#);
        assert_eq!(value[3]["name"], "get_stock_price");

        let content: Value = serde_json::from_str(value[3]["content"].as_str().unwrap()).unwrap();
        assert_eq!(content, result);
    }
}
