use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::{Error, Result};
use loft_config::LlmProviderConfig;

/// Sends one chat-completion request in JSON mode and returns the assistant text verbatim.
///
/// Transport and HTTP status failures surface as [`Error::Reqwest`]. A body that is not JSON, or
/// an envelope without assistant text, is [`Error::InvalidResponse`]; whether that text is usable
/// JSON is left to the caller.
pub async fn complete(
	cfg: &LlmProviderConfig,
	system_prompt: &str,
	user_payload: &str,
) -> Result<String> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"model": cfg.model,
		"temperature": cfg.temperature,
		"response_format": { "type": "json_object" },
		"messages": [
			{ "role": "system", "content": system_prompt },
			{ "role": "user", "content": user_payload },
		],
	});

	tracing::debug!(provider_id = %cfg.provider_id, model = %cfg.model, "Sending reasoning request.");

	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let body = res.error_for_status()?.text().await?;

	parse_completion_body(&body)
}

/// Assistant text from a raw completion body. A body that is not JSON is a malformed response,
/// like an envelope without content.
fn parse_completion_body(body: &str) -> Result<String> {
	let json: Value = serde_json::from_str(body).map_err(|err| Error::InvalidResponse {
		message: format!("Reasoning response body is not JSON: {err}."),
	})?;

	parse_completion_text(&json)
}

fn parse_completion_text(json: &Value) -> Result<String> {
	let content = json
		.get("choices")
		.and_then(|v| v.as_array())
		.and_then(|arr| arr.first())
		.and_then(|choice| choice.get("message"))
		.and_then(|msg| msg.get("content"));

	match content {
		Some(Value::String(text)) => Ok(text.clone()),
		// Some gateways return content as a list of typed parts.
		Some(Value::Array(parts)) => {
			let text: String = parts
				.iter()
				.filter_map(|part| part.get("text").and_then(|t| t.as_str()))
				.collect();

			if text.is_empty() {
				return Err(Error::InvalidResponse {
					message: "Reasoning response content has no text parts.".to_string(),
				});
			}

			Ok(text)
		},
		_ => Err(Error::InvalidResponse {
			message: "Reasoning response is missing message content.".to_string(),
		}),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn reads_first_choice_content() {
		let json = serde_json::json!({
			"choices": [
				{ "message": { "role": "assistant", "content": "{\"ranked\": []}" } },
				{ "message": { "role": "assistant", "content": "ignored" } }
			]
		});
		let text = parse_completion_text(&json).expect("parse failed");

		assert_eq!(text, "{\"ranked\": []}");
	}

	#[test]
	fn joins_text_parts() {
		let json = serde_json::json!({
			"choices": [
				{ "message": { "content": [
					{ "type": "text", "text": "{\"ranked\":" },
					{ "type": "text", "text": " []}" }
				] } }
			]
		});
		let text = parse_completion_text(&json).expect("parse failed");

		assert_eq!(text, "{\"ranked\": []}");
	}

	#[test]
	fn non_json_body_is_malformed() {
		for body in ["<html>Bad gateway</html>", "", "{\"choices\": "] {
			let err = parse_completion_body(body).expect_err("expected malformed response");

			assert!(err.is_malformed_response(), "body {body:?}");
		}
	}

	#[test]
	fn json_body_reads_content() {
		let body = r#"{"choices":[{"message":{"content":"{\"ranked\":[]}"}}]}"#;

		assert_eq!(parse_completion_body(body).expect("parse failed"), "{\"ranked\":[]}");
	}

	#[test]
	fn missing_content_is_malformed() {
		let json = serde_json::json!({ "choices": [] });
		let err = parse_completion_text(&json).expect_err("expected malformed response");

		assert!(err.is_malformed_response());
	}
}
