use anyhow::{Context, Result, anyhow};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::providers::http_errors::completion_api_request_error;

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    n: u32,
    stop: Option<Vec<String>>,
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    text: String,
}

fn completions_url(base_url: &str) -> String {
    format!("{}/v1/completions", base_url.trim_end_matches('/'))
}

pub async fn complete(client: &Client, cfg: &Config, prompt: &str) -> Result<String> {
    let api_url = completions_url(&cfg.api_base_url);
    let body = CompletionRequest {
        model: &cfg.engine,
        prompt,
        max_tokens: cfg.max_tokens,
        n: 1,
        stop: None,
        temperature: cfg.temperature,
        top_p: cfg.top_p,
    };
    debug!(
        api_url = %api_url,
        engine = %cfg.engine,
        prompt_len = prompt.len(),
        "sending completion request"
    );

    let mut request = client.post(&api_url).json(&body);
    if let Some(key) = &cfg.api_key {
        request = request.bearer_auth(key);
    }

    let response = request.send().await.map_err(|err| {
        warn!(
            api_url = %api_url,
            engine = %cfg.engine,
            error = %err,
            "completion request failed"
        );
        completion_api_request_error(err, &api_url)
    })?;

    if !response.status().is_success() {
        let status = response.status();
        let response_body = response
            .text()
            .await
            .unwrap_or_else(|_| "<failed to read response body>".to_string());
        warn!(
            api_url = %api_url,
            engine = %cfg.engine,
            status = %status,
            response_body_len = response_body.len(),
            "completion endpoint returned non-success status"
        );
        return Err(anyhow!(
            "Completion request failed with status {}: {}",
            status,
            response_body
        ));
    }

    let parsed: CompletionResponse = response
        .json()
        .await
        .context("Failed to parse completion response")?;
    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("Completion response contained no choices"))?;
    debug!(
        engine = %cfg.engine,
        response_len = choice.text.len(),
        "received completion response"
    );
    Ok(choice.text)
}
