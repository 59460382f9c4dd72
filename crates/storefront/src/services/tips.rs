//! AI growth-tips assistant.
//!
//! A thin client for the Anthropic Messages API. Strictly non-critical: no
//! API key means a static "unavailable" message, any request or parse
//! failure means a static "try again later" message, and nothing here can
//! block or corrupt order or cart state. Responses are cached per
//! `(platform, goal)` to keep repeat questions off the API.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use boostline_core::catalog::Platform;

use crate::config::TipsConfig;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 300;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const CACHE_CAPACITY: u64 = 256;
const CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// Shown when no API key is configured.
const FALLBACK_UNAVAILABLE: &str = "AI features are currently unavailable. Please contact support.";
/// Shown when the API call or parse fails.
const FALLBACK_ERROR: &str = "Our AI assistant is currently taking a break. Please try again later.";
/// Shown when the API answers with no text.
const FALLBACK_EMPTY: &str = "Could not generate tips at this time.";

/// Tips assistant.
#[derive(Clone)]
pub struct TipsService {
    inner: Arc<TipsInner>,
}

struct TipsInner {
    client: Option<TipsClient>,
    cache: Cache<String, String>,
}

struct TipsClient {
    http: reqwest::Client,
    model: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

impl TipsService {
    /// Create the assistant. A missing API key disables it entirely.
    #[must_use]
    pub fn new(config: &TipsConfig) -> Self {
        let client = config.api_key.as_ref().and_then(|key| {
            let mut headers = HeaderMap::new();
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            headers.insert(
                "anthropic-version",
                HeaderValue::from_static(ANTHROPIC_VERSION),
            );
            let api_key = HeaderValue::from_str(key.expose_secret()).ok()?;
            headers.insert("x-api-key", api_key);

            let http = reqwest::Client::builder()
                .default_headers(headers)
                .timeout(REQUEST_TIMEOUT)
                .build()
                .ok()?;
            Some(TipsClient {
                http,
                model: config.model.clone(),
            })
        });

        Self {
            inner: Arc::new(TipsInner {
                client,
                cache: Cache::builder()
                    .max_capacity(CACHE_CAPACITY)
                    .time_to_live(CACHE_TTL)
                    .build(),
            }),
        }
    }

    /// Three short growth tips for `(platform, goal)`.
    ///
    /// Never errors - every failure path degrades to a static message.
    #[instrument(skip(self))]
    pub async fn tips(&self, platform: Platform, goal: &str) -> String {
        let Some(client) = &self.inner.client else {
            return FALLBACK_UNAVAILABLE.to_string();
        };

        let cache_key = format!("{}|{}", platform.id(), goal);
        if let Some(cached) = self.inner.cache.get(&cache_key).await {
            return cached;
        }

        match client.generate(platform, goal).await {
            Ok(text) => {
                self.inner.cache.insert(cache_key, text.clone()).await;
                text
            }
            Err(e) => {
                tracing::warn!(error = %e, "tips generation failed");
                FALLBACK_ERROR.to_string()
            }
        }
    }
}

impl TipsClient {
    async fn generate(&self, platform: Platform, goal: &str) -> Result<String, reqwest::Error> {
        let prompt = format!(
            "You are a social media expert for the Boostline boosting service. \
             The user wants to grow on {} and their main goal is: {goal:?}. \
             Provide 3 short, punchy, and actionable tips to help them achieve \
             this organically alongside their boosted stats. Keep it under 100 \
             words total. Format as a bulleted list.",
            platform.display_name(),
        );

        let request = json!({
            "model": self.model,
            "max_tokens": MAX_TOKENS,
            "messages": [{ "role": "user", "content": prompt }],
        });

        let response = self
            .http
            .post(ANTHROPIC_API_URL)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let body: MessagesResponse = response.json().await?;
        let text: String = body
            .content
            .iter()
            .filter(|block| block.kind == "text")
            .map(|block| block.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        Ok(if text.is_empty() {
            FALLBACK_EMPTY.to_string()
        } else {
            text
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_no_api_key_degrades_to_static_message() {
        let service = TipsService::new(&TipsConfig {
            api_key: None,
            model: "claude-haiku-4-5".to_string(),
        });
        let text = service.tips(Platform::Tiktok, "more likes").await;
        assert_eq!(text, FALLBACK_UNAVAILABLE);
    }

    #[test]
    fn test_response_parse_collects_text_blocks() {
        let body: MessagesResponse = serde_json::from_str(
            r#"{"content":[{"type":"text","text":"- tip one"},{"type":"text","text":"- tip two"}]}"#,
        )
        .expect("parse");
        let text: Vec<&str> = body
            .content
            .iter()
            .filter(|b| b.kind == "text")
            .map(|b| b.text.as_str())
            .collect();
        assert_eq!(text, vec!["- tip one", "- tip two"]);
    }

    #[test]
    fn test_service_is_cheap_to_clone() {
        fn assert_clone<T: Clone + Send + Sync>() {}
        assert_clone::<TipsService>();
    }
}
