use crate::config::ServiceConfig;
use crate::error::NourishError;
use crate::prompts::ChatMessage;
use crate::providers::CompletionProvider;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Client for the toolkit text endpoint: `{"messages"}` in, `{"completion"}` out.
pub struct ToolkitProvider {
    client: Client,
    endpoint: String,
}

impl ToolkitProvider {
    /// Create a provider from service configuration
    pub fn new(config: &ServiceConfig) -> Result<Self, NourishError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(ToolkitProvider {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    /// Create a provider for a custom endpoint with no request timeout
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        ToolkitProvider {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    messages: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct CompletionResponse {
    completion: Option<String>,
}

#[async_trait]
impl CompletionProvider for ToolkitProvider {
    fn provider_name(&self) -> &str {
        "toolkit"
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, NourishError> {
        debug!("Sending {} messages to {}", messages.len(), self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&CompletionRequest { messages })
            .send()
            .await?;

        // Check status code before attempting to parse JSON
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NourishError::StatusError {
                status: status.as_u16(),
                body,
            });
        }

        let body: CompletionResponse = response.json().await?;
        let completion = body.completion.ok_or(NourishError::MissingCompletion)?;
        debug!("Received {} characters of completion", completion.len());

        Ok(completion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::recipe_from_ingredients_prompt;
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn test_complete() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/text/llm/")
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"^\{"messages":\[\{"role":"system""#.to_string()),
                Matcher::Regex(r#""role":"user""#.to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r##"{"completion": "# Rice Bowl\n## Ingredients\n- rice"}"##)
            .create_async()
            .await;

        let provider = ToolkitProvider::with_endpoint(format!("{}/text/llm/", server.url()));
        let messages = recipe_from_ingredients_prompt("rice");

        let completion = provider.complete(&messages).await.unwrap();
        assert!(completion.starts_with("# Rice Bowl"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_complete_status_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/text/llm/")
            .with_status(503)
            .with_body("overloaded")
            .create_async()
            .await;

        let provider = ToolkitProvider::with_endpoint(format!("{}/text/llm/", server.url()));
        let result = provider.complete(&[ChatMessage::user("hi")]).await;

        match result {
            Err(NourishError::StatusError { status, body }) => {
                assert_eq!(status, 503);
                assert_eq!(body, "overloaded");
            }
            other => panic!("expected status error, got {:?}", other),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_complete_missing_completion() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/text/llm/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"result": "wrong field"}"#)
            .create_async()
            .await;

        let provider = ToolkitProvider::with_endpoint(format!("{}/text/llm/", server.url()));
        let result = provider.complete(&[ChatMessage::user("hi")]).await;
        assert!(matches!(result, Err(NourishError::MissingCompletion)));
    }

    #[test]
    fn test_provider_name() {
        let provider = ToolkitProvider::new(&ServiceConfig::default()).unwrap();
        assert_eq!(provider.provider_name(), "toolkit");
    }
}
