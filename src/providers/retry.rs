use crate::config::ServiceConfig;
use crate::error::NourishError;
use crate::prompts::ChatMessage;
use crate::providers::{CompletionProvider, ToolkitProvider};
use async_trait::async_trait;
use log::{debug, info, warn};
use std::time::Duration;
use tokio::time::sleep;

/// Retries a provider with a growing delay between attempts.
pub struct RetryingProvider {
    inner: Box<dyn CompletionProvider>,
    retry_attempts: u32,
    retry_delay_ms: u64,
}

impl RetryingProvider {
    pub fn new(inner: Box<dyn CompletionProvider>, retry_attempts: u32, retry_delay_ms: u64) -> Self {
        RetryingProvider {
            inner,
            retry_attempts: retry_attempts.max(1),
            retry_delay_ms,
        }
    }

    /// Wrap a `ToolkitProvider` built from the same configuration
    pub fn from_config(config: &ServiceConfig) -> Result<Self, NourishError> {
        let inner = ToolkitProvider::new(config)?;
        Ok(Self::new(
            Box::new(inner),
            config.retry_attempts,
            config.retry_delay_ms,
        ))
    }
}

#[async_trait]
impl CompletionProvider for RetryingProvider {
    fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, NourishError> {
        let mut attempt = 1;

        loop {
            debug!(
                "Requesting completion from {} (attempt {}/{})",
                self.inner.provider_name(),
                attempt,
                self.retry_attempts
            );

            match self.inner.complete(messages).await {
                Ok(completion) => {
                    info!("Received completion from {}", self.inner.provider_name());
                    return Ok(completion);
                }
                Err(e) if attempt < self.retry_attempts => {
                    warn!(
                        "Provider {} failed (attempt {}/{}): {}",
                        self.inner.provider_name(),
                        attempt,
                        self.retry_attempts,
                        e
                    );
                }
                Err(e) => {
                    warn!(
                        "Provider {} failed after {} attempts: {}",
                        self.inner.provider_name(),
                        self.retry_attempts,
                        e
                    );
                    return Err(e);
                }
            }

            // Backoff grows with each attempt
            let delay =
                Duration::from_millis(self.retry_delay_ms.saturating_mul(attempt as u64));
            debug!("Waiting {:?} before retry", delay);
            sleep(delay).await;
            attempt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    /// Fails until `succeed_on` calls have been made.
    struct Flaky {
        calls: Arc<AtomicU32>,
        succeed_on: u32,
    }

    #[async_trait]
    impl CompletionProvider for Flaky {
        fn provider_name(&self) -> &str {
            "flaky"
        }

        async fn complete(&self, _messages: &[ChatMessage]) -> Result<String, NourishError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call >= self.succeed_on {
                Ok("## Findings\nAll clear.".to_string())
            } else {
                Err(NourishError::MissingCompletion)
            }
        }
    }

    fn flaky(succeed_on: u32) -> (Box<dyn CompletionProvider>, Arc<AtomicU32>) {
        let calls = Arc::new(AtomicU32::new(0));
        let provider = Flaky {
            calls: calls.clone(),
            succeed_on,
        };
        (Box::new(provider), calls)
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_until_success() {
        let (inner, calls) = flaky(3);
        let provider = RetryingProvider::new(inner, 3, 100);

        let completion = provider.complete(&[]).await.unwrap();
        assert!(completion.contains("All clear"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_last_attempt() {
        let (inner, calls) = flaky(10);
        let provider = RetryingProvider::new(inner, 2, 100);

        let result = provider.complete(&[]).await;
        assert!(matches!(result, Err(NourishError::MissingCompletion)));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_zero_attempts_still_tries_once() {
        let (inner, calls) = flaky(1);
        let provider = RetryingProvider::new(inner, 0, 0);

        assert!(provider.complete(&[]).await.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(provider.provider_name(), "flaky");
    }

    #[tokio::test(start_paused = true)]
    async fn test_huge_delay_saturates() {
        let (inner, calls) = flaky(3);
        let provider = RetryingProvider::new(inner, 3, u64::MAX);

        assert!(provider.complete(&[]).await.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_from_config() {
        let provider = RetryingProvider::from_config(&ServiceConfig::default()).unwrap();
        assert_eq!(provider.provider_name(), "toolkit");
        assert_eq!(provider.retry_attempts, 3);
    }
}
