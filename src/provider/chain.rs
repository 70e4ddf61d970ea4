//! Fallback chain across providers

use std::collections::HashMap;

use tracing::debug;

use crate::error::ParseError;
use crate::model::UserAgent;
use crate::provider::traits::Provider;
use crate::provider::types::DetectionCapabilities;

/// Tries providers strictly in configured order and returns the first
/// successful result.
///
/// Only [`ParseError::NoResult`] advances the chain; any other failure
/// (transport, credentials, quota) propagates immediately and the remaining
/// providers are never consulted. An empty or exhausted chain fails with
/// `NoResult`.
///
/// `Chain` implements [`Provider`] itself, so chains can be nested inside
/// other chains.
pub struct Chain {
    providers: Vec<Box<dyn Provider>>,
}

impl Chain {
    pub fn new(providers: Vec<Box<dyn Provider>>) -> Self {
        Chain { providers }
    }

    pub fn providers(&self) -> &[Box<dyn Provider>] {
        &self.providers
    }
}

#[async_trait::async_trait]
impl Provider for Chain {
    fn name(&self) -> &'static str {
        "Chain"
    }

    fn homepage(&self) -> &'static str {
        "https://github.com/ua-chain/ua-chain"
    }

    fn capabilities(&self) -> DetectionCapabilities {
        // depends on the configured providers, so nothing is promised
        DetectionCapabilities::default()
    }

    async fn parse(
        &self,
        user_agent: &str,
        headers: &HashMap<String, String>,
    ) -> Result<UserAgent, ParseError> {
        for provider in &self.providers {
            match provider.parse(user_agent, headers).await {
                Ok(result) => {
                    debug!("provider {} produced a result", provider.name());
                    return Ok(result);
                }
                Err(err) if err.is_no_result() => {
                    debug!("provider {} had no result, trying next", provider.name());
                }
                Err(err) => return Err(err),
            }
        }

        Err(ParseError::NoResult(user_agent.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::traits::MockProvider;

    fn no_result_provider(name: &'static str) -> MockProvider {
        let mut provider = MockProvider::new();
        provider.expect_name().return_const(name);
        provider
            .expect_parse()
            .times(1)
            .returning(|ua, _| Err(ParseError::NoResult(ua.to_string())));
        provider
    }

    fn success_provider(name: &'static str) -> MockProvider {
        let mut provider = MockProvider::new();
        provider.expect_name().return_const(name);
        provider.expect_parse().times(1).returning(move |_, _| {
            let mut result = UserAgent::new(name, None);
            result.browser_mut().set_name(Some("Firefox"));
            Ok(result)
        });
        provider
    }

    fn untouched_provider() -> MockProvider {
        let mut provider = MockProvider::new();
        provider.expect_parse().times(0);
        provider
    }

    #[tokio::test]
    async fn empty_chain_fails_with_no_result() {
        let chain = Chain::new(vec![]);

        let err = chain.parse("some ua", &HashMap::new()).await.unwrap_err();
        assert!(err.is_no_result());
    }

    #[tokio::test]
    async fn falls_back_until_a_provider_succeeds() {
        let chain = Chain::new(vec![
            Box::new(no_result_provider("First")),
            Box::new(success_provider("Second")),
        ]);

        let result = chain.parse("some ua", &HashMap::new()).await.unwrap();

        assert_eq!(result.provider_name(), Some("Second"));
        assert_eq!(result.browser().name(), Some("Firefox"));
    }

    #[tokio::test]
    async fn stops_at_the_first_success() {
        let chain = Chain::new(vec![
            Box::new(success_provider("First")),
            Box::new(untouched_provider()),
        ]);

        let result = chain.parse("some ua", &HashMap::new()).await.unwrap();
        assert_eq!(result.provider_name(), Some("First"));
    }

    #[tokio::test]
    async fn all_providers_without_result_means_no_result() {
        let chain = Chain::new(vec![
            Box::new(no_result_provider("First")),
            Box::new(no_result_provider("Second")),
        ]);

        let err = chain.parse("some ua", &HashMap::new()).await.unwrap_err();
        assert!(err.is_no_result());
    }

    #[tokio::test]
    async fn other_failures_propagate_and_stop_the_chain() {
        let mut failing = MockProvider::new();
        failing.expect_name().return_const("Failing");
        failing
            .expect_parse()
            .times(1)
            .returning(|_, _| Err(ParseError::InvalidCredentials { provider: "Failing" }));

        let chain = Chain::new(vec![
            Box::new(failing),
            Box::new(untouched_provider()),
        ]);

        let err = chain.parse("some ua", &HashMap::new()).await.unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidCredentials { provider: "Failing" }
        ));
    }
}
