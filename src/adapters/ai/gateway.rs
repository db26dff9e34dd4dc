//! Provider gateway - the ordered registry of configured providers.
//!
//! Wraps each provider's distinct request/response shape behind the one
//! AIProvider signature and fixes the invocation order at startup. The
//! gateway performs exactly one call per invocation; retry and fallback
//! belong to the orchestrator. Order never changes at runtime - there is no
//! adaptive routing or circuit breaker.

use std::sync::Arc;

use tracing::info;

use super::{GeminiConfig, GeminiProvider, OpenAIConfig, OpenAIProvider};
use crate::config::{AiConfig, AiProviderKind, ValidationError};
use crate::ports::{AIError, AIProvider, CompletionRequest, CompletionResponse};

/// Ordered registry of generation providers, primary first.
pub struct ProviderGateway {
    providers: Vec<(String, Arc<dyn AIProvider>)>,
}

impl ProviderGateway {
    /// Builds the gateway from configuration.
    ///
    /// Fatal if no provider has credentials; the service cannot start
    /// without at least one.
    pub fn from_config(config: &AiConfig) -> Result<Self, ValidationError> {
        let mut providers: Vec<(String, Arc<dyn AIProvider>)> = Vec::new();

        for kind in config.provider_order() {
            match kind {
                AiProviderKind::Gemini => {
                    let key = config.gemini_api_key.clone().unwrap_or_default();
                    let provider = GeminiProvider::new(
                        GeminiConfig::new(key)
                            .with_model(&config.gemini_model)
                            .with_timeout(config.timeout()),
                    );
                    providers.push(("gemini".to_string(), Arc::new(provider)));
                }
                AiProviderKind::OpenAI => {
                    let key = config.openai_api_key.clone().unwrap_or_default();
                    let provider = OpenAIProvider::new(
                        OpenAIConfig::new(key)
                            .with_model(&config.openai_model)
                            .with_timeout(config.timeout()),
                    );
                    providers.push(("openai".to_string(), Arc::new(provider)));
                }
            }
        }

        if providers.is_empty() {
            return Err(ValidationError::NoAiProviderConfigured);
        }

        let order: Vec<&str> = providers.iter().map(|(name, _)| name.as_str()).collect();
        info!(providers = ?order, "provider gateway configured");

        Ok(Self { providers })
    }

    /// Builds a gateway from pre-constructed providers (tests, wiring).
    pub fn from_providers(providers: Vec<(String, Arc<dyn AIProvider>)>) -> Result<Self, ValidationError> {
        if providers.is_empty() {
            return Err(ValidationError::NoAiProviderConfigured);
        }
        Ok(Self { providers })
    }

    /// Providers in fixed priority order.
    pub fn providers(&self) -> impl Iterator<Item = (&str, &Arc<dyn AIProvider>)> {
        self.providers
            .iter()
            .map(|(name, provider)| (name.as_str(), provider))
    }

    /// Number of configured providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether the gateway has no providers. Construction forbids this.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Invokes one named provider, once.
    ///
    /// Unknown names map to `AIError::NotConfigured`; every other failure
    /// comes back as the provider's own classified error.
    pub async fn invoke(
        &self,
        provider_name: &str,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, AIError> {
        let provider = self
            .providers
            .iter()
            .find(|(name, _)| name == provider_name)
            .map(|(_, provider)| provider)
            .ok_or(AIError::NotConfigured)?;

        provider.complete(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::ports::MessageRole;

    fn request() -> CompletionRequest {
        CompletionRequest::new().with_message(MessageRole::User, "hi")
    }

    #[test]
    fn from_config_requires_a_provider() {
        let config = AiConfig::default();
        assert!(matches!(
            ProviderGateway::from_config(&config),
            Err(ValidationError::NoAiProviderConfigured)
        ));
    }

    #[test]
    fn from_config_orders_primary_first() {
        let config = AiConfig {
            gemini_api_key: Some("g".to_string()),
            openai_api_key: Some("o".to_string()),
            primary_provider: AiProviderKind::OpenAI,
            ..Default::default()
        };
        let gateway = ProviderGateway::from_config(&config).unwrap();
        let names: Vec<&str> = gateway.providers().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["openai", "gemini"]);
    }

    #[tokio::test]
    async fn invoke_calls_exactly_one_provider() {
        let first = MockAIProvider::new().with_response("from first");
        let second = MockAIProvider::new().with_response("from second");
        let gateway = ProviderGateway::from_providers(vec![
            ("first".to_string(), Arc::new(first.clone())),
            ("second".to_string(), Arc::new(second.clone())),
        ])
        .unwrap();

        let response = gateway.invoke("second", request()).await.unwrap();
        assert_eq!(response.content, "from second");
        assert_eq!(first.call_count(), 0);
        assert_eq!(second.call_count(), 1);
    }

    #[tokio::test]
    async fn invoke_unknown_provider_is_not_configured() {
        let gateway = ProviderGateway::from_providers(vec![(
            "only".to_string(),
            Arc::new(MockAIProvider::new()),
        )])
        .unwrap();

        let err = gateway.invoke("missing", request()).await.unwrap_err();
        assert!(matches!(err, AIError::NotConfigured));
    }

    #[tokio::test]
    async fn invoke_does_not_retry_or_fall_back() {
        let failing = MockAIProvider::always_failing(MockError::Timeout { timeout_secs: 30 });
        let healthy = MockAIProvider::new().with_response("healthy");
        let gateway = ProviderGateway::from_providers(vec![
            ("failing".to_string(), Arc::new(failing.clone())),
            ("healthy".to_string(), Arc::new(healthy.clone())),
        ])
        .unwrap();

        let err = gateway.invoke("failing", request()).await.unwrap_err();
        assert!(matches!(err, AIError::Timeout { .. }));
        assert_eq!(failing.call_count(), 1);
        assert_eq!(healthy.call_count(), 0);
    }
}
