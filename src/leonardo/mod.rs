pub mod generation_client;
pub mod traits;
pub mod transport;
pub mod upscale_client;

use crate::{
    config::LeonardoConfig,
    error::Result,
    models::{GenerationRequest, ModelVariant, ServiceResponse, UpscaleRequest},
};
use async_trait::async_trait;

pub use generation_client::GenerationClient;
pub use traits::GenerationApi;
pub use transport::ApiTransport;
pub use upscale_client::UpscaleClient;

#[derive(Clone)]
pub struct LeonardoClient {
    generation_client: GenerationClient,
    upscale_client: UpscaleClient,
}

impl LeonardoClient {
    /// Resolves the credential once; it is held read-only for the life of the client.
    pub fn new(config: LeonardoConfig) -> Result<Self> {
        let credential = config.resolve_credential()?;
        let http = config.http_client.clone().unwrap_or_default();
        let transport = ApiTransport::new(http, config.base_url(), credential)?;

        log::debug!(
            "Leonardo client ready for {} (validation {})",
            transport.base_url(),
            if config.validate_requests { "on" } else { "off" }
        );

        Ok(Self {
            generation_client: GenerationClient::new(
                transport.clone(),
                config.validate_requests,
            ),
            upscale_client: UpscaleClient::new(transport, config.validate_requests),
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(LeonardoConfig::from_env())
    }

    pub fn generations(&self) -> &GenerationClient {
        &self.generation_client
    }

    pub fn upscaler(&self) -> &UpscaleClient {
        &self.upscale_client
    }

    /// (model id, display name) for every model this client can target.
    pub fn supported_models() -> Vec<(&'static str, &'static str)> {
        ModelVariant::ALL
            .iter()
            .map(|v| (v.model_id(), v.name()))
            .collect()
    }

    pub async fn generate_images(&self, request: &GenerationRequest) -> Result<ServiceResponse> {
        self.generation_client.generate(request).await
    }

    pub async fn fetch_generation(&self, generation_id: &str) -> Result<ServiceResponse> {
        self.generation_client.fetch(generation_id).await
    }

    pub async fn upscale_image(&self, request: &UpscaleRequest) -> Result<ServiceResponse> {
        self.upscale_client.upscale(request).await
    }
}

#[async_trait]
impl GenerationApi for LeonardoClient {
    async fn generate_images(&self, request: &GenerationRequest) -> Result<ServiceResponse> {
        LeonardoClient::generate_images(self, request).await
    }

    async fn fetch_generation(&self, generation_id: &str) -> Result<ServiceResponse> {
        LeonardoClient::fetch_generation(self, generation_id).await
    }

    async fn upscale_image(&self, request: &UpscaleRequest) -> Result<ServiceResponse> {
        LeonardoClient::upscale_image(self, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_requires_credential() {
        assert!(LeonardoClient::new(LeonardoConfig::new()).is_err());
        assert!(LeonardoClient::new(LeonardoConfig::new().with_api_key("k")).is_ok());
    }

    #[test]
    fn test_supported_models() {
        let models = LeonardoClient::supported_models();
        assert_eq!(models.len(), 2);
        assert!(models.contains(&("de7d3faf-762f-48e0-b3b7-9d0ac3a3fcf3", "Phoenix 1.0")));
        assert!(models.contains(&("e71a1c2f-4f80-4800-934f-2c68979d8cc8", "Anime XL")));
    }
}
