use crate::{
    error::Result,
    models::{GenerationRequest, ServiceResponse, UpscaleRequest},
};
use async_trait::async_trait;

/// The three Leonardo operations, for callers that want to swap in a fake.
#[async_trait]
pub trait GenerationApi: Send + Sync {
    async fn generate_images(&self, request: &GenerationRequest) -> Result<ServiceResponse>;
    async fn fetch_generation(&self, generation_id: &str) -> Result<ServiceResponse>;
    async fn upscale_image(&self, request: &UpscaleRequest) -> Result<ServiceResponse>;
}
