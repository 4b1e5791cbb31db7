use super::transport::ApiTransport;
use crate::{
    error::{LeonardoError, Result},
    models::{GenerationRequest, ServiceResponse},
};

const GENERATIONS: &str = "generations";

#[derive(Clone)]
pub struct GenerationClient {
    transport: ApiTransport,
    validate: bool,
}

impl GenerationClient {
    pub fn new(transport: ApiTransport, validate: bool) -> Self {
        Self {
            transport,
            validate,
        }
    }

    /// Submits a generation job. The response carries the generation id to poll with.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<ServiceResponse> {
        if self.validate {
            request.validate()?;
        }

        let variant = request.variant();
        log::info!(
            "Creating {} generation ({} x {}x{})",
            variant,
            request.num_images,
            request.width,
            request.height
        );

        self.transport
            .post_json(&[GENERATIONS], &request.payload())
            .await
    }

    /// One lookup of a generation. Completion status is left for the caller to inspect.
    pub async fn fetch(&self, generation_id: &str) -> Result<ServiceResponse> {
        if self.validate && generation_id.trim().is_empty() {
            return Err(LeonardoError::invalid("generationId", "must not be empty"));
        }

        log::info!("Fetching generation {}", generation_id);
        self.transport.get(&[GENERATIONS, generation_id]).await
    }
}
