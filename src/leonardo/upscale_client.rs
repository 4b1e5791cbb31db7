use super::transport::ApiTransport;
use crate::{
    error::Result,
    models::{ServiceResponse, UpscaleRequest},
};

#[derive(Clone)]
pub struct UpscaleClient {
    transport: ApiTransport,
    validate: bool,
}

impl UpscaleClient {
    pub fn new(transport: ApiTransport, validate: bool) -> Self {
        Self {
            transport,
            validate,
        }
    }

    pub async fn upscale(&self, request: &UpscaleRequest) -> Result<ServiceResponse> {
        if self.validate {
            request.validate()?;
        }

        log::info!(
            "Requesting {} upscale x{} for image {}",
            request.ultra_upscale_style,
            request.upscale_multiplier,
            request.generated_image_id
        );

        self.transport
            .post_json(&["variations", "universal-upscaler"], request)
            .await
    }
}
