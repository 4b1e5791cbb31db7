//! Async client for the Leonardo image generation REST API.
//!
//! Covers three calls: create a generation (Phoenix 1.0 or Anime XL), fetch a
//! generation by id, and request a universal upscale. Responses come back as
//! the JSON the service sent; polling for completion is up to the caller.
//!
//! ```rust,no_run
//! use rleonardo::{GenerationRequest, LeonardoClient, LeonardoConfig};
//!
//! # async fn example() -> rleonardo::Result<()> {
//! let client = LeonardoClient::new(LeonardoConfig::from_env())?;
//! let created = client
//!     .generate_images(&GenerationRequest::phoenix("rain-soaked neon alley"))
//!     .await?;
//! println!("{}", created);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod leonardo;
pub mod logger;
pub mod models;
pub mod secrets;

pub use config::LeonardoConfig;
pub use error::{LeonardoError, Result};
pub use leonardo::{GenerationApi, GenerationClient, LeonardoClient, UpscaleClient};
pub use models::*;
pub use secrets::{Credential, SecretSource};
