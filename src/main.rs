use clap::{Args, Parser, Subcommand};
use rleonardo::{
    logger::{self, LogLevel, LoggerConfig},
    AnimeXlParams, GenerationRequest, LeonardoClient, LeonardoConfig, PhoenixParams,
    PresetStyle, SecretSource, UltraUpscaleStyle, UpscaleRequest,
};

#[derive(Parser)]
#[command(name = "rleonardo")]
#[command(about = "Generate and upscale images with the Leonardo REST API", long_about = None)]
struct Cli {
    /// Show request payloads and timings
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    /// Where to read the API key from when LEONARDO_API_KEY is unset (env:NAME or file:PATH)
    #[arg(long, global = true, env = "LEONARDO_API_KEY_SOURCE")]
    api_key_source: Option<SecretSource>,

    /// Override the REST base URL
    #[arg(long, global = true, env = "LEONARDO_BASE_URL")]
    base_url: Option<String>,

    /// Send values as-is and let the service reject bad ones
    #[arg(long, global = true)]
    no_validate: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ImageArgs {
    /// Text prompt describing the image
    prompt: String,

    /// Width in pixels (512-1536, multiple of 8)
    #[arg(long, default_value_t = rleonardo::DEFAULT_WIDTH)]
    width: u32,

    /// Height in pixels (512-1536, multiple of 8)
    #[arg(long, default_value_t = rleonardo::DEFAULT_HEIGHT)]
    height: u32,

    /// Number of images to generate
    #[arg(short = 'n', long, default_value_t = rleonardo::DEFAULT_NUM_IMAGES)]
    num_images: u32,

    /// Disable Alchemy
    #[arg(long)]
    no_alchemy: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a Phoenix 1.0 generation
    Phoenix {
        #[command(flatten)]
        image: ImageArgs,

        /// Contrast (1.0-4.5)
        #[arg(long, default_value_t = rleonardo::DEFAULT_PHOENIX_CONTRAST)]
        contrast: f64,

        /// Style UUID
        #[arg(long, default_value = rleonardo::DEFAULT_PHOENIX_STYLE_UUID)]
        style_uuid: String,
    },

    /// Create an Anime XL generation
    AnimeXl {
        #[command(flatten)]
        image: ImageArgs,

        /// Preset style, e.g. CINEMATIC or STOCK_PHOTO
        #[arg(long, default_value_t = PresetStyle::Cinematic)]
        preset_style: PresetStyle,
    },

    /// Fetch a generation by id
    Fetch {
        generation_id: String,
    },

    /// Upscale a generated image with the universal upscaler
    Upscale {
        generated_image_id: String,

        /// Upscale multiplier (1.0-2.0)
        #[arg(long, default_value_t = rleonardo::DEFAULT_UPSCALE_MULTIPLIER)]
        multiplier: f64,

        /// ARTISTIC or PHOTOGRAPHIC
        #[arg(long, default_value_t = UltraUpscaleStyle::Artistic)]
        style: UltraUpscaleStyle,

        /// Creativity strength (1-5)
        #[arg(long, default_value_t = rleonardo::DEFAULT_UPSCALE_STRENGTH)]
        creativity_strength: u32,

        /// Detail contrast (1-5)
        #[arg(long, default_value_t = rleonardo::DEFAULT_UPSCALE_STRENGTH)]
        detail_contrast: u32,

        /// Similarity (1-5)
        #[arg(long, default_value_t = rleonardo::DEFAULT_UPSCALE_STRENGTH)]
        similarity: u32,
    },
}

impl ImageArgs {
    fn into_request(self, params: impl Into<rleonardo::ModelParams>) -> GenerationRequest {
        GenerationRequest::new(self.prompt, params)
            .with_dimensions(self.width, self.height)
            .with_num_images(self.num_images)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();
    let cli = Cli::parse();

    let logger_config = if cli.json_logs {
        LoggerConfig::production()
    } else {
        LoggerConfig::new()
    };
    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };
    logger::init_with_config(logger_config.with_level(level))?;

    if dotenv_loaded {
        log::debug!("✅ .env file loaded");
    }

    let mut config = LeonardoConfig::from_env().with_validation(!cli.no_validate);
    if let Some(source) = cli.api_key_source {
        config = config.with_api_key_source(source);
    }
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url);
    }
    logger::log_config_info(&config);

    let client = match LeonardoClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            log::error!("❌ Failed to initialize Leonardo client: {}", e);
            return Err(e.into());
        }
    };

    let result = match cli.command {
        Commands::Phoenix {
            image,
            contrast,
            style_uuid,
        } => {
            let params = PhoenixParams::new()
                .with_contrast(contrast)
                .with_style_uuid(style_uuid)
                .with_alchemy(!image.no_alchemy);
            client.generate_images(&image.into_request(params)).await
        }
        Commands::AnimeXl {
            image,
            preset_style,
        } => {
            let params = AnimeXlParams::new()
                .with_preset_style(preset_style)
                .with_alchemy(!image.no_alchemy);
            client.generate_images(&image.into_request(params)).await
        }
        Commands::Fetch { generation_id } => client.fetch_generation(&generation_id).await,
        Commands::Upscale {
            generated_image_id,
            multiplier,
            style,
            creativity_strength,
            detail_contrast,
            similarity,
        } => {
            let request = UpscaleRequest::new(generated_image_id)
                .with_multiplier(multiplier)
                .with_style(style)
                .with_creativity_strength(creativity_strength)
                .with_detail_contrast(detail_contrast)
                .with_similarity(similarity);
            client.upscale_image(&request).await
        }
    };

    match result {
        Ok(response) => {
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Err(e) => {
            log::error!("❌ {}", e);
            Err(e.into())
        }
    }
}
