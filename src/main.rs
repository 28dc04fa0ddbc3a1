use anyhow::Result;
use clap::Parser;
use imagegen_client::config::{DEFAULT_API_KEY, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};
use imagegen_client::models::DEFAULT_MODEL;
use imagegen_client::{ClientConfig, ImageRequestClient};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_PROMPT: &str = "A high mountain rising from a vast expanse of white sand desert, extremely hot and desolate landscape, no living trees, only dead withered trees scattered everywhere, harsh sunlight, barren wasteland, dramatic scenery, photorealistic";

#[derive(Debug, Parser)]
#[command(name = "imagegen-client")]
#[command(about = "Generate an image from a text prompt and save it to disk")]
struct CliArgs {
    /// Prompt words, joined with spaces. Uses a built-in prompt when empty.
    #[arg(value_name = "PROMPT")]
    prompt: Vec<String>,

    /// Model identifier sent to the endpoint
    #[arg(long, env = "IMAGEGEN_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Output file. Defaults to generated_image_<timestamp>.<ext>
    #[arg(long, short, env = "IMAGEGEN_OUTPUT")]
    output: Option<PathBuf>,

    /// Chat completions endpoint URL
    #[arg(long, env = "IMAGEGEN_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Bearer token for the endpoint
    #[arg(long, env = "IMAGEGEN_API_KEY", default_value = DEFAULT_API_KEY, hide_env_values = true)]
    api_key: String,

    /// Request timeout in seconds
    #[arg(long, env = "IMAGEGEN_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Enable debug logging for this crate, on top of any RUST_LOG filter
    #[arg(long)]
    debug: bool,
}

impl CliArgs {
    fn prompt(&self) -> String {
        if self.prompt.is_empty() {
            DEFAULT_PROMPT.to_string()
        } else {
            self.prompt.join(" ")
        }
    }
}

/// `--debug` adds a crate-level debug directive to whatever filter is in effect.
fn log_filter(base: EnvFilter, debug: bool) -> Result<EnvFilter> {
    if debug {
        Ok(base.add_directive("imagegen_client=debug".parse()?))
    } else {
        Ok(base)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = CliArgs::parse();

    let base =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "imagegen_client=info".into());
    tracing_subscriber::registry()
        .with(log_filter(base, args.debug)?)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ClientConfig::new(
        &args.endpoint,
        args.api_key.clone(),
        Duration::from_secs(args.timeout_secs),
    )?;
    let client = ImageRequestClient::new(&config)?;

    info!("Waiting for response from {}...", config.endpoint);
    match client
        .generate(&args.prompt(), Some(&args.model), args.output.as_deref())
        .await
    {
        Ok(saved) => {
            info!("Saved {} bytes to {}", saved.size, saved.path.display());
            Ok(())
        }
        Err(e) => {
            error!("Image generation failed: {}", e);
            std::process::exit(1);
        }
    }
}
