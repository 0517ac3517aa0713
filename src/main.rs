use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use inpaint_client::global_constants;
use inpaint_client::{InpaintApp, InpaintJob, InpaintOutcome};

#[derive(Debug, Parser)]
#[command(name = "inpaint-client", version, about = "Submit an image to an inpainting backend")]
struct Cli {
    /// Source image
    #[arg(long)]
    image: PathBuf,

    /// Mask marking the region to repaint
    #[arg(long)]
    mask: PathBuf,

    #[arg(long)]
    prompt: Option<String>,

    #[arg(long)]
    brush_size: Option<u32>,

    #[arg(long, default_value = global_constants::DEFAULT_OUTPUT_FILE_NAME)]
    output: PathBuf,

    /// Overrides `base_url` from the settings file
    #[arg(long)]
    base_url: Option<String>,

    /// Overrides `timeout_ms` from the settings file
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Settings file (defaults to the user config directory)
    #[arg(long)]
    settings: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    log::info!("[MAIN] Starting {}", global_constants::APPLICATION_NAME);

    let settings = InpaintApp::load_settings(cli.settings.as_deref())
        .with_base_url(cli.base_url)
        .with_timeout_ms(cli.timeout_ms);

    let app = InpaintApp::build(settings)?;

    let job = InpaintJob {
        image_path: cli.image,
        mask_path: cli.mask,
        prompt: cli.prompt,
        brush_size: cli.brush_size,
        output_path: cli.output,
    };

    match app.run_inpaint(&job).await {
        Ok(InpaintOutcome::ImageWritten { path, bytes }) => {
            println!("Wrote {} bytes to {}", bytes, path.display());
            Ok(())
        }
        Ok(InpaintOutcome::NoImage(fields)) => {
            println!("{}", serde_json::to_string_pretty(&fields)?);
            Ok(())
        }
        Err(e) => {
            log::error!("[MAIN] Inpainting failed: {:#}", e);
            Err(e)
        }
    }
}
