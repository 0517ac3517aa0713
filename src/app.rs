use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::adapters::ReqwestRequestDispatcher;
use crate::core::endpoints::ImageApi;
use crate::core::interfaces::adapters::RequestDispatcher;
use crate::core::models::{InpaintRequest, TransportSettings};

/// One inpainting submission driven from files on disk.
#[derive(Debug, Clone)]
pub struct InpaintJob {
    pub image_path: PathBuf,
    pub mask_path: PathBuf,
    pub prompt: Option<String>,
    pub brush_size: Option<u32>,
    pub output_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InpaintOutcome {
    ImageWritten { path: PathBuf, bytes: usize },
    /// The backend answered without an image; its fields are returned verbatim.
    NoImage(serde_json::Map<String, serde_json::Value>),
}

pub struct InpaintApp {
    image_api: ImageApi,
    settings: TransportSettings,
}

impl InpaintApp {
    pub fn build(settings: TransportSettings) -> Result<Self> {
        log::info!("[APP] Initializing application");

        let dispatcher: Arc<dyn RequestDispatcher> = Arc::new(
            ReqwestRequestDispatcher::build(&settings).context("failed to create dispatcher")?,
        );

        Ok(Self::build_with_dispatcher(dispatcher, settings))
    }

    pub fn build_with_dispatcher(
        dispatcher: Arc<dyn RequestDispatcher>,
        settings: TransportSettings,
    ) -> Self {
        Self {
            image_api: ImageApi::new(dispatcher),
            settings,
        }
    }

    pub fn load_settings(settings_path: Option<&Path>) -> TransportSettings {
        let loaded = match settings_path {
            Some(path) => TransportSettings::load_from(path),
            None => TransportSettings::load(),
        };

        loaded.unwrap_or_else(|e| {
            log::warn!("[APP] Failed to load settings: {}, using defaults", e);
            TransportSettings::default()
        })
    }

    pub fn image_api(&self) -> &ImageApi {
        &self.image_api
    }

    pub fn settings(&self) -> &TransportSettings {
        &self.settings
    }

    pub async fn run_inpaint(&self, job: &InpaintJob) -> Result<InpaintOutcome> {
        let image_bytes = tokio::fs::read(&job.image_path)
            .await
            .with_context(|| format!("failed to read image {:?}", job.image_path))?;
        let mask_bytes = tokio::fs::read(&job.mask_path)
            .await
            .with_context(|| format!("failed to read mask {:?}", job.mask_path))?;

        log::debug!(
            "[APP] Loaded image ({} bytes) and mask ({} bytes)",
            image_bytes.len(),
            mask_bytes.len()
        );

        let request = InpaintRequest::build_from_bytes(&image_bytes, &mask_bytes)
            .with_prompt(job.prompt.clone())
            .with_brush_size(job.brush_size);

        let response = self.image_api.inpaint(&request).await?;

        match response.decode_image()? {
            Some(bytes) => {
                if let Some(parent) = job.output_path.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
                tokio::fs::write(&job.output_path, &bytes)
                    .await
                    .with_context(|| format!("failed to write {:?}", job.output_path))?;

                log::info!("[APP] Inpainted image written to {:?}", job.output_path);
                Ok(InpaintOutcome::ImageWritten {
                    path: job.output_path.clone(),
                    bytes: bytes.len(),
                })
            }
            None => {
                log::warn!("[APP] Backend response carried no image");
                Ok(InpaintOutcome::NoImage(response.extra))
            }
        }
    }
}
