use anyhow::{Context, Result};
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/inpaint`. Images travel as standard base64.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InpaintRequest {
    pub image: String,
    pub mask: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brush_size: Option<u32>,
}

impl InpaintRequest {
    pub fn build_from_bytes(image_bytes: &[u8], mask_bytes: &[u8]) -> Self {
        let engine = base64::engine::general_purpose::STANDARD;
        Self {
            image: engine.encode(image_bytes),
            mask: engine.encode(mask_bytes),
            prompt: None,
            brush_size: None,
        }
    }

    pub fn with_prompt(mut self, prompt: Option<String>) -> Self {
        self.prompt = prompt.filter(|p| !p.trim().is_empty());
        self
    }

    pub fn with_brush_size(mut self, brush_size: Option<u32>) -> Self {
        self.brush_size = brush_size;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        validate_base64_field("image", &self.image)?;
        validate_base64_field("mask", &self.mask)?;

        if self.brush_size == Some(0) {
            return Err("brush_size must be greater than zero".to_string());
        }

        Ok(())
    }
}

fn validate_base64_field(name: &str, value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("{} must not be empty", name));
    }

    base64::engine::general_purpose::STANDARD
        .decode(value)
        .map(|_| ())
        .map_err(|e| format!("{} is not valid base64: {}", name, e))
}

/// Backend reply. Only `image` is interpreted; everything else is kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InpaintResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl InpaintResponse {
    pub fn decode_image(&self) -> Result<Option<Vec<u8>>> {
        let Some(encoded) = &self.image else {
            return Ok(None);
        };

        let payload = strip_data_url_prefix(encoded);
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .context("inpainted image is not valid base64")?;

        Ok(Some(bytes))
    }
}

fn strip_data_url_prefix(encoded: &str) -> &str {
    if encoded.starts_with("data:") {
        if let Some((_, payload)) = encoded.split_once(",") {
            return payload;
        }
    }
    encoded
}
