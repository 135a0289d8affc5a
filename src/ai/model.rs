//! The generative model seam
//!
//! Everything the assistant features need from an AI service: send a prompt,
//! optionally with one inline image and a JSON response schema, and get text
//! back.

use std::path::Path;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{SpendlogError, SpendlogResult};

/// An image sent inline with a request
#[derive(Debug, Clone, PartialEq)]
pub struct InlineImage {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl InlineImage {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Read an image file, guessing the mime type from its extension
    pub fn from_path(path: &Path) -> SpendlogResult<Self> {
        let mime_type = mime_type_for(path).ok_or_else(|| {
            SpendlogError::Validation(format!(
                "Unsupported image type: {} (use jpg, png, webp, heic or gif)",
                path.display()
            ))
        })?;
        let bytes = std::fs::read(path).map_err(|e| {
            SpendlogError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;
        if bytes.is_empty() {
            return Err(SpendlogError::Validation(format!(
                "Image file is empty: {}",
                path.display()
            )));
        }
        Ok(Self::new(mime_type, bytes))
    }
}

fn mime_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "heic" => Some("image/heic"),
        "heif" => Some("image/heif"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

/// One request to the model
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    pub prompt: String,
    pub image: Option<InlineImage>,

    /// When set, the model is asked for JSON matching this schema
    pub response_schema: Option<Value>,
}

impl GenerationRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    pub fn with_image(mut self, image: InlineImage) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_schema(mut self, schema: Value) -> Self {
        self.response_schema = Some(schema);
        self
    }
}

/// A text generation service
///
/// Implementations make one attempt per call: no retries and no timeout
/// beyond the transport's own.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Generate text for a request; failures are `SpendlogError::Ai`
    async fn generate(&self, request: GenerationRequest) -> SpendlogResult<String>;
}
