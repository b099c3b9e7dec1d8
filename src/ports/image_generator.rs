//! Image generator port for the text-to-image service.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::CollageError;
use crate::request::Credential;

/// Model used for every collage.
pub const MODEL: &str = "dall-e-3";

/// Quality tier requested for every collage.
pub const QUALITY: &str = "standard";

/// A single image generation call, as sent to the service.
///
/// Carries no credential, so it is safe to record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRequest {
    /// Model identifier.
    pub model: String,
    /// The full collage prompt.
    pub prompt: String,
    /// Pixel size (`"1024x1024"`, `"1792x1024"`, `"1024x1792"`).
    pub size: String,
    /// Quality tier.
    pub quality: String,
    /// Number of images to generate.
    pub count: u32,
}

impl ImageRequest {
    /// A single-image request at the standard tier.
    #[must_use]
    pub fn collage(prompt: String, size: &str) -> Self {
        Self {
            model: MODEL.to_string(),
            prompt,
            size: size.to_string(),
            quality: QUALITY.to_string(),
            count: 1,
        }
    }
}

/// Raw bytes of a generated image, fetched from its retrieval locator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedImage {
    /// URL the service returned for the image.
    pub source_url: String,
    /// Raw image bytes.
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
    /// MIME type reported by the image host (e.g., `"image/png"`).
    pub mime_type: String,
}

/// Boxed future type returned by [`ImageGenerator::generate`].
pub type GenerateFuture<'a> =
    Pin<Box<dyn Future<Output = Result<GeneratedImage, CollageError>> + Send + 'a>>;

/// Generates one image from a prompt via an external service.
pub trait ImageGenerator: Send + Sync {
    /// Generate the image and fetch its bytes.
    fn generate(&self, credential: &Credential, request: &ImageRequest) -> GenerateFuture<'_>;
}

/// Serde helper for serializing `Vec<u8>` as base64 strings in cassettes.
mod base64_bytes {
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize bytes as base64 string.
    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(data);
        serializer.serialize_str(&encoded)
    }

    /// Deserialize base64 string to bytes.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        base64::engine::general_purpose::STANDARD.decode(&s).map_err(serde::de::Error::custom)
    }
}
