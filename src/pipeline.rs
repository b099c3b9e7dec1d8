//! The collage pipeline: validate, build the prompt, generate once, decode.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat};
use tracing::{debug, info};

use crate::error::CollageError;
use crate::ports::{ImageGenerator, ImageRequest};
use crate::prompt::build_prompt;
use crate::request::{validate, CollageInput, GenerationRequest};

/// A finished collage, owned by the caller.
#[derive(Debug)]
pub struct Collage {
    /// The validated request it was generated from.
    pub request: GenerationRequest,
    /// The prompt sent to the service.
    pub prompt: String,
    /// URL the service returned for the image.
    pub source_url: String,
    /// Decoded image.
    pub image: DynamicImage,
    /// The image re-encoded as PNG, ready to export.
    pub png: Vec<u8>,
}

/// Run one collage generation.
///
/// Validation failures return before `generator` is touched. Otherwise the
/// generator is called exactly once; nothing is retried.
///
/// # Errors
///
/// Returns the validation error, the generator's classified error, or
/// [`CollageError::UnclassifiedFailure`] when the bytes are not a decodable image.
pub async fn run(
    generator: &dyn ImageGenerator,
    input: CollageInput,
) -> Result<Collage, CollageError> {
    let request = validate(input)?;
    let prompt = build_prompt(&request.objects, &request.style);
    debug!(
        objects = request.objects.as_slice().len(),
        chars = prompt.len(),
        "prompt built"
    );

    let image_request = ImageRequest::collage(prompt.clone(), request.size.dimensions());
    info!(size = %request.size, "generating collage");
    let generated = generator.generate(&request.credential, &image_request).await?;
    debug!(bytes = generated.data.len(), mime = %generated.mime_type, "decoding image");

    let image = image::load_from_memory(&generated.data).map_err(|e| {
        CollageError::UnclassifiedFailure(format!("Failed to decode image: {e}"))
    })?;
    let png = encode_png(&image)?;
    info!(width = image.width(), height = image.height(), "collage ready");

    Ok(Collage { request, prompt, source_url: generated.source_url, image, png })
}

/// Re-encode a decoded image as PNG.
///
/// # Errors
///
/// Returns [`CollageError::UnclassifiedFailure`] if encoding fails.
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, CollageError> {
    let mut buf = Cursor::new(Vec::new());
    image.write_to(&mut buf, ImageFormat::Png).map_err(|e| {
        CollageError::UnclassifiedFailure(format!("Failed to encode PNG: {e}"))
    })?;
    Ok(buf.into_inner())
}
