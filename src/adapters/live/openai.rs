//! Live adapter for the `OpenAI` image generation API.

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::{classify_api_error, CollageError};
use crate::ports::image_generator::{GenerateFuture, GeneratedImage, ImageGenerator, ImageRequest};
use crate::request::Credential;

const OPENAI_API_URL: &str = "https://api.openai.com/v1/images/generations";

/// Live `OpenAI` image generator: one generation call, then one unauthenticated fetch.
pub struct OpenAiGenerator {
    client: Client,
    endpoint: String,
}

impl Default for OpenAiGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenAiGenerator {
    /// Create a new `OpenAI` generator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_endpoint(OPENAI_API_URL)
    }

    /// Create a generator that posts to `endpoint` instead of the public API.
    #[must_use]
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self { client: Client::new(), endpoint: endpoint.into() }
    }
}

impl ImageGenerator for OpenAiGenerator {
    fn generate(&self, credential: &Credential, request: &ImageRequest) -> GenerateFuture<'_> {
        let request = request.clone();
        let api_key = credential.expose().to_string();
        Box::pin(async move {
            let body = serde_json::json!({
                "model": request.model,
                "prompt": request.prompt,
                "n": request.count,
                "size": request.size,
                "quality": request.quality,
            });

            debug!(model = %request.model, size = %request.size, "submitting generation request");
            let response =
                self.client.post(&self.endpoint).bearer_auth(&api_key).json(&body).send().await?;

            let status = response.status();
            let response_text = response.text().await?;
            debug!(status = status.as_u16(), "generation response received");

            if !status.is_success() {
                return Err(classify_api_error(status.as_u16(), &response_text));
            }

            let source_url = image_url(&response_text)?;
            debug!(url = %source_url, "fetching generated image");

            let image_response = self.client.get(&source_url).send().await?.error_for_status()?;
            let mime_type = image_response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = image_response.bytes().await?.to_vec();
            debug!(bytes = data.len(), mime = %mime_type, "image fetched");

            Ok(GeneratedImage { source_url, data, mime_type })
        })
    }
}

/// Extract the retrieval locator of the first image from a generation response.
fn image_url(response_text: &str) -> Result<String, CollageError> {
    let parsed: OpenAiResponse = serde_json::from_str(response_text).map_err(|e| {
        CollageError::UnclassifiedFailure(format!("Failed to parse response: {e}"))
    })?;

    parsed.data.into_iter().find_map(|item| item.url).ok_or_else(|| {
        let truncated = if response_text.len() > 500 {
            format!("{}...", response_text.chars().take(500).collect::<String>())
        } else {
            response_text.to_string()
        };
        CollageError::UnclassifiedFailure(format!("No image URL in response. Body: {truncated}"))
    })
}

// --- OpenAI API response types ---

#[derive(Deserialize)]
struct OpenAiResponse {
    data: Vec<OpenAiImageData>,
}

#[derive(Deserialize)]
struct OpenAiImageData {
    url: Option<String>,
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::JoinHandle;

    use super::*;
    use crate::error::ErrorKind;

    /// Serve one canned HTTP response on a local port; the handle yields the raw request.
    fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let endpoint = format!("http://{}/v1/images/generations", listener.local_addr().unwrap());
        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request);
                if let Some(end) = text.find("\r\n\r\n") {
                    let length = text[..end]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if request.len() >= end + 4 + length {
                        break;
                    }
                }
            }
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });
        (endpoint, handle)
    }

    async fn generate_against(status: &str, body: &str) -> (CollageError, String) {
        let (endpoint, server) = serve_once(status, body);
        let generator = OpenAiGenerator::with_endpoint(endpoint);
        let request = ImageRequest::collage("a still life".into(), "1024x1024");
        let err = match generator.generate(&Credential::new("sk-test"), &request).await {
            Ok(image) => panic!("expected an error, got {} bytes", image.data.len()),
            Err(e) => e,
        };
        (err, server.join().unwrap())
    }

    #[tokio::test]
    async fn unauthorized_status_is_authentication_failure() {
        let (err, raw) = generate_against(
            "401 Unauthorized",
            r#"{"error":{"message":"Incorrect API key provided"}}"#,
        )
        .await;
        assert_eq!(err.kind(), ErrorKind::AuthenticationFailure);
        assert!(raw.to_ascii_lowercase().contains("authorization: bearer sk-test"));
        assert!(raw.contains("\"model\":\"dall-e-3\""));
    }

    #[tokio::test]
    async fn too_many_requests_is_rate_limited() {
        let (err, _) = generate_against(
            "429 Too Many Requests",
            r#"{"error":{"message":"Rate limit reached"}}"#,
        )
        .await;
        assert_eq!(err.kind(), ErrorKind::RateLimited);
    }

    #[tokio::test]
    async fn bad_request_is_invalid_request() {
        let (err, _) = generate_against(
            "400 Bad Request",
            r#"{"error":{"message":"Your request was rejected by the safety system"}}"#,
        )
        .await;
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
        assert!(err.to_string().contains("safety system"));
    }

    #[tokio::test]
    async fn server_error_is_unclassified() {
        let (err, _) = generate_against("503 Service Unavailable", "upstream down").await;
        assert_eq!(err.kind(), ErrorKind::UnclassifiedFailure);
    }

    #[test]
    fn url_from_response() {
        let body = r#"{"created":1700000000,"data":[{"revised_prompt":"x","url":"https://img.example/a.png"}]}"#;
        assert_eq!(image_url(body).unwrap(), "https://img.example/a.png");
    }

    #[test]
    fn missing_url_is_unclassified() {
        let err = image_url(r#"{"data":[{"b64_json":"AAAA"}]}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnclassifiedFailure);
        assert!(err.to_string().contains("No image URL"));
    }

    #[test]
    fn empty_data_is_unclassified() {
        let err = image_url(r#"{"data":[]}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnclassifiedFailure);
    }

    #[test]
    fn unexpected_shape_is_unclassified() {
        let err = image_url("<html>gateway timeout</html>").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnclassifiedFailure);
        assert!(err.to_string().contains("Failed to parse response"));
    }
}
