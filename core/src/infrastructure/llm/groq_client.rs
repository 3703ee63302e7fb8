use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{
    common::{VisionConfig, entities::app_errors::CoreError},
    diagnosis::{entities::EncodedImage, ports::VisionClient},
};

/// OpenAI-compatible chat completions client (Groq by default).
#[derive(Debug, Clone)]
pub struct GroqVisionClient {
    api_key: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Part {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: MessageResponse,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    content: Option<String>,
}

impl GroqVisionClient {
    pub fn new(config: &VisionConfig) -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build vision HTTP client: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            client,
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    fn build_request(prompt: String, image: &EncodedImage, model: String) -> ChatRequest {
        ChatRequest {
            model,
            messages: vec![Message {
                role: "user".to_string(),
                content: vec![
                    Part::Text { text: prompt },
                    Part::ImageUrl {
                        image_url: ImageUrl {
                            url: image.data_url(),
                        },
                    },
                ],
            }],
        }
    }

    fn extract_answer(response: ChatResponse) -> Result<String, CoreError> {
        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| CoreError::ExternalServiceError("No response from LLM".to_string()))
    }

    async fn call_completions_api(&self, request: ChatRequest) -> Result<String, CoreError> {
        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Vision API request failed: {}", e);
                CoreError::ExternalServiceError(format!("LLM API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Vision API error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "LLM API returned error: {} - {}",
                status, error_text
            )));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse vision response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse LLM response: {}", e))
        })?;

        Self::extract_answer(chat_response)
    }
}

impl VisionClient for GroqVisionClient {
    async fn query(
        &self,
        prompt: String,
        image: EncodedImage,
        model: String,
    ) -> Result<String, CoreError> {
        let request = Self::build_request(prompt, &image, model);

        self.call_completions_api(request).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::{TcpListener, TcpStream},
    };

    use super::*;

    fn client_with_timeout(base_url: &str, request_timeout: Duration) -> GroqVisionClient {
        GroqVisionClient::new(&VisionConfig {
            api_key: "key".to_string(),
            base_url: base_url.to_string(),
            model: "meta-llama/llama-4-scout-17b-16e-instruct".to_string(),
            request_timeout,
        })
        .unwrap()
    }

    fn client(base_url: &str) -> GroqVisionClient {
        client_with_timeout(base_url, Duration::from_secs(2))
    }

    /// Reads one HTTP request, headers and `Content-Length` body.
    async fn read_request(socket: &mut TcpStream) {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];

        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                return;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf);
            if let Some(end) = text.find("\r\n\r\n") {
                let content_length = text[..end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= end + 4 + content_length {
                    return;
                }
            }
        }
    }

    /// Serves a single connection on a random local port. `None` never answers.
    async fn serve_once(reply: Option<(&'static str, &'static str)>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            read_request(&mut socket).await;

            match reply {
                Some((status, body)) => {
                    let response = format!(
                        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    socket.write_all(response.as_bytes()).await.unwrap();
                    let _ = socket.shutdown().await;
                }
                None => tokio::time::sleep(Duration::from_secs(5)).await,
            }
        });

        format!("http://{addr}")
    }

    fn image() -> EncodedImage {
        EncodedImage {
            mime_type: "image/jpeg".to_string(),
            data: "AAAA".to_string(),
        }
    }

    #[test]
    fn test_request_body_embeds_image_as_data_url() {
        let request = GroqVisionClient::build_request(
            "What is this?".to_string(),
            &image(),
            "meta-llama/llama-4-scout-17b-16e-instruct".to_string(),
        );

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "model": "meta-llama/llama-4-scout-17b-16e-instruct",
                "messages": [{
                    "role": "user",
                    "content": [
                        { "type": "text", "text": "What is this?" },
                        {
                            "type": "image_url",
                            "image_url": { "url": "data:image/jpeg;base64,AAAA" }
                        }
                    ]
                }]
            })
        );
    }

    #[test]
    fn test_extract_answer_takes_first_choice() {
        let response: ChatResponse = serde_json::from_value(json!({
            "id": "chatcmpl-1",
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": "With what I see, I think you have acne." } },
                { "index": 1, "message": { "role": "assistant", "content": "other" } }
            ]
        }))
        .unwrap();

        assert_eq!(
            GroqVisionClient::extract_answer(response).unwrap(),
            "With what I see, I think you have acne."
        );
    }

    #[test]
    fn test_extract_answer_without_choices_fails() {
        let response: ChatResponse = serde_json::from_value(json!({ "choices": [] })).unwrap();

        assert!(matches!(
            GroqVisionClient::extract_answer(response),
            Err(CoreError::ExternalServiceError(_))
        ));
    }

    #[test]
    fn test_completions_url_tolerates_trailing_slash() {
        let client = client("https://api.groq.com/openai/v1/");

        assert_eq!(
            client.completions_url(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_external_service_error() {
        let client = client("http://127.0.0.1:9");

        let result = client
            .query("prompt".to_string(), image(), "model".to_string())
            .await;

        assert!(matches!(result, Err(CoreError::ExternalServiceError(_))));
    }

    #[tokio::test]
    async fn test_error_status_is_external_service_error() {
        let base_url = serve_once(Some(("503 Service Unavailable", "busy"))).await;

        let result = client(&base_url)
            .query("prompt".to_string(), image(), "model".to_string())
            .await;

        match result {
            Err(CoreError::ExternalServiceError(message)) => {
                assert!(message.contains("503"));
                assert!(message.contains("busy"));
            }
            other => panic!("expected external service error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_external_service_error() {
        let base_url = serve_once(Some(("200 OK", "{oops"))).await;

        let result = client(&base_url)
            .query("prompt".to_string(), image(), "model".to_string())
            .await;

        match result {
            Err(CoreError::ExternalServiceError(message)) => {
                assert!(message.starts_with("Failed to parse LLM response"));
            }
            other => panic!("expected external service error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_request_timeout_is_external_service_error() {
        let base_url = serve_once(None).await;
        let client = client_with_timeout(&base_url, Duration::from_millis(500));

        let started = std::time::Instant::now();
        let result = client
            .query("prompt".to_string(), image(), "model".to_string())
            .await;

        assert!(matches!(result, Err(CoreError::ExternalServiceError(_))));
        assert!(started.elapsed() < Duration::from_secs(4));
    }
}
