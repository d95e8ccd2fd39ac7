// Video evaluation backed by Gemini / OpenAI
//
// This is the infrastructure implementation of BaseVideoEvaluator.
// What to prompt for lives in domains/evaluations/prompts.rs.

use anyhow::{Context, Result};
use async_trait::async_trait;
use llm_client::{ChatRequest, GeminiClient, GenerateContentRequest, Message, OpenAIClient};

use super::{BaseVideoEvaluator, ModelProvider, VideoEvaluationRequest};

/// Mime type Gemini expects for YouTube file references.
const VIDEO_MIME_TYPE: &str = "video/*";

const OPENAI_SYSTEM_PROMPT: &str =
    "You evaluate student videos. Respond with a single JSON object and nothing else.";

/// Evaluates videos with the provider named in each request.
///
/// Clients are built per request because the API key comes from the caller.
#[derive(Debug, Clone)]
pub struct LlmVideoEvaluator {
    gemini_model: String,
    openai_model: String,
    gemini_base_url: Option<String>,
    openai_base_url: Option<String>,
}

impl LlmVideoEvaluator {
    pub fn new(gemini_model: impl Into<String>, openai_model: impl Into<String>) -> Self {
        Self {
            gemini_model: gemini_model.into(),
            openai_model: openai_model.into(),
            gemini_base_url: None,
            openai_base_url: None,
        }
    }

    /// Point both providers at custom endpoints (proxies, test servers).
    pub fn with_base_urls(mut self, gemini: Option<String>, openai: Option<String>) -> Self {
        self.gemini_base_url = gemini;
        self.openai_base_url = openai;
        self
    }

    async fn evaluate_with_gemini(&self, request: &VideoEvaluationRequest) -> Result<String> {
        let model = request.model.as_deref().unwrap_or(&self.gemini_model);

        let mut client = GeminiClient::new(request.api_key.clone());
        if let Some(url) = &self.gemini_base_url {
            client = client.with_base_url(url.clone());
        }

        let mut body = GenerateContentRequest::new(model, request.prompt.clone())
            .with_file(request.video_url.clone(), VIDEO_MIME_TYPE);
        if let Some(schema) = &request.response_schema {
            body = body.with_response_schema(schema.clone());
        }

        tracing::info!(model = model, video_url = %request.video_url, "Calling Gemini API");

        client
            .generate_content(body)
            .await
            .with_context(|| format!("Gemini generateContent failed for model {}", model))
    }

    async fn evaluate_with_openai(&self, request: &VideoEvaluationRequest) -> Result<String> {
        let model = request.model.as_deref().unwrap_or(&self.openai_model);

        let mut client = OpenAIClient::new(request.api_key.clone());
        if let Some(url) = &self.openai_base_url {
            client = client.with_base_url(url.clone());
        }

        // OpenAI cannot watch the video, so the URL and schema go into the prompt.
        let mut user_prompt = format!("{}\n\nVideo URL: {}", request.prompt, request.video_url);
        if let Some(schema) = &request.response_schema {
            user_prompt.push_str(&format!("\n\nRespond with JSON matching this schema:\n{}", schema));
        }

        let chat = ChatRequest::new(model)
            .message(Message::system(OPENAI_SYSTEM_PROMPT))
            .message(Message::user(user_prompt))
            .json_output();

        tracing::info!(model = model, video_url = %request.video_url, "Calling OpenAI API");

        let response = client
            .chat_completion(chat)
            .await
            .with_context(|| format!("OpenAI chat completion failed for model {}", model))?;

        Ok(response.content)
    }
}

#[async_trait]
impl BaseVideoEvaluator for LlmVideoEvaluator {
    async fn evaluate_video(&self, request: &VideoEvaluationRequest) -> Result<String> {
        let start = std::time::Instant::now();

        let result = match request.provider {
            ModelProvider::Gemini => self.evaluate_with_gemini(request).await,
            ModelProvider::OpenAi => self.evaluate_with_openai(request).await,
        };

        match &result {
            Ok(text) => tracing::info!(
                provider = %request.provider,
                response_length = text.len(),
                duration_ms = start.elapsed().as_millis(),
                "Model response received"
            ),
            Err(e) => tracing::error!(
                provider = %request.provider,
                error = %e,
                "Model call failed"
            ),
        }

        result
    }
}
