//! Minimal Gemini and OpenAI REST clients.
//!
//! Both clients return the model's final text; interpreting that text is the
//! caller's job.
//!
//! # Example
//!
//! ```rust,ignore
//! use llm_client::{GeminiClient, GenerateContentRequest};
//!
//! let client = GeminiClient::new(api_key);
//! let text = client
//!     .generate_content(
//!         GenerateContentRequest::new("gemini-2.0-flash", prompt)
//!             .with_file("https://www.youtube.com/watch?v=...", "video/*"),
//!     )
//!     .await?;
//! ```

pub mod error;
pub mod gemini;
pub mod openai;

pub use error::{LlmError, Result};
pub use gemini::{GeminiClient, GenerateContentRequest, DEFAULT_GEMINI_MODEL};
pub use openai::{ChatRequest, ChatResponse, Message, OpenAIClient, DEFAULT_OPENAI_MODEL};
