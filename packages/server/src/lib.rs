// Video Feedback - API Core
//
// Evaluates student videos with an LLM (Gemini or OpenAI), normalizes the
// model's loosely structured answer into typed fields, and stores the result
// in PostgreSQL.
//
// Domain logic lives in domains/; infrastructure seams in kernel/.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
