//! Resume analysis: LLM parsing, the five-stage pipeline, and its streaming
//! HTTP surface.

pub mod handlers;
pub mod narrative;
pub mod pipeline;
pub mod progress;
pub mod resume_parser;
