// Sentiment layer: interview transcript analysis and its endpoints.

pub mod analyzer;
pub mod handlers;
