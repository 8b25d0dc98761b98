//! Generation API layer
//!
//! This module provides:
//! - The `GenerationBackend` trait the session controller drives
//! - The HTTP pipeline client for the remote generation service
//! - Error classification for failed stage calls

pub mod client;
pub mod error;
pub mod types;

pub use client::PipelineClient;
pub use error::PipelineError;
pub use types::{
    DashboardSummary, GeneratedContent, HealthStatus, KeywordBatch, SeoScore,
};

use async_trait::async_trait;

/// One of the four pipeline stages, each backed by a single API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Keyword,
    Title,
    Topic,
    Content,
}

impl Stage {
    /// Human-readable label used in error messages and logs
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Keyword => "keyword research",
            Stage::Title => "title generation",
            Stage::Topic => "topic generation",
            Stage::Content => "content generation",
        }
    }
}

/// Backend driving the four generation stages.
///
/// Implementations issue exactly one request per call and never retry. They
/// must not touch workflow state; results flow back through the session
/// controller, which stays the single writer.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Backend name for logging
    fn name(&self) -> &str;

    /// Research keywords for a seed term. The backend assigns the session id
    /// that correlates every later request of the run.
    async fn research_keywords(&self, seed: &str) -> Result<KeywordBatch, PipelineError>;

    /// Generate title candidates for the chosen keyword.
    async fn generate_titles(
        &self,
        keyword: &str,
        session_id: &str,
    ) -> Result<Vec<String>, PipelineError>;

    /// Generate the topic outline document for the chosen title. The result
    /// is one unstructured blob; see [`types::split_topic_segments`].
    async fn generate_topics(
        &self,
        title: &str,
        keyword: &str,
        session_id: &str,
    ) -> Result<String, PipelineError>;

    /// Generate the final artifact for the chosen topic outline.
    async fn generate_content(
        &self,
        keyword: &str,
        title: &str,
        topic_outline: &str,
        session_id: &str,
    ) -> Result<GeneratedContent, PipelineError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_labels() {
        assert_eq!(Stage::Keyword.label(), "keyword research");
        assert_eq!(Stage::Content.label(), "content generation");
    }
}
