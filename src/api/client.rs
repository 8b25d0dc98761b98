//! HTTP client for the remote generation service.
//!
//! One POST per stage under `{base_url}/api/`; every response carries a
//! `status` discriminator and, on failure, an `error` field whose text is
//! preferred for user-visible messages.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::error::PipelineError;
use super::types::{
    keyword_frequency_occurrences, DashboardSummary, GeneratedContent, HealthStatus, KeywordBatch,
    SeoScore,
};
use super::{GenerationBackend, Stage};

const BACKEND_NAME: &str = "generation-api";
const DEFAULT_CONTENT_TYPE: &str = "blog_intro";

/// HTTP pipeline client.
///
/// Stateless between calls: the session id is supplied per request and the
/// client holds only connection policy (base URL, timeout, content kind).
pub struct PipelineClient {
    client: reqwest::Client,
    base_url: String,
    content_type: String,
    tone: Option<String>,
}

#[derive(Serialize)]
struct KeywordRequest<'a> {
    seed_keyword: &'a str,
}

#[derive(Serialize)]
struct TitleRequest<'a> {
    keyword: &'a str,
    session_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tone: Option<&'a str>,
}

#[derive(Serialize)]
struct TopicRequest<'a> {
    title: &'a str,
    keyword: &'a str,
    session_id: &'a str,
}

#[derive(Serialize)]
struct ContentRequest<'a> {
    keyword: &'a str,
    title: &'a str,
    topic_outline: &'a str,
    content_type: &'a str,
    session_id: &'a str,
}

#[derive(Deserialize)]
struct KeywordResponse {
    #[serde(default)]
    session_id: String,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    status: String,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct TitleResponse {
    #[serde(default)]
    titles: Vec<String>,
    #[serde(default)]
    status: String,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct TopicResponse {
    #[serde(default)]
    topics: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    error: Option<String>,
}

/// The two original frontends disagreed with the backend on the factor list
/// name and on whether a word count is sent at all; accept both names and
/// derive the count from the artifact when absent.
#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    content_id: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    seo_score: u32,
    #[serde(default, alias = "seo_factors")]
    factors: Vec<String>,
    #[serde(default)]
    word_count: Option<usize>,
    #[serde(default)]
    status: String,
    #[serde(default)]
    error: Option<String>,
}

/// Minimal body shape for non-2xx responses
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

impl PipelineClient {
    /// Create a client for the given service base URL.
    ///
    /// The timeout bounds every stage call; the external API's latency is
    /// otherwise unbounded, and expiry surfaces as a transport failure.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("copyforge/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            tone: None,
        })
    }

    /// Set the content kind tag sent with the content stage
    /// (the backend understands `blog_intro` and `meta_description`)
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Set the optional tone hint sent with the title stage
    pub fn with_tone(mut self, tone: Option<String>) -> Self {
        self.tone = tone;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_stage<Req, Resp>(
        &self,
        stage: Stage,
        path: &str,
        body: &Req,
    ) -> Result<Resp, PipelineError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let url = format!("{}/api/{}", self.base_url, path);
        tracing::debug!(stage = stage.label(), url = %url, "dispatching stage request");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| PipelineError::transport(stage, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // Failure responses still carry a JSON body with an error field
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            return Err(PipelineError::application(stage, message));
        }

        response
            .json::<Resp>()
            .await
            .map_err(|e| PipelineError::transport(stage, e.to_string()))
    }

    /// Probe the service's health endpoint.
    pub async fn health(&self) -> Result<HealthStatus> {
        let url = format!("{}/api/health", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Health check failed for {}", self.base_url))?;

        response
            .error_for_status()
            .context("Health endpoint returned an error status")?
            .json::<HealthStatus>()
            .await
            .context("Failed to decode health response")
    }

    /// Fetch the recent-activity summary.
    pub async fn dashboard(&self) -> Result<DashboardSummary> {
        let url = format!("{}/api/dashboard", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Dashboard request failed for {}", self.base_url))?;

        response
            .error_for_status()
            .context("Dashboard endpoint returned an error status")?
            .json::<DashboardSummary>()
            .await
            .context("Failed to decode dashboard response")
    }
}

/// Check the in-body status discriminator every response carries.
fn ensure_success(stage: Stage, status: &str, error: Option<String>) -> Result<(), PipelineError> {
    if status == "success" {
        return Ok(());
    }
    let message =
        error.unwrap_or_else(|| format!("backend returned status \"{}\"", status));
    Err(PipelineError::application(stage, message))
}

fn content_from_response(response: ContentResponse) -> Result<GeneratedContent, PipelineError> {
    ensure_success(Stage::Content, &response.status, response.error)?;

    // A blank artifact is a failure, not a success with empty payload
    if response.content.trim().is_empty() {
        return Err(PipelineError::application(
            Stage::Content,
            "returned an empty result; try another topic",
        ));
    }

    let word_count = response
        .word_count
        .unwrap_or_else(|| response.content.split_whitespace().count());

    let seo_score = SeoScore {
        percentage: response.seo_score,
        word_count,
        keyword_occurrences: keyword_frequency_occurrences(&response.factors),
    };

    Ok(GeneratedContent {
        content_id: response.content_id,
        content: response.content,
        seo_score,
        factors: response.factors,
    })
}

#[async_trait]
impl GenerationBackend for PipelineClient {
    fn name(&self) -> &str {
        BACKEND_NAME
    }

    async fn research_keywords(&self, seed: &str) -> Result<KeywordBatch, PipelineError> {
        let response: KeywordResponse = self
            .post_stage(Stage::Keyword, "keywords", &KeywordRequest { seed_keyword: seed })
            .await?;
        ensure_success(Stage::Keyword, &response.status, response.error)?;

        Ok(KeywordBatch {
            session_id: response.session_id,
            keywords: response.keywords,
        })
    }

    async fn generate_titles(
        &self,
        keyword: &str,
        session_id: &str,
    ) -> Result<Vec<String>, PipelineError> {
        let response: TitleResponse = self
            .post_stage(
                Stage::Title,
                "titles",
                &TitleRequest {
                    keyword,
                    session_id,
                    tone: self.tone.as_deref(),
                },
            )
            .await?;
        ensure_success(Stage::Title, &response.status, response.error)?;

        Ok(response.titles)
    }

    async fn generate_topics(
        &self,
        title: &str,
        keyword: &str,
        session_id: &str,
    ) -> Result<String, PipelineError> {
        let response: TopicResponse = self
            .post_stage(
                Stage::Topic,
                "topics",
                &TopicRequest {
                    title,
                    keyword,
                    session_id,
                },
            )
            .await?;
        ensure_success(Stage::Topic, &response.status, response.error)?;

        Ok(response.topics)
    }

    async fn generate_content(
        &self,
        keyword: &str,
        title: &str,
        topic_outline: &str,
        session_id: &str,
    ) -> Result<GeneratedContent, PipelineError> {
        let response: ContentResponse = self
            .post_stage(
                Stage::Content,
                "content",
                &ContentRequest {
                    keyword,
                    title,
                    topic_outline,
                    content_type: &self.content_type,
                    session_id,
                },
            )
            .await?;

        content_from_response(response)
    }
}
