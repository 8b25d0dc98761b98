//! Integration tests for the full wizard workflow
//!
//! These tests drive the session controller end to end over an in-process
//! backend: seed submission through keyword, title, and topic choices to
//! generated content, plus export of the final artifact.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test workflow_integration
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use tempfile::TempDir;
use tokio::sync::mpsc;

use copyforge::api::{
    GeneratedContent, GenerationBackend, KeywordBatch, PipelineError, SeoScore, Stage,
};
use copyforge::export;
use copyforge::workflow::{SessionController, StageOutcome, WorkflowStep};

// ─── Test Backend ────────────────────────────────────────────────────────────

const SESSION_ID: &str = "sess-integration";

/// In-process backend returning canned results for every stage
struct ScriptedBackend {
    /// Stage whose call fails with a transport error, if any
    fail_stage: Option<Stage>,
}

impl ScriptedBackend {
    fn ok() -> Self {
        Self { fail_stage: None }
    }

    fn failing(stage: Stage) -> Self {
        Self {
            fail_stage: Some(stage),
        }
    }

    fn check(&self, stage: Stage) -> Result<(), PipelineError> {
        if self.fail_stage == Some(stage) {
            return Err(PipelineError::transport(stage, "connection refused"));
        }
        Ok(())
    }
}

#[async_trait]
impl GenerationBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn research_keywords(&self, seed: &str) -> Result<KeywordBatch, PipelineError> {
        self.check(Stage::Keyword)?;
        Ok(KeywordBatch {
            session_id: SESSION_ID.to_string(),
            keywords: vec![format!("{seed} strategy"), format!("{seed} for beginners")],
        })
    }

    async fn generate_titles(
        &self,
        keyword: &str,
        session_id: &str,
    ) -> Result<Vec<String>, PipelineError> {
        self.check(Stage::Title)?;
        assert_eq!(session_id, SESSION_ID);
        Ok(vec![
            format!("How to Win at {keyword}"),
            format!("{keyword}: A Field Guide"),
        ])
    }

    async fn generate_topics(
        &self,
        title: &str,
        keyword: &str,
        session_id: &str,
    ) -> Result<String, PipelineError> {
        self.check(Stage::Topic)?;
        assert_eq!(session_id, SESSION_ID);
        Ok(format!(
            "Opening angle for {title}\nWhy {keyword} matters\n\nSecond angle\nCommon mistakes"
        ))
    }

    async fn generate_content(
        &self,
        keyword: &str,
        title: &str,
        topic_outline: &str,
        session_id: &str,
    ) -> Result<GeneratedContent, PipelineError> {
        self.check(Stage::Content)?;
        assert_eq!(session_id, SESSION_ID);
        assert!(!topic_outline.is_empty());
        Ok(GeneratedContent {
            content_id: "content-7".to_string(),
            content: format!("{title}\n\nAn article built around {keyword}."),
            seo_score: SeoScore {
                percentage: 85,
                word_count: 6,
                keyword_occurrences: 1,
            },
            factors: vec!["Keyword Frequency: 1".to_string()],
        })
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn controller_with(
    backend: ScriptedBackend,
) -> (SessionController, mpsc::UnboundedReceiver<StageOutcome>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (SessionController::new(Arc::new(backend), tx), rx)
}

/// Wait for the next stage outcome and fold it into the controller
async fn pump(controller: &mut SessionController, rx: &mut mpsc::UnboundedReceiver<StageOutcome>) {
    let outcome = rx.recv().await.expect("stage outcome");
    controller.apply(outcome);
}

async fn drive_to_result(
    controller: &mut SessionController,
    rx: &mut mpsc::UnboundedReceiver<StageOutcome>,
) {
    controller.submit_seed("espresso").expect("seed accepted");
    pump(controller, rx).await;

    let keyword = controller.state().keywords[0].clone();
    controller.choose_keyword(&keyword).expect("keyword accepted");
    pump(controller, rx).await;

    let title = controller.state().titles[0].clone();
    controller.choose_title(&title).expect("title accepted");
    pump(controller, rx).await;

    let segment = controller.state().topic_segments()[0].clone();
    controller.choose_topic(&segment).expect("topic accepted");
    pump(controller, rx).await;
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_full_run_reaches_generated_content() {
    let (mut controller, mut rx) = controller_with(ScriptedBackend::ok());

    drive_to_result(&mut controller, &mut rx).await;

    let state = controller.state();
    assert_eq!(state.step, WorkflowStep::Result);
    assert!(!state.busy);
    assert_eq!(state.session_id, SESSION_ID);
    assert_eq!(state.selected_keyword, "espresso strategy");
    assert_eq!(state.selected_title, "How to Win at espresso strategy");
    assert_eq!(state.content_id, "content-7");
    assert!(state.content.contains("espresso strategy"));
    assert_eq!(state.seo_score.as_ref().map(|s| s.percentage), Some(85));
    assert_eq!(state.seo_factors, vec!["Keyword Frequency: 1".to_string()]);
    assert!(controller.last_error().is_none());
}

#[tokio::test]
async fn test_topic_outline_splits_into_segments() {
    let (mut controller, mut rx) = controller_with(ScriptedBackend::ok());

    controller.submit_seed("espresso").expect("seed accepted");
    pump(&mut controller, &mut rx).await;
    let keyword = controller.state().keywords[0].clone();
    controller.choose_keyword(&keyword).expect("keyword accepted");
    pump(&mut controller, &mut rx).await;
    let title = controller.state().titles[0].clone();
    controller.choose_title(&title).expect("title accepted");
    pump(&mut controller, &mut rx).await;

    let segments = controller.state().topic_segments();
    assert_eq!(segments.len(), 2);
    assert!(segments[0].starts_with("Opening angle"));
    assert!(segments[1].starts_with("Second angle"));
}

#[tokio::test]
async fn test_stage_failure_surfaces_error_and_keeps_step() {
    let (mut controller, mut rx) = controller_with(ScriptedBackend::failing(Stage::Title));

    controller.submit_seed("espresso").expect("seed accepted");
    pump(&mut controller, &mut rx).await;

    let keyword = controller.state().keywords[0].clone();
    controller.choose_keyword(&keyword).expect("keyword accepted");
    pump(&mut controller, &mut rx).await;

    let state = controller.state();
    assert_eq!(state.step, WorkflowStep::KeywordChoice);
    assert!(!state.busy);
    assert!(state.titles.is_empty());
    let err = controller.last_error().expect("stage error recorded");
    assert_eq!(err.stage(), Some(Stage::Title));
}

#[tokio::test]
async fn test_restart_returns_to_blank_wizard() {
    let (mut controller, mut rx) = controller_with(ScriptedBackend::ok());

    drive_to_result(&mut controller, &mut rx).await;
    controller.reset();

    let state = controller.state();
    assert_eq!(state.step, WorkflowStep::SeedInput);
    assert!(state.session_id.is_empty());
    assert!(state.content.is_empty());
    assert!(state.keywords.is_empty());
    assert!(controller.last_error().is_none());
}

#[tokio::test]
async fn test_export_writes_final_artifact() {
    let (mut controller, mut rx) = controller_with(ScriptedBackend::ok());
    drive_to_result(&mut controller, &mut rx).await;

    let dir = TempDir::new().expect("temp dir");
    let state = controller.state();
    let path = export::write_export(dir.path(), &state.selected_keyword, &state.content)
        .expect("export written");

    assert_eq!(
        path.file_name().and_then(|n| n.to_str()),
        Some("espresso_strategy_content.txt")
    );
    let written = std::fs::read_to_string(&path).expect("read back");
    assert_eq!(written, state.content);
}
