//! Session controller: the only writer of workflow state.
//!
//! Transition methods validate, mutate, and dispatch stage calls onto the
//! runtime; completions come back as [`StageOutcome`] messages that the
//! event loop feeds into [`SessionController::apply`].

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::api::{GeneratedContent, GenerationBackend, KeywordBatch, PipelineError, Stage};

use super::state::{WorkflowState, WorkflowStep};

/// Payload merged into the state when a stage call succeeds.
#[derive(Debug, Clone)]
pub enum StagePayload {
    Keywords(KeywordBatch),
    Titles(Vec<String>),
    Topics(String),
    Content(GeneratedContent),
}

/// Completion of one dispatched stage call, stamped with the run generation
/// current at dispatch time.
#[derive(Debug)]
pub struct StageOutcome {
    pub generation: u64,
    pub stage: Stage,
    pub result: Result<StagePayload, PipelineError>,
}

pub struct SessionController {
    state: WorkflowState,
    /// Run stamp; bumped on reset so completions from an abandoned run are
    /// discarded instead of applied to fresh state
    generation: u64,
    backend: Arc<dyn GenerationBackend>,
    outcome_tx: mpsc::UnboundedSender<StageOutcome>,
    last_error: Option<PipelineError>,
}

impl SessionController {
    pub fn new(
        backend: Arc<dyn GenerationBackend>,
        outcome_tx: mpsc::UnboundedSender<StageOutcome>,
    ) -> Self {
        Self {
            state: WorkflowState::initial(),
            generation: 0,
            backend,
            outcome_tx,
            last_error: None,
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    /// Most recent failure, sync or async; cleared by the next accepted
    /// transition or successful stage completion
    pub fn last_error(&self) -> Option<&PipelineError> {
        self.last_error.as_ref()
    }

    /// Validate the seed, record it, and dispatch keyword research.
    pub fn submit_seed(&mut self, text: &str) -> Result<(), PipelineError> {
        let seed = text.trim().to_string();
        if seed.is_empty() {
            return Err(self.fail(PipelineError::validation("Please enter a seed keyword")));
        }
        if let Err(err) = self.check_ready(WorkflowStep::SeedInput) {
            return Err(self.fail(err));
        }
        self.last_error = None;
        self.state.seed_keyword = seed.clone();
        self.state.busy = true;
        debug!(seed = %seed, "dispatching keyword research");
        self.spawn_keywords(seed);
        Ok(())
    }

    /// Record the chosen keyword and dispatch title generation.
    pub fn choose_keyword(&mut self, keyword: &str) -> Result<(), PipelineError> {
        if let Err(err) = self.check_ready(WorkflowStep::KeywordChoice) {
            return Err(self.fail(err));
        }
        self.last_error = None;
        self.state.selected_keyword = keyword.to_string();
        self.state.busy = true;
        debug!(keyword, session_id = %self.state.session_id, "dispatching title generation");
        self.spawn_titles(keyword.to_string(), self.state.session_id.clone());
        Ok(())
    }

    /// Record the chosen title and dispatch topic generation.
    pub fn choose_title(&mut self, title: &str) -> Result<(), PipelineError> {
        if let Err(err) = self.check_ready(WorkflowStep::TitleChoice) {
            return Err(self.fail(err));
        }
        self.last_error = None;
        self.state.selected_title = title.to_string();
        self.state.busy = true;
        debug!(title, session_id = %self.state.session_id, "dispatching topic generation");
        self.spawn_topics(
            title.to_string(),
            self.state.selected_keyword.clone(),
            self.state.session_id.clone(),
        );
        Ok(())
    }

    /// Record the chosen topic segment and dispatch content generation.
    pub fn choose_topic(&mut self, segment: &str) -> Result<(), PipelineError> {
        if let Err(err) = self.check_ready(WorkflowStep::TopicChoice) {
            return Err(self.fail(err));
        }
        self.last_error = None;
        self.state.selected_topic = segment.to_string();
        self.state.busy = true;
        debug!(session_id = %self.state.session_id, "dispatching content generation");
        self.spawn_content(
            self.state.selected_keyword.clone(),
            self.state.selected_title.clone(),
            segment.to_string(),
            self.state.session_id.clone(),
        );
        Ok(())
    }

    /// Jump back to a strictly earlier step. Downstream artifacts are kept;
    /// re-running a stage overwrites them.
    pub fn go_back(&mut self, to_step: WorkflowStep) -> Result<(), PipelineError> {
        if self.state.busy {
            return Err(self.fail(PipelineError::validation(
                "A request is already in flight",
            )));
        }
        if to_step >= self.state.step {
            return Err(self.fail(PipelineError::validation(
                "Can only go back to an earlier step",
            )));
        }
        self.last_error = None;
        debug!(from = self.state.step.label(), to = to_step.label(), "going back");
        self.state.step = to_step;
        Ok(())
    }

    /// Discard the whole run and return to the initial state. Allowed even
    /// while a stage call is outstanding; its completion will be stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = WorkflowState::initial();
        self.last_error = None;
        debug!(generation = self.generation, "workflow reset");
    }

    /// Merge a stage completion into the state. Outcomes stamped with an
    /// older generation are dropped without touching anything.
    pub fn apply(&mut self, outcome: StageOutcome) {
        if outcome.generation != self.generation {
            debug!(stage = outcome.stage.label(), "discarding stale stage outcome");
            return;
        }
        self.state.busy = false;
        match outcome.result {
            Ok(payload) => self.on_stage_success(payload),
            Err(err) => self.on_stage_failure(outcome.stage, err),
        }
    }

    fn on_stage_success(&mut self, payload: StagePayload) {
        self.last_error = None;
        match payload {
            StagePayload::Keywords(batch) => {
                self.state.session_id = batch.session_id;
                self.state.keywords = batch.keywords;
                self.state.step = WorkflowStep::KeywordChoice;
            }
            StagePayload::Titles(titles) => {
                self.state.titles = titles;
                self.state.step = WorkflowStep::TitleChoice;
            }
            StagePayload::Topics(blob) => {
                self.state.topics = blob;
                self.state.step = WorkflowStep::TopicChoice;
            }
            StagePayload::Content(generated) => {
                // The HTTP client already rejects blank artifacts; guard here
                // as well so the rule holds for any backend implementation
                if generated.content.trim().is_empty() {
                    self.state.step = WorkflowStep::TopicChoice;
                    self.last_error = Some(PipelineError::application(
                        Stage::Content,
                        "returned an empty result; try another topic",
                    ));
                    return;
                }
                self.state.content = generated.content;
                self.state.seo_score = Some(generated.seo_score);
                self.state.seo_factors = generated.factors;
                self.state.content_id = generated.content_id;
                self.state.step = WorkflowStep::Result;
            }
        }
    }

    fn on_stage_failure(&mut self, stage: Stage, err: PipelineError) {
        // Step is left unchanged: the user retries or picks differently
        // from where they already are
        warn!(stage = stage.label(), error = %err, "stage call failed");
        self.last_error = Some(err);
    }

    fn check_ready(&self, expected: WorkflowStep) -> Result<(), PipelineError> {
        if self.state.busy {
            return Err(PipelineError::validation("A request is already in flight"));
        }
        if self.state.step != expected {
            return Err(PipelineError::validation(format!(
                "This action requires the {} step",
                expected.label()
            )));
        }
        Ok(())
    }

    fn fail(&mut self, err: PipelineError) -> PipelineError {
        self.last_error = Some(err.clone());
        err
    }

    fn spawn_keywords(&self, seed: String) {
        let backend = Arc::clone(&self.backend);
        let tx = self.outcome_tx.clone();
        let generation = self.generation;
        tokio::spawn(async move {
            let result = backend
                .research_keywords(&seed)
                .await
                .map(StagePayload::Keywords);
            send_outcome(&tx, generation, Stage::Keyword, result);
        });
    }

    fn spawn_titles(&self, keyword: String, session_id: String) {
        let backend = Arc::clone(&self.backend);
        let tx = self.outcome_tx.clone();
        let generation = self.generation;
        tokio::spawn(async move {
            let result = backend
                .generate_titles(&keyword, &session_id)
                .await
                .map(StagePayload::Titles);
            send_outcome(&tx, generation, Stage::Title, result);
        });
    }

    fn spawn_topics(&self, title: String, keyword: String, session_id: String) {
        let backend = Arc::clone(&self.backend);
        let tx = self.outcome_tx.clone();
        let generation = self.generation;
        tokio::spawn(async move {
            let result = backend
                .generate_topics(&title, &keyword, &session_id)
                .await
                .map(StagePayload::Topics);
            send_outcome(&tx, generation, Stage::Topic, result);
        });
    }

    fn spawn_content(&self, keyword: String, title: String, outline: String, session_id: String) {
        let backend = Arc::clone(&self.backend);
        let tx = self.outcome_tx.clone();
        let generation = self.generation;
        tokio::spawn(async move {
            let result = backend
                .generate_content(&keyword, &title, &outline, &session_id)
                .await
                .map(StagePayload::Content);
            send_outcome(&tx, generation, Stage::Content, result);
        });
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut WorkflowState {
        &mut self.state
    }
}

fn send_outcome(
    tx: &mpsc::UnboundedSender<StageOutcome>,
    generation: u64,
    stage: Stage,
    result: Result<StagePayload, PipelineError>,
) {
    let outcome = StageOutcome {
        generation,
        stage,
        result,
    };
    if tx.send(outcome).is_err() {
        warn!(stage = stage.label(), "stage outcome receiver dropped");
    }
}
