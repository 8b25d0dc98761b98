//! Workflow state owned by the session controller.

use crate::api::types::split_topic_segments;
use crate::api::{SeoScore, Stage};

/// The five wizard steps, in pipeline order.
///
/// Progress is monotonic forward; explicit backward jumps to any strictly
/// earlier step are allowed by user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WorkflowStep {
    /// Entering the seed keyword
    SeedInput,
    /// Picking one of the researched keywords
    KeywordChoice,
    /// Picking one of the generated titles
    TitleChoice,
    /// Picking one segment of the topic outline
    TopicChoice,
    /// Viewing the generated artifact
    Result,
}

impl WorkflowStep {
    /// All steps in order, for progress headers
    pub fn all() -> &'static [WorkflowStep] {
        &[
            WorkflowStep::SeedInput,
            WorkflowStep::KeywordChoice,
            WorkflowStep::TitleChoice,
            WorkflowStep::TopicChoice,
            WorkflowStep::Result,
        ]
    }

    /// Display label for headers and step indicators
    pub fn label(&self) -> &'static str {
        match self {
            WorkflowStep::SeedInput => "Seed Keyword",
            WorkflowStep::KeywordChoice => "Keywords",
            WorkflowStep::TitleChoice => "Titles",
            WorkflowStep::TopicChoice => "Topics",
            WorkflowStep::Result => "Result",
        }
    }

    /// The step immediately before this one, if any
    pub fn previous(&self) -> Option<WorkflowStep> {
        match self {
            WorkflowStep::SeedInput => None,
            WorkflowStep::KeywordChoice => Some(WorkflowStep::SeedInput),
            WorkflowStep::TitleChoice => Some(WorkflowStep::KeywordChoice),
            WorkflowStep::TopicChoice => Some(WorkflowStep::TitleChoice),
            WorkflowStep::Result => Some(WorkflowStep::TopicChoice),
        }
    }

    /// The stage a confirmation at this step dispatches
    pub fn pending_stage(&self) -> Option<Stage> {
        match self {
            WorkflowStep::SeedInput => Some(Stage::Keyword),
            WorkflowStep::KeywordChoice => Some(Stage::Title),
            WorkflowStep::TitleChoice => Some(Stage::Topic),
            WorkflowStep::TopicChoice => Some(Stage::Content),
            WorkflowStep::Result => None,
        }
    }
}

/// The single mutable record of a workflow run.
///
/// Owned exclusively by the session controller; presentation code reads it
/// and triggers transitions but never writes fields directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowState {
    pub step: WorkflowStep,
    pub seed_keyword: String,
    pub keywords: Vec<String>,
    pub selected_keyword: String,
    pub titles: Vec<String>,
    pub selected_title: String,
    /// Raw topic outline blob; parsed lazily via [`Self::topic_segments`]
    pub topics: String,
    pub selected_topic: String,
    pub content: String,
    pub seo_score: Option<SeoScore>,
    /// Raw SEO factor strings from the content stage, kept for display
    pub seo_factors: Vec<String>,
    /// Backend-assigned record id for the generated artifact
    pub content_id: String,
    /// Backend-assigned correlation token; empty only before the keyword
    /// stage has completed, immutable for the rest of the run
    pub session_id: String,
    /// True exactly while a stage call is outstanding
    pub busy: bool,
}

impl WorkflowState {
    pub fn initial() -> Self {
        Self {
            step: WorkflowStep::SeedInput,
            seed_keyword: String::new(),
            keywords: Vec::new(),
            selected_keyword: String::new(),
            titles: Vec::new(),
            selected_title: String::new(),
            topics: String::new(),
            selected_topic: String::new(),
            content: String::new(),
            seo_score: None,
            seo_factors: Vec::new(),
            content_id: String::new(),
            session_id: String::new(),
            busy: false,
        }
    }

    /// Selectable outline segments parsed from the raw topic blob
    pub fn topic_segments(&self) -> Vec<String> {
        split_topic_segments(&self.topics)
    }
}

impl Default for WorkflowState {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_ordering() {
        assert!(WorkflowStep::SeedInput < WorkflowStep::KeywordChoice);
        assert!(WorkflowStep::TopicChoice < WorkflowStep::Result);
        assert_eq!(WorkflowStep::all().len(), 5);
    }

    #[test]
    fn test_step_previous() {
        assert_eq!(WorkflowStep::SeedInput.previous(), None);
        assert_eq!(
            WorkflowStep::Result.previous(),
            Some(WorkflowStep::TopicChoice)
        );
    }

    #[test]
    fn test_initial_state() {
        let state = WorkflowState::initial();
        assert_eq!(state.step, WorkflowStep::SeedInput);
        assert!(state.session_id.is_empty());
        assert!(state.seo_score.is_none());
        assert!(!state.busy);
    }

    #[test]
    fn test_topic_segments_from_blob() {
        let mut state = WorkflowState::initial();
        state.topics = "Outline A\n\nOutline B\n\n".to_string();
        assert_eq!(state.topic_segments(), vec!["Outline A", "Outline B"]);
    }
}
