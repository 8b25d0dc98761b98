//! Pipeline error classification

use std::fmt;

use super::Stage;

/// Errors surfaced by a triggered pipeline operation.
///
/// Every variant is terminal for the operation that raised it: nothing is
/// retried, and the user recovers by resubmitting or resetting the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// Input failed a precondition before any request was dispatched
    Validation { message: String },
    /// The request could not complete (connectivity, timeout)
    Transport { stage: Stage, message: String },
    /// A response arrived but the backend reported failure, or the content
    /// stage produced a blank artifact
    Application { stage: Stage, message: String },
}

impl PipelineError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        PipelineError::Validation {
            message: message.into(),
        }
    }

    /// Create a transport error for a stage
    pub fn transport(stage: Stage, message: impl Into<String>) -> Self {
        PipelineError::Transport {
            stage,
            message: message.into(),
        }
    }

    /// Create an application error for a stage
    pub fn application(stage: Stage, message: impl Into<String>) -> Self {
        PipelineError::Application {
            stage,
            message: message.into(),
        }
    }

    /// Check if this error was raised before any network call
    pub fn is_validation(&self) -> bool {
        matches!(self, PipelineError::Validation { .. })
    }

    /// Get the stage this error belongs to, if any
    pub fn stage(&self) -> Option<Stage> {
        match self {
            PipelineError::Validation { .. } => None,
            PipelineError::Transport { stage, .. } | PipelineError::Application { stage, .. } => {
                Some(*stage)
            }
        }
    }

    /// The bare message text, without the stage prefix
    pub fn user_message(&self) -> &str {
        match self {
            PipelineError::Validation { message }
            | PipelineError::Transport { message, .. }
            | PipelineError::Application { message, .. } => message,
        }
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Validation { message } => {
                write!(f, "{}", message)
            }
            PipelineError::Transport { stage, message } => {
                write!(f, "{} request failed: {}", stage.label(), message)
            }
            PipelineError::Application { stage, message } => {
                write!(f, "{} failed: {}", stage.label(), message)
            }
        }
    }
}

impl std::error::Error for PipelineError {}
