//! Session workflow: state machine and the controller that drives it.

pub mod controller;
pub mod state;

pub use controller::{SessionController, StageOutcome, StagePayload};
pub use state::{WorkflowState, WorkflowStep};
