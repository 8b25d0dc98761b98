//! Identity gating for the wizard.
//!
//! The workflow is only reachable with a signed-in identity. Providers
//! expose the current identity reactively; dropping the subscription
//! receiver is the teardown.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;

pub mod profile;

pub use profile::StoredProfileProvider;

/// Errors specific to identity operations
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("display name must not be empty")]
    EmptyName,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("profile parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// An authenticated-user handle. Opaque to the workflow; never part of
/// workflow state and untouched by workflow reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub display_name: String,
    /// Stable unique id assigned at sign-in
    pub account_id: String,
}

/// Source of the signed-in identity
///
/// Implementations decide where identities come from and how they persist.
/// The default is a JSON profile on disk; a hosted auth provider would slot
/// in behind the same trait.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Snapshot of the current identity, if signed in
    fn current(&self) -> Option<Identity>;

    /// Watch the identity as it changes. Drop the receiver to unsubscribe.
    fn subscribe(&self) -> watch::Receiver<Option<Identity>>;

    /// Establish a new identity for the given display name
    async fn sign_in(&self, display_name: &str) -> Result<Identity, IdentityError>;

    /// Relinquish the current identity
    async fn sign_out(&self) -> Result<(), IdentityError>;
}
