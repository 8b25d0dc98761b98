//! Disk-backed identity provider storing a single JSON profile.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::{debug, warn};
use uuid::Uuid;

use super::{Identity, IdentityError, IdentityProvider};

/// Identity provider persisting the signed-in profile as a JSON file.
///
/// A missing file means signed out. An unreadable file is treated the same
/// way after a warning, so a corrupt profile never blocks startup.
pub struct StoredProfileProvider {
    path: PathBuf,
    tx: watch::Sender<Option<Identity>>,
}

impl StoredProfileProvider {
    pub fn new(path: PathBuf) -> Self {
        let initial = read_profile(&path);
        let (tx, _rx) = watch::channel(initial);
        Self { path, tx }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

fn read_profile(path: &Path) -> Option<Identity> {
    if !path.exists() {
        return None;
    }
    match fs::read_to_string(path) {
        Ok(raw) => match serde_json::from_str::<Identity>(&raw) {
            Ok(identity) => {
                debug!(name = %identity.display_name, "loaded stored profile");
                Some(identity)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "profile file unreadable, starting signed out");
                None
            }
        },
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read profile file");
            None
        }
    }
}

#[async_trait]
impl IdentityProvider for StoredProfileProvider {
    fn current(&self) -> Option<Identity> {
        self.tx.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.tx.subscribe()
    }

    async fn sign_in(&self, display_name: &str) -> Result<Identity, IdentityError> {
        let name = display_name.trim();
        if name.is_empty() {
            return Err(IdentityError::EmptyName);
        }

        let identity = Identity {
            display_name: name.to_string(),
            account_id: Uuid::new_v4().to_string(),
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&identity)?;
        fs::write(&self.path, json)?;

        debug!(name = %identity.display_name, "signed in");
        self.tx.send_replace(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        debug!("signed out");
        self.tx.send_replace(None);
        Ok(())
    }
}
