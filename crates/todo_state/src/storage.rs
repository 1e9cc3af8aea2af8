//! Session storage trait and file-backed implementation

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::error::SessionError;
use crate::session::UiSession;

type Result<T> = std::result::Result<T, SessionError>;

/// Where UI sessions are persisted
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Load a session
    async fn load_session(&self, session_id: &str) -> Result<UiSession>;

    /// Save a session
    async fn save_session(&self, session_id: &str, session: &UiSession) -> Result<()>;

    /// Check if a session exists
    async fn session_exists(&self, session_id: &str) -> bool;

    /// Delete a session
    async fn delete_session(&self, session_id: &str) -> Result<()>;
}

/// File-based session storage, one JSON file per session id
#[derive(Clone)]
pub struct FileSessionStorage {
    base_path: PathBuf,
}

impl FileSessionStorage {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn session_path(&self, session_id: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", session_id))
    }
}

#[async_trait]
impl SessionStorage for FileSessionStorage {
    async fn load_session(&self, session_id: &str) -> Result<UiSession> {
        let path = self.session_path(session_id);
        if !path.exists() {
            return Err(SessionError::NotFound);
        }

        let contents = fs::read_to_string(&path).await?;
        let session: UiSession = serde_json::from_str(&contents)?;
        Ok(session)
    }

    async fn save_session(&self, session_id: &str, session: &UiSession) -> Result<()> {
        fs::create_dir_all(&self.base_path).await?;

        let path = self.session_path(session_id);
        let contents = serde_json::to_string_pretty(session)?;
        fs::write(&path, contents).await?;
        Ok(())
    }

    async fn session_exists(&self, session_id: &str) -> bool {
        self.session_path(session_id).exists()
    }

    async fn delete_session(&self, session_id: &str) -> Result<()> {
        let path = self.session_path(session_id);
        if path.exists() {
            fs::remove_file(&path).await?;
        }
        Ok(())
    }
}
