//! Session manager service
//!
//! Loads the UI session on startup and persists it after every change.

use std::sync::Arc;

use todo_core::TodoList;
use tokio::sync::RwLock;

use crate::error::SessionError;
use crate::session::{ColorMode, UiSession};
use crate::storage::SessionStorage;

type Result<T> = std::result::Result<T, SessionError>;

pub struct SessionManager<S: SessionStorage> {
    storage: Arc<S>,
    current: Arc<RwLock<UiSession>>,
    session_id: String,
}

impl<S: SessionStorage> SessionManager<S> {
    /// Load the session, creating a default one when none exists.
    pub async fn new(storage: S, session_id: impl Into<String>) -> Result<Self> {
        let session_id = session_id.into();
        let storage = Arc::new(storage);

        let session = match storage.load_session(&session_id).await {
            Ok(session) => session,
            Err(SessionError::NotFound) => {
                let session = UiSession::default();
                storage.save_session(&session_id, &session).await?;
                session
            }
            Err(e) => return Err(e),
        };

        Ok(Self {
            storage,
            current: Arc::new(RwLock::new(session)),
            session_id,
        })
    }

    /// Snapshot of the current session
    pub async fn session(&self) -> UiSession {
        self.current.read().await.clone()
    }

    pub async fn set_active_list(&self, list_id: Option<String>) -> Result<()> {
        let mut session = self.current.write().await;
        session.set_active(list_id);
        self.storage.save_session(&self.session_id, &session).await
    }

    /// Select the first list when the current selection is missing or stale.
    pub async fn ensure_active(&self, lists: &[TodoList]) -> Result<()> {
        let mut session = self.current.write().await;
        if session.ensure_active(lists) {
            self.storage.save_session(&self.session_id, &session).await?;
        }
        Ok(())
    }

    pub async fn handle_list_removed(&self, removed_id: &str, remaining: &[TodoList]) -> Result<()> {
        let mut session = self.current.write().await;
        session.handle_list_removed(removed_id, remaining);
        self.storage.save_session(&self.session_id, &session).await
    }

    pub async fn set_show_completed(&self, show_completed: bool) -> Result<()> {
        let mut session = self.current.write().await;
        session.preferences.show_completed = show_completed;
        self.storage.save_session(&self.session_id, &session).await
    }

    pub async fn set_color_mode(&self, color_mode: ColorMode) -> Result<()> {
        let mut session = self.current.write().await;
        session.preferences.color_mode = color_mode;
        self.storage.save_session(&self.session_id, &session).await
    }
}
