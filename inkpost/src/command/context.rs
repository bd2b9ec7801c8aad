use crate::utils;
use eyre::{bail, eyre, Result};
use inkpost_client::resources::Resources;
use inkpost_client::settings::Settings;
use inkpost_client::storage::{FileStore, KeyValueStore};
use inkpost_client::{ApiClient, Session, SessionStore};
use std::sync::Arc;

/// Everything a command needs: settings, the session and the resource clients.
pub struct Context {
    pub settings: Settings,
    pub session: Arc<SessionStore>,
    pub api: Resources,
}

impl Context {
    pub fn new(settings: Settings) -> Result<Self> {
        let store = FileStore::new(settings.data_path())?;
        Self::with_store(settings, Box::new(store))
    }

    pub fn with_store(settings: Settings, store: Box<dyn KeyValueStore>) -> Result<Self> {
        let session = Arc::new(SessionStore::restore(store));
        let client = ApiClient::from_settings(&settings, session.clone())?;

        Ok(Self {
            settings,
            session,
            api: Resources::new(client),
        })
    }

    pub fn require_login(&self) -> Result<Session> {
        self.session
            .current()
            .ok_or_else(|| eyre!("You are not logged in. Run `inkpost account login` first."))
    }

    pub fn require_admin(&self) -> Result<Session> {
        let session = self.require_login()?;
        if !self.session.is_admin() {
            bail!("Only administrators can do that.");
        }
        Ok(session)
    }

    /// `true` when the action may go ahead.
    pub fn confirm(&self, yes: bool, question: &str) -> Result<bool> {
        if yes {
            return Ok(true);
        }
        let confirmed = utils::confirm(question)?;
        if !confirmed {
            println!("Cancelled.");
        }
        Ok(confirmed)
    }
}
