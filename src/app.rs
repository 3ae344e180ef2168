//! Application runtime
//!
//! Owns the model plus the channels to the sync service. Rebuilt from scratch
//! on reload, which is the only way past an expired session.

use anyhow::Result;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::api::WatchlistClient;
use crate::config::{load_config, LaunchParams, Session};
use crate::i18n::Language;
use crate::model::Model;
use crate::services::favorites::FavoritesSync;
use crate::services::preferences::PreferenceDb;
use crate::services::sync::{spawn_sync_service, SyncCommand, SyncNotice};

/// Everything needed to (re)start the app
#[derive(Debug, Clone, Default)]
pub struct AppOptions {
    pub config_path: Option<PathBuf>,
    /// Launch parameters given on the command line; override the config file
    pub overrides: LaunchParams,
    pub language: Option<Language>,
}

pub struct App {
    pub model: Model,

    pub(crate) client: WatchlistClient,
    commands: mpsc::UnboundedSender<SyncCommand>,
    notices: mpsc::UnboundedReceiver<SyncNotice>,
    options: AppOptions,
}

impl App {
    /// Load config, build the session and start the sync service.
    ///
    /// Must be called inside a tokio runtime.
    pub fn start(options: AppOptions) -> Result<Self> {
        let config = load_config(options.config_path.as_deref())?;
        let launch = config.launch_params().merge(options.overrides.clone());
        let session = Session::from_launch(&launch, &config);

        info!(
            "Starting hall plan against {} (authenticated: {})",
            session.api_base_url,
            session.is_authenticated()
        );

        let store = match &config.preferences_path {
            Some(path) => PreferenceDb::open(path)?,
            None => PreferenceDb::new()?,
        };

        let client = WatchlistClient::new(&session);
        let (notice_tx, notice_rx) = mpsc::unbounded_channel();
        let sync = FavoritesSync::new(&session, client.clone(), store, notice_tx.clone())
            .with_label(config.label.clone());
        let commands = spawn_sync_service(sync, notice_tx);

        let language = options.language.unwrap_or_else(Language::detect);
        let model = Model::new(config.exhibitors, launch.favorites, language);

        let app = Self {
            model,
            client,
            commands,
            notices: notice_rx,
            options,
        };

        // The hall plan is ready as soon as it exists
        app.send(SyncCommand::Ready);

        Ok(app)
    }

    /// Re-read config and start over with a fresh session
    pub fn reload(&mut self) -> Result<()> {
        info!("Reloading hall plan");
        let mut options = self.options.clone();
        options.language = Some(self.model.ui.language);
        *self = App::start(options)?;
        Ok(())
    }

    pub fn send(&self, command: SyncCommand) {
        if self.commands.send(command).is_err() {
            warn!("Sync service is not running");
        }
    }

    /// Drain pending sync notices into the model without blocking
    pub fn process_notices(&mut self) {
        while let Ok(notice) = self.notices.try_recv() {
            crate::handlers::handle_sync_notice(&mut self.model, notice);
        }
    }
}
