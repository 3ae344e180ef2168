use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use crate::api::{Watchlist, WatchlistApi};
use crate::services::favorites::{FavoritesSync, WatchlistPicker};
use crate::services::preferences::PreferenceStore;

/// Events and calls from the hall plan into the sync service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncCommand {
    /// Host finished loading; resolve the watchlist and load favorites
    Ready,

    /// A marker (exhibitor) was clicked; toggles its favorite state
    MarkerClicked(String),

    AddFavorite(String),

    RemoveFavorite(String),

    /// Open the selector to switch to another watchlist
    ChangeWatchlist,

    /// Re-fetch all entries of the current watchlist
    Resync,

    /// A call made outside the service hit the expiry sentinel
    SessionExpired,
}

/// A pending "pick one watchlist" request, answered through `reply`
#[derive(Debug)]
pub struct SelectionRequest {
    pub watchlists: Vec<Watchlist>,
    pub preselected: Option<String>,
    pub reply: oneshot::Sender<String>,
}

/// Messages from the sync service back to the hall plan
#[derive(Debug)]
pub enum SyncNotice {
    /// Initial favorite set after `Ready`
    InitFavorites(Vec<String>),

    /// Favorite set after an add/remove/resync/watchlist change
    FavoritesChanged(Vec<String>),

    /// A watchlist was chosen explicitly; offer the change affordance
    ShowChangeWatchlist,

    /// No token, or no watchlist could be resolved
    Unavailable,

    /// Block on a user choice
    ChooseWatchlist(SelectionRequest),

    /// The session token expired; nothing further will be sent
    SessionExpired,
}

/// Picker that forwards the choice to the UI and waits for its answer
pub struct ChannelPicker {
    notices: mpsc::UnboundedSender<SyncNotice>,
}

impl ChannelPicker {
    pub fn new(notices: mpsc::UnboundedSender<SyncNotice>) -> Self {
        Self { notices }
    }
}

#[async_trait]
impl WatchlistPicker for ChannelPicker {
    async fn pick(
        &self,
        watchlists: Vec<Watchlist>,
        preselected: Option<String>,
    ) -> Result<String> {
        let (reply, answer) = oneshot::channel();
        self.notices
            .send(SyncNotice::ChooseWatchlist(SelectionRequest {
                watchlists,
                preselected,
                reply,
            }))
            .map_err(|_| anyhow!("Hall plan is gone"))?;

        answer.await.context("Watchlist selection was abandoned")
    }
}

/// Sync service worker: applies commands one at a time
pub struct SyncService<A: WatchlistApi, S: PreferenceStore> {
    sync: FavoritesSync<A, S>,
    picker: ChannelPicker,
    notices: mpsc::UnboundedSender<SyncNotice>,
}

impl<A: WatchlistApi, S: PreferenceStore> SyncService<A, S> {
    pub fn new(sync: FavoritesSync<A, S>, notices: mpsc::UnboundedSender<SyncNotice>) -> Self {
        Self {
            sync,
            picker: ChannelPicker::new(notices.clone()),
            notices,
        }
    }

    pub fn sync(&self) -> &FavoritesSync<A, S> {
        &self.sync
    }

    fn notify(&self, notice: SyncNotice) {
        let _ = self.notices.send(notice);
    }

    pub async fn handle(&mut self, command: SyncCommand) {
        debug!("Sync command: {:?}", command);

        if self.sync.is_expired() {
            debug!("Session expired, dropping {:?}", command);
            return;
        }

        match command {
            SyncCommand::Ready => {
                let resolved = self.sync.resolve_watchlist_id(&self.picker).await;
                if self.sync.is_expired() {
                    return;
                }
                if resolved.is_none() {
                    info!("No watchlist resolved, favorites disabled");
                    self.notify(SyncNotice::Unavailable);
                    return;
                }
                if self.sync.show_change_watchlist() {
                    self.notify(SyncNotice::ShowChangeWatchlist);
                }
                let favorites = self.sync.sync_all().await;
                if !self.sync.is_expired() {
                    self.notify(SyncNotice::InitFavorites(favorites));
                }
            }

            SyncCommand::MarkerClicked(exhibitor_id) => {
                if self.sync.toggle_favorite(&exhibitor_id).await {
                    self.notify(SyncNotice::FavoritesChanged(self.sync.favorite_ids()));
                }
            }

            SyncCommand::AddFavorite(exhibitor_id) => {
                if self.sync.add_favorite(&exhibitor_id).await {
                    self.notify(SyncNotice::FavoritesChanged(self.sync.favorite_ids()));
                }
            }

            SyncCommand::RemoveFavorite(exhibitor_id) => {
                if self.sync.remove_favorite(&exhibitor_id).await {
                    self.notify(SyncNotice::FavoritesChanged(self.sync.favorite_ids()));
                }
            }

            SyncCommand::ChangeWatchlist => {
                if let Some(favorites) = self.sync.change_watchlist(&self.picker).await {
                    if !self.sync.is_expired() {
                        self.notify(SyncNotice::ShowChangeWatchlist);
                        self.notify(SyncNotice::FavoritesChanged(favorites));
                    }
                }
            }

            SyncCommand::SessionExpired => {
                self.sync.expire();
            }

            SyncCommand::Resync => {
                if self.sync.watchlist_id().is_none() {
                    return;
                }
                let favorites = self.sync.sync_all().await;
                if !self.sync.is_expired() {
                    self.notify(SyncNotice::FavoritesChanged(favorites));
                }
            }
        }
    }
}

/// Spawn the sync service worker
///
/// Commands are processed strictly in order, so an add/remove never overlaps
/// a full resync. Dropping the command sender stops the worker.
pub fn spawn_sync_service<A, S>(
    sync: FavoritesSync<A, S>,
    notices: mpsc::UnboundedSender<SyncNotice>,
) -> mpsc::UnboundedSender<SyncCommand>
where
    A: WatchlistApi + 'static,
    S: PreferenceStore + 'static,
{
    let (command_tx, mut command_rx) = mpsc::unbounded_channel::<SyncCommand>();

    tokio::spawn(async move {
        let mut service = SyncService::new(sync, notices);

        while let Some(command) = command_rx.recv().await {
            service.handle(command).await;
        }

        debug!("Sync service stopped");
    });

    command_tx
}
