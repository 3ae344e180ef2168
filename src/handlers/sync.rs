//! Sync Notice Handler
//!
//! Applies notices from the background sync service to the model.

use tracing::{debug, warn};

use crate::i18n::t;
use crate::model::Model;
use crate::services::sync::SyncNotice;
use crate::SyncStatus;

/// Handle a notice from the sync service
///
/// Notice types:
/// - InitFavorites: host initialization with the resolved favorite set
/// - FavoritesChanged: favorite set after a mutation or resync
/// - ShowChangeWatchlist: offer the change-watchlist key
/// - Unavailable: fall back to the legacy seed list
/// - ChooseWatchlist: open the selector modal
/// - SessionExpired: block behind the reload notice
pub fn handle_sync_notice(model: &mut Model, notice: SyncNotice) {
    match notice {
        SyncNotice::InitFavorites(favorites) => {
            debug!("Initializing {} favorites", favorites.len());
            model.hallplan.init_favorites(favorites);
        }

        SyncNotice::FavoritesChanged(favorites) => {
            model.hallplan.init_favorites(favorites);
        }

        SyncNotice::ShowChangeWatchlist => {
            model.ui.show_change_watchlist = true;
        }

        SyncNotice::Unavailable => {
            model.hallplan.mark_unavailable();
        }

        SyncNotice::ChooseWatchlist(request) => {
            if request.watchlists.is_empty() {
                let text = t(model.ui.language, "noWatchlistsFound").to_string();
                model.ui.show_toast(text);
            }
            if let Err(e) = model.ui.selector.show(request) {
                warn!("Watchlist selector: {}", e);
            }
        }

        SyncNotice::SessionExpired => {
            model.hallplan.sync_status = SyncStatus::Expired;
            model.ui.session_expired = true;
        }
    }
}
