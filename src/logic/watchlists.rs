//! Watchlist selection rules
//!
//! Pure functions deciding which remote watchlists the hall plan may use and
//! what the automatically created one looks like.

use serde_json::Value;

use crate::api::{NewWatchlist, Watchlist, ACTION_ADD_ENTRY, ACTION_REMOVE_ENTRY};

pub const HALLPLAN_WATCHLIST_NAME: &str = "Hallenplan (2025 - automatisch erstellt)";
pub const HALLPLAN_WATCHLIST_DESCRIPTION: &str =
    "Automatisch generierte Watchlist für den Hallenplan";
pub const HALLPLAN_LABEL: &str = "hallplan";
pub const WATCHLIST_ICON: &str = "star";

/// A watchlist is usable only if the session may both add and remove entries
pub fn is_eligible(watchlist: &Watchlist) -> bool {
    let has = |action: &str| watchlist.actions.iter().any(|a| a == action);
    has(ACTION_ADD_ENTRY) && has(ACTION_REMOVE_ENTRY)
}

/// Keep only eligible watchlists, preserving server order
pub fn eligible_watchlists(watchlists: Vec<Watchlist>) -> Vec<Watchlist> {
    watchlists.into_iter().filter(is_eligible).collect()
}

/// Body for the watchlist created when the account has no eligible one
pub fn hallplan_watchlist_request() -> NewWatchlist {
    NewWatchlist {
        name: HALLPLAN_WATCHLIST_NAME.to_string(),
        icon: WATCHLIST_ICON.to_string(),
        description: HALLPLAN_WATCHLIST_DESCRIPTION.to_string(),
        labels: vec![HALLPLAN_LABEL.to_string()],
    }
}

/// Body for a watchlist the user names in the selector's create form
pub fn named_watchlist_request(name: &str) -> NewWatchlist {
    NewWatchlist {
        name: name.trim().to_string(),
        icon: WATCHLIST_ICON.to_string(),
        description: String::new(),
        labels: vec![HALLPLAN_LABEL.to_string()],
    }
}

/// Extract the new watchlist id from a create response (`id`, else `watchlistId`)
pub fn created_watchlist_id(body: &Value) -> Option<String> {
    ["id", "watchlistId"].iter().find_map(|field| match body.get(*field) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn watchlist(id: &str, actions: &[&str]) -> Watchlist {
        Watchlist {
            id: id.to_string(),
            name: format!("List {}", id),
            description: None,
            actions: actions.iter().map(|a| a.to_string()).collect(),
            labels: None,
        }
    }

    #[test]
    fn test_eligible_requires_both_actions() {
        assert!(is_eligible(&watchlist("a", &["addEntry", "removeEntry", "delete"])));
        assert!(!is_eligible(&watchlist("b", &["addEntry"])));
        assert!(!is_eligible(&watchlist("c", &["removeEntry"])));
        assert!(!is_eligible(&watchlist("d", &[])));
    }

    #[test]
    fn test_eligible_watchlists_keeps_order() {
        let lists = vec![
            watchlist("1", &["addEntry", "removeEntry"]),
            watchlist("2", &["read"]),
            watchlist("3", &["removeEntry", "addEntry"]),
        ];
        let ids: Vec<String> = eligible_watchlists(lists).into_iter().map(|w| w.id).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_created_id_prefers_id() {
        assert_eq!(
            created_watchlist_id(&json!({"id": "w1", "watchlistId": "w2"})),
            Some("w1".to_string())
        );
    }

    #[test]
    fn test_created_id_falls_back_to_watchlist_id() {
        assert_eq!(
            created_watchlist_id(&json!({"watchlistId": 99})),
            Some("99".to_string())
        );
        assert_eq!(created_watchlist_id(&json!({"id": ""})), None);
        assert_eq!(created_watchlist_id(&json!({})), None);
    }

    #[test]
    fn test_hallplan_request_shape() {
        let body = serde_json::to_value(hallplan_watchlist_request()).unwrap();
        assert_eq!(body["name"], HALLPLAN_WATCHLIST_NAME);
        assert_eq!(body["icon"], "star");
        assert_eq!(body["labels"], json!(["hallplan"]));
    }

    #[test]
    fn test_named_request_trims() {
        assert_eq!(named_watchlist_request("  Favoriten  ").name, "Favoriten");
    }
}
