use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::config::Session;
use crate::logic::errors::{is_session_expired, SessionExpired};

/// Entries requested per page when listing a watchlist
pub const PAGE_SIZE: u64 = 25;

/// Response header carrying the total number of entries in a watchlist
pub const TOTAL_COUNT_HEADER: &str = "amount-all";

/// Entity type used for exhibitors
pub const ORGANIZATION: &str = "organization";

pub const ACTION_ADD_ENTRY: &str = "addEntry";
pub const ACTION_REMOVE_ENTRY: &str = "removeEntry";

/// Ids come back as strings from some endpoints and as numbers from others
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}

fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let opt = Option::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Watchlist {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Capabilities the current session has on this watchlist
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub actions: Vec<String>,
    #[serde(default)]
    pub labels: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EntryEntity {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(rename = "type", default)]
    pub entity_type: String,
}

/// One exhibitor on a watchlist. `id` is the entry id, not the exhibitor id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FavoriteEntry {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub entity: EntryEntity,
}

impl FavoriteEntry {
    pub fn organization(entry_id: impl Into<String>, exhibitor_id: impl Into<String>) -> Self {
        Self {
            id: entry_id.into(),
            entity: EntryEntity {
                id: exhibitor_id.into(),
                entity_type: ORGANIZATION.to_string(),
            },
        }
    }

    pub fn exhibitor_id(&self) -> &str {
        &self.entity.id
    }
}

/// One page of `GET /watchlists/{id}/entries`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPage {
    pub items: Vec<FavoriteEntry>,
    /// Value of the `amount-all` header, if the server sent one
    pub total_count: Option<u64>,
    pub next_offset: u64,
}

/// Body of `POST /watchlists`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewWatchlist {
    pub name: String,
    pub icon: String,
    pub description: String,
    pub labels: Vec<String>,
}

#[derive(Serialize)]
struct AddEntryRequest<'a> {
    entity: EntityRef<'a>,
}

#[derive(Serialize)]
struct EntityRef<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    entity_type: &'a str,
}

/// Remote watchlist operations used by the favorites sync
///
/// Every implementation must fail with [`SessionExpired`] when a response
/// carries the expiry sentinel.
#[async_trait]
pub trait WatchlistApi: Send + Sync {
    /// `GET /watchlists`, optionally filtered by label
    async fn list_watchlists(&self, label: Option<&str>) -> Result<Vec<Watchlist>>;

    /// `GET /watchlists/{id}`; `Ok(false)` for any non-success status
    async fn watchlist_exists(&self, watchlist_id: &str) -> Result<bool>;

    /// `POST /watchlists`, returning the new watchlist's id
    async fn create_watchlist(&self, request: &NewWatchlist) -> Result<String>;

    /// `GET /watchlists/{id}/entries?limit=..&offset=..`
    async fn list_entries(&self, watchlist_id: &str, offset: u64, limit: u64)
        -> Result<EntryPage>;

    /// `PUT /watchlists/{id}/entries`, returning the entry with its server-assigned id
    async fn add_entry(&self, watchlist_id: &str, exhibitor_id: &str) -> Result<FavoriteEntry>;

    /// `DELETE /watchlists/{id}/entries/{entryId}`, returning the HTTP status
    async fn remove_entry(&self, watchlist_id: &str, entry_id: &str) -> Result<StatusCode>;
}

#[derive(Clone)]
pub struct WatchlistClient {
    base_url: String,
    app_id: String,
    token: Option<String>,
    client: Client,
}

impl WatchlistClient {
    pub fn new(session: &Session) -> Self {
        Self {
            base_url: session.api_base_url.trim_end_matches('/').to_string(),
            app_id: session.app_id.clone(),
            token: session.token.clone(),
            client: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the app id and bearer token to a request
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header("appId", &self.app_id);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Read a response body as JSON and run the expiry check on it.
    ///
    /// Empty or non-JSON bodies come back as `Value::Null`.
    async fn read_body(response: Response) -> Result<Value> {
        let text = response.text().await.context("Failed to read response")?;
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::Null)
        };

        if is_session_expired(&body) {
            return Err(SessionExpired.into());
        }

        Ok(body)
    }
}

#[async_trait]
impl WatchlistApi for WatchlistClient {
    async fn list_watchlists(&self, label: Option<&str>) -> Result<Vec<Watchlist>> {
        let mut url = self.url("/watchlists");
        if let Some(label) = label {
            url.push_str(&format!("?label={}", urlencoding::encode(label)));
        }

        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .context("Failed to fetch watchlists")?;

        let status = response.status();
        let body = Self::read_body(response).await?;
        if !status.is_success() {
            anyhow::bail!("Failed to fetch watchlists: {}", status);
        }

        serde_json::from_value(body).context("Failed to parse watchlists")
    }

    async fn watchlist_exists(&self, watchlist_id: &str) -> Result<bool> {
        let url = self.url(&format!("/watchlists/{}", urlencoding::encode(watchlist_id)));
        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .context("Failed to validate watchlist")?;

        let status = response.status();
        Self::read_body(response).await?;

        Ok(status.is_success())
    }

    async fn create_watchlist(&self, request: &NewWatchlist) -> Result<String> {
        let response = self
            .authorize(self.client.post(self.url("/watchlists")))
            .json(request)
            .send()
            .await
            .context("Failed to create watchlist")?;

        let status = response.status();
        let body = Self::read_body(response).await?;
        if !status.is_success() {
            anyhow::bail!("Failed to create watchlist: {} - {}", status, body);
        }

        crate::logic::watchlists::created_watchlist_id(&body)
            .ok_or_else(|| anyhow::anyhow!("Create watchlist response carried no id"))
    }

    async fn list_entries(
        &self,
        watchlist_id: &str,
        offset: u64,
        limit: u64,
    ) -> Result<EntryPage> {
        let url = self.url(&format!(
            "/watchlists/{}/entries?limit={}&offset={}",
            urlencoding::encode(watchlist_id),
            limit,
            offset
        ));

        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .context("Failed to fetch watchlist entries")?;

        let status = response.status();
        let total_count = crate::logic::favorites::parse_total_count(
            response
                .headers()
                .get(TOTAL_COUNT_HEADER)
                .and_then(|value| value.to_str().ok()),
        );

        let body = Self::read_body(response).await?;
        if !status.is_success() {
            anyhow::bail!("Failed to fetch watchlist entries: {}", status);
        }

        let items: Vec<FavoriteEntry> =
            serde_json::from_value(body).context("Failed to parse watchlist entries")?;
        let next_offset = offset + items.len() as u64;

        Ok(EntryPage {
            items,
            total_count,
            next_offset,
        })
    }

    async fn add_entry(&self, watchlist_id: &str, exhibitor_id: &str) -> Result<FavoriteEntry> {
        let url = self.url(&format!(
            "/watchlists/{}/entries",
            urlencoding::encode(watchlist_id)
        ));

        let request_body = AddEntryRequest {
            entity: EntityRef {
                id: exhibitor_id,
                entity_type: ORGANIZATION,
            },
        };

        let response = self
            .authorize(self.client.put(&url))
            .json(&request_body)
            .send()
            .await
            .context("Failed to add exhibitor to watchlist")?;

        let status = response.status();
        let body = Self::read_body(response).await?;
        if !status.is_success() {
            anyhow::bail!("Failed to add exhibitor to watchlist: {} - {}", status, body);
        }

        // Only the entry id is taken from the response; the entity is ours
        let entry_id = body
            .get("id")
            .and_then(|id| match id {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .ok_or_else(|| anyhow::anyhow!("Add entry response carried no entry id"))?;

        Ok(FavoriteEntry::organization(entry_id, exhibitor_id))
    }

    async fn remove_entry(&self, watchlist_id: &str, entry_id: &str) -> Result<StatusCode> {
        let url = self.url(&format!(
            "/watchlists/{}/entries/{}",
            urlencoding::encode(watchlist_id),
            urlencoding::encode(entry_id)
        ));

        let response = self
            .authorize(self.client.delete(&url))
            .send()
            .await
            .context("Failed to remove exhibitor from watchlist")?;

        let status = response.status();
        Self::read_body(response).await?;

        Ok(status)
    }
}
