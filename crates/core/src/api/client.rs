use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::{config::AppConfig, models::GameDetails};

use super::{FetchError, GameSource};

/// Header naming the RapidAPI host.
pub const HOST_HEADER: &str = "x-rapidapi-host";
/// Header carrying the RapidAPI key.
pub const KEY_HEADER: &str = "x-rapidapi-key";

/// Thin client for `GET /game?id=<id>`.
#[derive(Debug, Clone)]
pub struct GameApi {
    client: Client,
    base_url: String,
    host: String,
    key: String,
}

/// Envelope the API returns instead of a game when the id is unknown.
#[derive(Debug, Deserialize)]
struct ApiNotice {
    status_message: String,
}

impl GameApi {
    /// Build a client from configuration.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            host: config.api_host.clone(),
            key: config.api_key.clone(),
        })
    }

    /// Endpoint URL without the query string.
    pub fn endpoint(&self) -> String {
        format!("{}/game", self.base_url)
    }

    /// Request details for `id`.
    pub async fn game(&self, id: &str) -> Result<GameDetails, FetchError> {
        let url = self.endpoint();
        debug!(game_id = id, url = %url, "requesting game details");

        let response = self
            .client
            .get(&url)
            .query(&[("id", id)])
            .header(HOST_HEADER, &self.host)
            .header(KEY_HEADER, &self.key)
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;
        debug!(game_id = id, status = %status, bytes = body.len(), "game details response");

        let notice = serde_json::from_slice::<ApiNotice>(&body).ok();
        if !status.is_success() {
            return Err(match notice {
                Some(notice) if status == StatusCode::NOT_FOUND => FetchError::NotFound {
                    id: id.to_string(),
                    message: notice.status_message,
                },
                _ => FetchError::Status { status },
            });
        }
        if let Some(notice) = notice {
            return Err(FetchError::NotFound {
                id: id.to_string(),
                message: notice.status_message,
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

impl GameSource for GameApi {
    async fn fetch_game(&self, id: &str) -> Result<GameDetails, FetchError> {
        self.game(id).await
    }
}
