use crate::error::SourceError;
use crate::traits::HistorySource;
use crate::youtube::api;
use crate::youtube::auth::{self, ClientSecrets};
use anyhow::{anyhow, Result};
use chrono::{Duration, Utc};
use reqwest::Client;
use serde_json::Value;
use std::path::PathBuf;
use tracing::info;
use yt_history_config::{CredentialStore, YouTubeConfig};
use yt_history_models::SourceKind;

/// YouTube Data API fallback source
pub struct YouTubeClient {
    client: Client,
    secrets: ClientSecrets,
    redirect_port: u16,
    max_results: u32,
    credentials_file: PathBuf,
    access_token: Option<String>,
    channel_title: Option<String>,
}

impl YouTubeClient {
    pub fn from_config(config: &YouTubeConfig, credentials_file: PathBuf) -> Result<Self> {
        let secrets_file = config
            .client_secrets_file
            .as_ref()
            .ok_or_else(|| anyhow!("youtube.client_secrets_file is not configured"))?;
        let secrets = auth::load_client_secrets(secrets_file)?;

        Ok(Self {
            client: api::create_youtube_client()?,
            secrets,
            redirect_port: config.redirect_port,
            max_results: config.max_results,
            credentials_file,
            access_token: None,
            channel_title: None,
        })
    }

    pub async fn authenticate(&mut self) -> Result<()> {
        let mut cred_store = CredentialStore::new(self.credentials_file.clone());
        cred_store.load()?;

        if let Some(saved_token) = cred_store.get_youtube_access_token() {
            // No expiry recorded means we just try the token
            let fresh = cred_store
                .get_youtube_token_expires()
                .map(|expires_at| expires_at > Utc::now() + Duration::minutes(5))
                .unwrap_or(true);

            if fresh {
                match api::get_channel_title(&self.client, saved_token).await {
                    Ok(title) => {
                        self.access_token = Some(saved_token.clone());
                        info!(channel = %title, "Using saved YouTube access token");
                        self.channel_title = Some(title);
                        return Ok(());
                    }
                    Err(_) => {
                        info!("Saved YouTube token appears invalid, attempting refresh");
                    }
                }
            } else {
                info!("YouTube access token expired or expiring soon, refreshing");
            }
        }

        let refresh_token = cred_store.get_youtube_refresh_token().cloned();
        let token_info = auth::authenticate(
            &self.client,
            &self.secrets,
            self.redirect_port,
            refresh_token.as_deref(),
        )
        .await?;

        let title = api::get_channel_title(&self.client, &token_info.access_token).await?;

        cred_store.set_youtube_access_token(token_info.access_token.clone());
        if let Some(refresh) = token_info.refresh_token {
            cred_store.set_youtube_refresh_token(refresh);
        }
        cred_store.set_youtube_token_expires(token_info.expires_at);
        cred_store.save()?;

        self.access_token = Some(token_info.access_token);
        info!(channel = %title, "Authenticated to YouTube");
        self.channel_title = Some(title);
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn channel_title(&self) -> Option<&str> {
        self.channel_title.as_deref()
    }

    fn access_token(&self) -> Result<&str> {
        self.access_token.as_deref().ok_or_else(|| anyhow!("Not authenticated"))
    }

    pub async fn fetch_activities(&self) -> Result<Vec<Value>> {
        let items = api::list_activities(&self.client, self.access_token()?, self.max_results).await?;
        info!(count = items.len(), max_results = self.max_results, "Fetched YouTube activities");
        Ok(items)
    }
}

#[async_trait::async_trait]
impl HistorySource for YouTubeClient {
    type Error = SourceError;

    fn source_name(&self) -> &str {
        "youtube"
    }

    fn kind(&self) -> SourceKind {
        SourceKind::YouTubeApi
    }

    async fn authenticate(&mut self) -> Result<(), Self::Error> {
        YouTubeClient::authenticate(self).await.map_err(SourceError::from)
    }

    fn is_authenticated(&self) -> bool {
        YouTubeClient::is_authenticated(self)
    }

    async fn fetch_payload(&self) -> Result<Value, Self::Error> {
        Ok(Value::Array(self.fetch_activities().await?))
    }
}
