use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

const API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Server-side cap on `maxResults`
pub const MAX_PAGE_SIZE: u32 = 50;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub fn create_youtube_client() -> Result<Client> {
    Client::builder()
        .user_agent(concat!("tuberecall/", env!("CARGO_PKG_VERSION")))
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("Failed to create HTTP client")
}

pub fn activities_url(page_size: u32, page_token: Option<&str>) -> Result<Url> {
    let mut url = Url::parse(&format!("{}/activities", API_BASE_URL))?;
    url.query_pairs_mut()
        .append_pair("part", "snippet,contentDetails")
        .append_pair("mine", "true")
        .append_pair("maxResults", &page_size.min(MAX_PAGE_SIZE).to_string());
    if let Some(token) = page_token {
        url.query_pairs_mut().append_pair("pageToken", token);
    }
    Ok(url)
}

pub fn next_page_token(page: &Value) -> Option<String> {
    page.get("nextPageToken")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Raw `items` of one list response; a page without items is empty
pub fn page_items(page: &Value) -> Result<Vec<Value>> {
    match page.get("items") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items.clone()),
        Some(_) => Err(anyhow!("activity list response has a non-array `items` field")),
    }
}

async fn get_json(client: &Client, access_token: &str, url: Url, what: &str) -> Result<Value> {
    let response = client
        .get(url)
        .bearer_auth(access_token)
        .header("Accept", "application/json")
        .send()
        .await
        .with_context(|| format!("Failed to fetch {}", what))?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        return Err(anyhow!("Failed to fetch {}: {} - {}", what, status, error_text));
    }

    Ok(response.json().await?)
}

/// Activity items of the signed-in user, newest first, paginated until
/// `max_results` items or the last page.
pub async fn list_activities(client: &Client, access_token: &str, max_results: u32) -> Result<Vec<Value>> {
    let limit = max_results as usize;
    let mut all_items = Vec::new();
    let mut page_token: Option<String> = None;

    while all_items.len() < limit {
        let remaining = (limit - all_items.len()) as u32;
        let url = activities_url(remaining, page_token.as_deref())?;
        let page = get_json(client, access_token, url, "activities").await?;

        let items = page_items(&page)?;
        debug!(page_items = items.len(), total = all_items.len() + items.len(), "Fetched activity page");
        all_items.extend(items);

        page_token = next_page_token(&page);
        if page_token.is_none() {
            break;
        }
    }

    all_items.truncate(limit);
    Ok(all_items)
}

/// Title of the signed-in user's channel; doubles as a token check
pub async fn get_channel_title(client: &Client, access_token: &str) -> Result<String> {
    let mut url = Url::parse(&format!("{}/channels", API_BASE_URL))?;
    url.query_pairs_mut()
        .append_pair("part", "snippet")
        .append_pair("mine", "true");

    let response = get_json(client, access_token, url, "channel").await?;
    let title = response
        .get("items")
        .and_then(|items| items.get(0))
        .and_then(|channel| channel.pointer("/snippet/title"))
        .and_then(Value::as_str)
        .unwrap_or("(no channel)");
    Ok(title.to_string())
}
