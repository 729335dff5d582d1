use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};
use url::Url;

const AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const READONLY_SCOPE: &str = "https://www.googleapis.com/auth/youtube.readonly";

/// OAuth client from a Google Cloud `client_secrets.json`
#[derive(Debug, Clone, Deserialize)]
pub struct ClientSecrets {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default)]
    pub auth_uri: Option<String>,
    #[serde(default)]
    pub token_uri: Option<String>,
}

impl ClientSecrets {
    fn authorize_endpoint(&self) -> &str {
        self.auth_uri.as_deref().unwrap_or(AUTHORIZE_URL)
    }

    fn token_endpoint(&self) -> &str {
        self.token_uri.as_deref().unwrap_or(TOKEN_URL)
    }
}

#[derive(Debug, Deserialize)]
struct ClientSecretsFile {
    installed: Option<ClientSecrets>,
    web: Option<ClientSecrets>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    // Google omits this on refresh
    refresh_token: Option<String>,
    expires_in: i64,
}

#[derive(Debug)]
pub struct TokenInfo {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: DateTime<Utc>,
}

pub fn parse_client_secrets(content: &str) -> Result<ClientSecrets> {
    let file: ClientSecretsFile =
        serde_json::from_str(content).context("client secrets file is not valid JSON")?;
    file.installed
        .or(file.web)
        .ok_or_else(|| anyhow!("client secrets file has neither an `installed` nor a `web` section"))
}

pub fn load_client_secrets(path: &Path) -> Result<ClientSecrets> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read client secrets from {}", path.display()))?;
    parse_client_secrets(&content)
}

pub fn redirect_uri(port: u16) -> String {
    format!("http://localhost:{}", port)
}

pub fn authorization_url(secrets: &ClientSecrets, redirect_uri: &str) -> Result<Url> {
    let url = Url::parse_with_params(
        secrets.authorize_endpoint(),
        &[
            ("response_type", "code"),
            ("client_id", secrets.client_id.as_str()),
            ("redirect_uri", redirect_uri),
            ("scope", READONLY_SCOPE),
            ("access_type", "offline"),
            ("prompt", "consent"),
        ],
    )
    .context("Invalid authorization endpoint")?;
    Ok(url)
}

/// Authorization code from whatever the user pasted: the full redirect URL
/// (`http://localhost:8080/?code=...`) or the bare code.
pub fn parse_authorization_input(input: &str) -> Result<String> {
    let input = input.trim();
    if input.is_empty() {
        return Err(anyhow!("Authorization code cannot be empty"));
    }

    if let Ok(url) = Url::parse(input) {
        let mut code = None;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "code" => code = Some(value.into_owned()),
                "error" => return Err(anyhow!("Authorization was denied: {}", value)),
                _ => {}
            }
        }
        return code
            .filter(|c| !c.is_empty())
            .ok_or_else(|| anyhow!("No authorization code found in the pasted URL"));
    }

    Ok(input.to_string())
}

fn token_info(response: TokenResponse, previous_refresh: Option<&str>) -> TokenInfo {
    let expires_at = Utc::now() + Duration::seconds((response.expires_in - 120).max(0));
    TokenInfo {
        access_token: response.access_token,
        refresh_token: response
            .refresh_token
            .or_else(|| previous_refresh.map(str::to_string)),
        expires_at,
    }
}

pub async fn authenticate(
    client: &Client,
    secrets: &ClientSecrets,
    redirect_port: u16,
    refresh_token: Option<&str>,
) -> Result<TokenInfo> {
    if let Some(refresh_token) = refresh_token {
        match refresh_access_token(client, secrets, refresh_token).await {
            Ok(token_info) => return Ok(token_info),
            Err(e) => {
                warn!("Token refresh failed, starting a new authorization: {}", e);
            }
        }
    }

    authorize_new(client, secrets, redirect_port).await
}

async fn refresh_access_token(
    client: &Client,
    secrets: &ClientSecrets,
    refresh_token: &str,
) -> Result<TokenInfo> {
    let response = client
        .post(secrets.token_endpoint())
        .form(&[
            ("client_id", secrets.client_id.as_str()),
            ("client_secret", secrets.client_secret.as_str()),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ])
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(anyhow!("Token refresh failed: {}", response.status()));
    }

    let token_response: TokenResponse = response.json().await?;
    info!("Refreshed YouTube access token");
    Ok(token_info(token_response, Some(refresh_token)))
}

async fn authorize_new(client: &Client, secrets: &ClientSecrets, redirect_port: u16) -> Result<TokenInfo> {
    let redirect_uri = redirect_uri(redirect_port);
    let auth_url = authorization_url(secrets, &redirect_uri)?;

    println!("\nPlease visit the following URL to authorize read-only access to your YouTube account:");
    println!("{}\n", auth_url);
    println!(
        "After approving, your browser is sent to {} (the page may fail to load).",
        redirect_uri
    );

    use std::io::{self, Write};
    print!("Paste the full redirected URL or the authorization code: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let code = parse_authorization_input(&input)?;

    let response = client
        .post(secrets.token_endpoint())
        .form(&[
            ("code", code.as_str()),
            ("client_id", secrets.client_id.as_str()),
            ("client_secret", secrets.client_secret.as_str()),
            ("redirect_uri", redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ])
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        return Err(anyhow!(
            "Failed to exchange authorization code: {} - {}",
            status,
            error_text
        ));
    }

    let token_response: TokenResponse = response.json().await?;
    Ok(token_info(token_response, None))
}
