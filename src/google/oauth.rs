//! Google OAuth2 authorization-code flow and token refresh

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";
pub const TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
pub const SCOPES: [&str; 2] = [
    "https://www.googleapis.com/auth/calendar.readonly",
    "https://www.googleapis.com/auth/calendar.events",
];

/// Tokens for one signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub scopes: Vec<String>,
}

impl Credentials {
    /// Treats tokens as expired a minute early so a request doesn't race
    /// the expiry.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => Utc::now() + Duration::seconds(60) >= expires_at,
            None => false,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
    pub scope: Option<String>,
}

impl TokenResponse {
    fn into_credentials(self, previous_refresh_token: Option<String>) -> Credentials {
        Credentials {
            access_token: self.access_token,
            // Google only returns a refresh token on the first consent
            refresh_token: self.refresh_token.or(previous_refresh_token),
            expires_at: self
                .expires_in
                .map(|secs| Utc::now() + Duration::seconds(secs)),
            scopes: self
                .scope
                .map(|s| s.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default(),
        }
    }
}

#[async_trait]
pub trait OAuthProvider: Send + Sync {
    /// Consent page URL carrying `state` for CSRF protection.
    fn authorization_url(&self, state: &str) -> String;

    async fn exchange_code(&self, code: &str) -> Result<Credentials>;

    async fn refresh(&self, credentials: &Credentials) -> Result<Credentials>;
}

#[derive(Clone)]
pub struct GoogleOAuth {
    client: Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    auth_uri: String,
    token_uri: String,
}

impl GoogleOAuth {
    pub fn new(client_id: &str, client_secret: &str, redirect_uri: &str) -> Self {
        Self {
            client: Client::new(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            redirect_uri: redirect_uri.to_string(),
            auth_uri: AUTH_URI.to_string(),
            token_uri: TOKEN_URI.to_string(),
        }
    }

    pub fn with_token_uri(mut self, token_uri: &str) -> Self {
        self.token_uri = token_uri.to_string();
        self
    }

    async fn request_token(&self, params: &[(&str, &str)]) -> Result<TokenResponse> {
        let res = self.client.post(&self.token_uri).form(params).send().await?;
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(anyhow!("Token request failed with {}: {}", status, body));
        }
        Ok(res.json::<TokenResponse>().await?)
    }
}

#[async_trait]
impl OAuthProvider for GoogleOAuth {
    fn authorization_url(&self, state: &str) -> String {
        format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&access_type=offline&include_granted_scopes=true&state={}",
            self.auth_uri,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_uri),
            urlencoding::encode(&SCOPES.join(" ")),
            urlencoding::encode(state)
        )
    }

    async fn exchange_code(&self, code: &str) -> Result<Credentials> {
        let token = self
            .request_token(&[
                ("code", code),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .await?;
        Ok(token.into_credentials(None))
    }

    async fn refresh(&self, credentials: &Credentials) -> Result<Credentials> {
        let refresh_token = credentials
            .refresh_token
            .as_deref()
            .ok_or(anyhow!("No refresh token available"))?;
        let token = self
            .request_token(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ])
            .await?;
        Ok(token.into_credentials(credentials.refresh_token.clone()))
    }
}

/// Returns an access token that is good to use, refreshing first when
/// the current one has expired. `on_refresh` receives the new
/// credentials so the caller can persist them.
pub async fn access_token<F>(
    provider: &dyn OAuthProvider,
    credentials: &Credentials,
    on_refresh: F,
) -> Result<String>
where
    F: FnOnce(&Credentials),
{
    if !credentials.is_expired() || credentials.refresh_token.is_none() {
        return Ok(credentials.access_token.clone());
    }

    tracing::debug!("Access token expired, refreshing");
    let refreshed = provider.refresh(credentials).await?;
    on_refresh(&refreshed);
    Ok(refreshed.access_token)
}
