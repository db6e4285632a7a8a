//! Google service account authentication
//!
//! Exchanges a self-signed RS256 JWT for an OAuth access token (the
//! two-legged "jwt-bearer" grant) and keeps the token until shortly before it
//! expires.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::store::StoreError;

const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Seconds before expiry at which a cached token is replaced
const REFRESH_MARGIN_SECS: i64 = 60;

/// Fields of a service account key file that the token exchange needs
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    /// Parse a key supplied either as base64-encoded JSON or as raw JSON
    pub fn from_blob(blob: &str) -> Result<Self, StoreError> {
        let blob = blob.trim();

        if let Ok(decoded) = STANDARD.decode(blob) {
            if let Ok(key) = serde_json::from_slice::<ServiceAccountKey>(&decoded) {
                tracing::info!("Using base64-encoded service account credentials");
                return Ok(key);
            }
        }

        let key = serde_json::from_str::<ServiceAccountKey>(blob)
            .map_err(|e| StoreError::Credentials(format!("failed to parse credentials: {}", e)))?;
        tracing::info!("Using JSON service account credentials");
        Ok(key)
    }
}

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

struct CachedToken {
    access_token: String,
    expires_at: i64,
}

/// Issues access tokens for one service account
pub struct TokenProvider {
    http: Client,
    key: ServiceAccountKey,
    signing_key: EncodingKey,
    cached: RwLock<Option<CachedToken>>,
}

impl TokenProvider {
    pub fn new(http: Client, key: ServiceAccountKey) -> Result<Self, StoreError> {
        let signing_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| StoreError::Credentials(format!("invalid private key: {}", e)))?;

        Ok(Self {
            http,
            key,
            signing_key,
            cached: RwLock::new(None),
        })
    }

    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }

    /// A valid access token, fetching a new one when the cached one is close
    /// to expiry
    pub async fn access_token(&self) -> Result<String, StoreError> {
        let now = Utc::now().timestamp();

        if let Some(token) = self.cached.read().await.as_ref() {
            if token.expires_at - REFRESH_MARGIN_SECS > now {
                return Ok(token.access_token.clone());
            }
        }

        let mut cached = self.cached.write().await;
        // Another request may have refreshed while we waited for the lock
        if let Some(token) = cached.as_ref() {
            if token.expires_at - REFRESH_MARGIN_SECS > now {
                return Ok(token.access_token.clone());
            }
        }

        let fresh = self.fetch_token(now).await?;
        let access_token = fresh.access_token.clone();
        *cached = Some(fresh);
        Ok(access_token)
    }

    async fn fetch_token(&self, now: i64) -> Result<CachedToken, StoreError> {
        let claims = Claims {
            iss: &self.key.client_email,
            scope: SHEETS_SCOPE,
            aud: &self.key.token_uri,
            iat: now,
            exp: now + 3600,
        };
        let assertion = jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &self.signing_key)
            .map_err(|e| StoreError::Credentials(format!("failed to sign token request: {}", e)))?;

        let response = self
            .http
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| StoreError::Request(format!("token request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Credentials(format!(
                "token endpoint error: {} - {}",
                status, body
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Request(format!("failed to parse token response: {}", e)))?;

        tracing::debug!("Obtained access token for {}", self.key.client_email);

        Ok(CachedToken {
            access_token: token.access_token,
            expires_at: now + token.expires_in,
        })
    }
}
