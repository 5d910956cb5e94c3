//! Bearer tokens for the document store.
//!
//! A service-account key signs an RS256 JWT which is exchanged at the key's
//! `token_uri` for a short-lived access token. Tokens are cached until shortly
//! before they expire.

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::credentials::ServiceAccountKey;
use super::document::truncate;
use crate::config::TimeoutConfig;
use crate::persistence::ResultExt;
use taskstreak_domain::shared::DomainError;

const DATASTORE_SCOPE: &str = "https://www.googleapis.com/auth/datastore";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Bearer accepted by the local emulator.
const EMULATOR_BEARER: &str = "owner";

#[derive(Debug, Serialize, Deserialize)]
struct ServiceAccountClaims {
    iss: String,
    scope: String,
    aud: String,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    ASSERTION_LIFETIME_SECS as u64
}

struct CachedToken {
    token: String,
    expires_at: Instant,
}

pub enum TokenSource {
    Emulator,
    ServiceAccount(ServiceAccountAuth),
}

impl TokenSource {
    pub fn service_account(key: ServiceAccountKey) -> Result<Self, DomainError> {
        Ok(Self::ServiceAccount(ServiceAccountAuth::new(key)?))
    }

    pub async fn bearer(&self) -> Result<String, DomainError> {
        match self {
            TokenSource::Emulator => Ok(EMULATOR_BEARER.to_string()),
            TokenSource::ServiceAccount(auth) => auth.access_token().await,
        }
    }
}

impl std::fmt::Debug for TokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenSource::Emulator => f.write_str("TokenSource::Emulator"),
            TokenSource::ServiceAccount(auth) => f
                .debug_tuple("TokenSource::ServiceAccount")
                .field(&auth.key.client_email)
                .finish(),
        }
    }
}

pub struct ServiceAccountAuth {
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    client: reqwest::Client,
    cached: Mutex<Option<CachedToken>>,
}

impl ServiceAccountAuth {
    pub fn new(key: ServiceAccountKey) -> Result<Self, DomainError> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes()).map_err(|e| {
            DomainError::Validation(format!("Failed to parse service account key: {}", e))
        })?;

        let timeouts = TimeoutConfig::global();
        let client = reqwest::Client::builder()
            .timeout(timeouts.http_request)
            .connect_timeout(timeouts.http_connect)
            .build()
            .to_infra_err()?;

        info!(
            client_email = %key.client_email,
            token_uri = %key.token_uri,
            "Service account auth initialized"
        );

        Ok(Self {
            key,
            encoding_key,
            client,
            cached: Mutex::new(None),
        })
    }

    /// Cached access token, refreshed when close to expiry.
    pub async fn access_token(&self) -> Result<String, DomainError> {
        let mut cached = self.cached.lock().await;

        if let Some(ref token) = *cached {
            if Instant::now() < token.expires_at {
                return Ok(token.token.clone());
            }
        }

        let fresh = self.exchange().await?;
        let token = fresh.token.clone();
        *cached = Some(fresh);
        Ok(token)
    }

    fn sign_assertion(&self) -> Result<String, DomainError> {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();

        let iat = chrono::Utc::now().timestamp();
        let claims = ServiceAccountClaims {
            iss: self.key.client_email.clone(),
            scope: DATASTORE_SCOPE.to_string(),
            aud: self.key.token_uri.clone(),
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };

        jsonwebtoken::encode(&header, &claims, &self.encoding_key)
            .map_err(|e| DomainError::Infrastructure(format!("JWT signing failed: {}", e)))
    }

    async fn exchange(&self) -> Result<CachedToken, DomainError> {
        let assertion = self.sign_assertion()?;

        let response = self
            .client
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .to_store_err("Token exchange")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::StoreUnavailable(format!(
                "Token exchange rejected with status {}: {}",
                status,
                truncate(&body, 300)
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .to_store_err("Token exchange response")?;

        let lifetime = Duration::from_secs(token.expires_in)
            .saturating_sub(TimeoutConfig::global().token_refresh_margin);
        debug!("Access token refreshed, valid for {}s", lifetime.as_secs());

        Ok(CachedToken {
            token: token.access_token,
            expires_at: Instant::now() + lifetime,
        })
    }
}
