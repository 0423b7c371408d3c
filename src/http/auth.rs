//! Token Provider
//!
//! Exchanges application credentials for a bearer token and reuses it until
//! it is close to expiry.

use chrono::{DateTime, Duration, Utc};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::{ClientError, Result};

/// Tokens are valid for 24 hours; refresh an hour early.
const TOKEN_LIFETIME_HOURS: i64 = 23;

/// Application id and secret registered with CFTools Cloud.
#[derive(Clone)]
pub struct LoginCredentials {
    pub application_id: String,
    pub secret: String,
}

impl LoginCredentials {
    pub fn new(application_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            application_id: application_id.into(),
            secret: secret.into(),
        }
    }
}

impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("application_id", &self.application_id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    application_id: &'a str,
    secret: &'a str,
}

#[derive(Debug, Deserialize)]
struct RegisterResponse {
    token: String,
}

#[derive(Debug, Clone)]
struct IssuedToken {
    token: String,
    valid_until: DateTime<Utc>,
}

// == Token Provider ==
pub struct TokenProvider {
    http: Client,
    register_url: Url,
    credentials: LoginCredentials,
    /// Async lock so concurrent callers wait for one registration
    current: Mutex<Option<IssuedToken>>,
}

impl TokenProvider {
    pub fn new(http: Client, base_url: &Url, credentials: LoginCredentials) -> Result<Self> {
        let register_url = base_url
            .join("v1/auth/register")
            .map_err(|e| ClientError::Request(format!("invalid base url: {}", e)))?;

        Ok(Self {
            http,
            register_url,
            credentials,
            current: Mutex::new(None),
        })
    }

    /// Returns a valid token, registering again if none is held or it ran out.
    pub async fn provide_token(&self) -> Result<String> {
        let mut current = self.current.lock().await;

        if let Some(issued) = current.as_ref() {
            if Utc::now() < issued.valid_until {
                return Ok(issued.token.clone());
            }
            debug!("CFTools token expired, registering again");
        }

        let issued = self.register().await?;
        let token = issued.token.clone();
        *current = Some(issued);
        Ok(token)
    }

    async fn register(&self) -> Result<IssuedToken> {
        info!(application_id = %self.credentials.application_id, "Registering with CFTools Cloud");

        let response = self
            .http
            .post(self.register_url.clone())
            .json(&RegisterRequest {
                application_id: &self.credentials.application_id,
                secret: &self.credentials.secret,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::from_status(status, &body));
        }

        let body: RegisterResponse = response.json().await?;
        Ok(IssuedToken {
            token: body.token,
            valid_until: Utc::now() + Duration::hours(TOKEN_LIFETIME_HOURS),
        })
    }
}
