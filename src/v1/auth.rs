/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v1::errors::GPhotosError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// OAuth2 scopes requested for album and sharing access
pub const SCOPES: [&str; 2] = [
    "https://www.googleapis.com/auth/photoslibrary",
    "https://www.googleapis.com/auth/photoslibrary.sharing",
];

/// Application identity loaded from the OAuth2 client secrets file.
///
/// The file is the `client_secret.json` downloaded from the Google API
/// console and nests the identity under an `installed` or `web` key.
#[derive(Deserialize, Clone)]
pub struct ClientIdentity {
    pub client_id: String,
    pub client_secret: String,
    pub token_uri: String,
    pub auth_uri: Option<String>,
}

impl ClientIdentity {
    /// Loads the identity from a client secrets file
    pub fn from_file(path: &Path) -> Result<Self, GPhotosError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let parsed: ClientIdentityFile = serde_json::from_reader(reader)?;
        parsed.installed.or(parsed.web).ok_or(GPhotosError::Auth(
            "client secrets file has no installed or web section".to_string(),
        ))
    }
}

impl std::fmt::Debug for ClientIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientIdentity")
            .field("client_id", &self.client_id)
            .field("client_secret", &"xxx")
            .field("token_uri", &self.token_uri)
            .field("auth_uri", &self.auth_uri)
            .finish()
    }
}

// Outer shape of the client secrets file
#[derive(Deserialize)]
struct ClientIdentityFile {
    installed: Option<ClientIdentity>,
    web: Option<ClientIdentity>,
}

/// OAuth2 credential authorizing API requests.
///
/// The persisted form carries exactly the seven token fields below; expiry
/// is process local, so a freshly loaded credential reads as not expired
/// until a refresh establishes it again.
#[derive(Serialize, Deserialize, Clone)]
pub struct Creds {
    pub(crate) token: String,

    pub(crate) refresh_token: Option<String>,

    pub(crate) id_token: Option<String>,

    #[serde(default)]
    pub(crate) scopes: Vec<String>,

    pub(crate) token_uri: String,
    pub(crate) client_id: String,
    pub(crate) client_secret: String,

    #[serde(skip)]
    pub(crate) expiry: Option<DateTime<Utc>>,
}

impl Creds {
    /// Builds a credential from already acquired tokens
    pub fn from_tokens(
        identity: &ClientIdentity,
        access_token: &str,
        refresh_token: Option<&str>,
    ) -> Self {
        Self {
            token: access_token.to_string(),
            refresh_token: refresh_token.map(String::from),
            id_token: None,
            scopes: SCOPES.iter().map(|s| s.to_string()).collect(),
            token_uri: identity.token_uri.clone(),
            client_id: identity.client_id.clone(),
            client_secret: identity.client_secret.clone(),
            expiry: None,
        }
    }

    /// Marks when the access token stops being accepted
    pub fn with_expiry(mut self, expiry: DateTime<Utc>) -> Self {
        self.expiry = Some(expiry);
        self
    }

    /// Loads a previously persisted credential
    pub fn from_file(path: &Path) -> Result<Self, GPhotosError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Persists the credential for later runs
    pub fn save(&self, path: &Path) -> Result<(), GPhotosError> {
        let data = serde_json::to_string(self)?;
        std::fs::write(path, data).map_err(GPhotosError::CachePersist)
    }

    /// An expired credential needs a refresh grant before further use.
    /// Unknown expiry reads as still valid.
    pub fn is_expired(&self) -> bool {
        self.expiry.is_some_and(|expiry| expiry <= Utc::now())
    }

    /// Access token requests are authorized with
    pub fn access_token(&self) -> &str {
        &self.token
    }

    /// Scopes this credential was granted for
    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    // Exchanges the refresh token for a new access token at the token
    // endpoint. Rotated refresh/id tokens replace the held ones.
    pub(crate) async fn refresh(
        &mut self,
        https_client: &reqwest::Client,
    ) -> Result<(), GPhotosError> {
        let refresh_token = self
            .refresh_token
            .clone()
            .ok_or(GPhotosError::Auth("credential has no refresh token".to_string()))?;
        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token.as_str()),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];
        let resp = https_client
            .post(self.token_uri.as_str())
            .form(&params)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let msg = resp.text().await.unwrap_or_default();
            return Err(GPhotosError::Auth(format!(
                "token refresh was rejected: {status} {msg}"
            )));
        }

        let grant = resp.json::<RefreshGrant>().await?;
        self.token = grant.access_token;
        self.expiry = Some(Utc::now() + chrono::Duration::seconds(grant.expires_in));
        if grant.refresh_token.is_some() {
            self.refresh_token = grant.refresh_token;
        }
        if grant.id_token.is_some() {
            self.id_token = grant.id_token;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Creds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Creds")
            .field("token", &"xxx")
            .field("refresh_token", &"xxx")
            .field("id_token", &"xxx")
            .field("scopes", &self.scopes)
            .field("token_uri", &self.token_uri)
            .field("client_id", &self.client_id)
            .field("client_secret", &"xxx")
            .field("expiry", &self.expiry)
            .finish()
    }
}

// Token endpoint response for a refresh grant
#[derive(Deserialize, Debug)]
struct RefreshGrant {
    access_token: String,
    expires_in: i64,
    refresh_token: Option<String>,
    id_token: Option<String>,
}

/// Interactive authorization capability supplied by the consumer.
///
/// Acquiring user consent (browser flow, device flow, ...) is left up to
/// the consumer of this library; the uploader invokes this once when no
/// usable token cache exists and persists whatever comes back.
#[async_trait]
pub trait ConsentFlow: Send + Sync {
    /// Runs the consent flow and returns the authorized credential
    async fn authorize(
        &self,
        identity: &ClientIdentity,
        scopes: &[&str],
    ) -> Result<Creds, GPhotosError>;
}
