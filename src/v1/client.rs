/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v1::auth::Creds;
use crate::v1::errors::GPhotosError;
use crate::v1::properties::UploadProtocol;
use bytes::Bytes;
use serde::Deserialize;
use serde::de::DeserializeOwned;

// Root Google Photos Library API
pub const API_ORIGIN: &str = "https://photoslibrary.googleapis.com";

/// Directly communicates with the API.
///
/// [`crate::v1::Uploader`] covers the photobooth workflow; this client is
/// the lower level request/response layer underneath it.
#[derive(Debug, Clone)]
pub struct Client {
    creds: Creds,
    origin: String,
    https_client: reqwest::Client,
}

impl Client {
    /// Creates a client instance from an authorized credential
    pub fn new(creds: Creds) -> Self {
        Self::with_origin(creds, API_ORIGIN)
    }

    /// Creates a client instance pointed at a different API origin.
    /// Integration tests use this to talk to a local stand-in service.
    pub fn with_origin(creds: Creds, origin: impl Into<String>) -> Self {
        Self {
            creds,
            origin: origin.into(),
            https_client: reqwest::Client::new(),
        }
    }

    /// API origin requests are issued against
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Credential currently authorizing requests
    pub fn creds(&self) -> &Creds {
        &self.creds
    }

    /// Runs a refresh grant when the held credential is expired.
    /// Returns whether a refresh happened so callers can re-persist.
    pub async fn refresh_creds_if_expired(&mut self) -> Result<bool, GPhotosError> {
        if !self.creds.is_expired() {
            return Ok(false);
        }
        self.creds.refresh(&self.https_client).await?;
        Ok(true)
    }

    /// Performs a get request to the API
    pub async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        params: Option<&ApiParams<'_>>,
    ) -> Result<T, GPhotosError> {
        let req_url = params.map_or(reqwest::Url::parse(url), |v| {
            reqwest::Url::parse_with_params(url, v)
        })?;
        let resp = self
            .https_client
            .get(req_url)
            .bearer_auth(self.creds.access_token())
            .header("Accept", "application/json")
            .send()
            .await?;
        Self::parse_body(resp).await
    }

    /// Performs a get request returning the raw bytes
    pub async fn get_raw(&self, url: &str) -> Result<Bytes, GPhotosError> {
        let resp = self
            .https_client
            .get(url)
            .bearer_auth(self.creds.access_token())
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(GPhotosError::ApiResponse(
                resp.status().as_u16(),
                "download failed".to_string(),
            ));
        }
        Ok(resp.bytes().await?)
    }

    /// Performs a post request with a JSON body to the API
    pub async fn post<T: DeserializeOwned>(
        &self,
        url: &str,
        data: Vec<u8>,
    ) -> Result<T, GPhotosError> {
        let resp = self
            .https_client
            .post(url)
            .bearer_auth(self.creds.access_token())
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .body(data)
            .send()
            .await?;
        Self::parse_body(resp).await
    }

    /// Sends raw picture bytes and returns the opaque upload token for them.
    ///
    /// The transfer headers are scoped to this single request.
    pub async fn upload_bytes(&self, file_name: &str, data: Bytes) -> Result<String, GPhotosError> {
        let req_url = url::Url::parse(&self.origin)?.join("/v1/uploads")?;
        let protocol: &str = UploadProtocol::Raw.into();
        let resp = self
            .https_client
            .post(req_url)
            .bearer_auth(self.creds.access_token())
            .header("Content-type", "application/octet-stream")
            .header("X-Goog-Upload-Protocol", protocol)
            .header("X-Goog-Upload-File-Name", file_name)
            .body(data)
            .send()
            .await?;

        let status = resp.status();
        let token = resp.text().await?;
        if !status.is_success() || token.is_empty() {
            return Err(GPhotosError::Transfer(format!(
                "status {status}, body {token:?}"
            )));
        }
        Ok(token)
    }

    // Decodes a response, mapping non success statuses onto the error
    // envelope the API wraps failures in
    async fn parse_body<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, GPhotosError> {
        let status = resp.status();
        if !status.is_success() {
            let msg = match resp.json::<ApiErrorBody>().await {
                Ok(body) => body.error.message.or(body.error.status).unwrap_or_default(),
                Err(_) => String::new(),
            };
            return Err(GPhotosError::ApiResponse(status.as_u16(), msg));
        }
        Ok(resp.json::<T>().await?)
    }
}

/// This can be filter types as well as other parameters the specific API expects
pub type ApiParams<'a> = [(&'a str, &'a str)];

// Error envelope returned for failing calls
#[derive(Deserialize, Debug)]
struct ApiErrorBody {
    error: ApiErrorStatus,
}

#[derive(Deserialize, Debug)]
struct ApiErrorStatus {
    #[serde(default)]
    message: Option<String>,

    #[serde(default)]
    status: Option<String>,
}
