/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v1::client::Client;
use crate::v1::errors::GPhotosError;
use crate::v1::parsers::{from_empty_str_to_none, from_int64_str};
use crate::v1::properties::RpcCode;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

/// Holds information returned from the mediaItems API.
///
/// See [Google Photos API Docs](https://developers.google.com/photos/library/reference/rest/v1/mediaItems)
/// for more details on the individual fields.
#[derive(Deserialize, Debug)]
pub struct MediaItem {
    pub id: String,

    #[serde(default, deserialize_with = "from_empty_str_to_none")]
    pub description: Option<String>,

    #[serde(rename = "productUrl")]
    pub product_url: Option<String>,

    #[serde(rename = "baseUrl")]
    pub base_url: Option<String>,

    #[serde(rename = "mimeType")]
    pub mime_type: Option<String>,

    pub filename: Option<String>,

    #[serde(rename = "mediaMetadata")]
    pub media_metadata: Option<MediaMetadata>,
}

/// Media specific details like capture time and pixel dimensions
#[derive(Deserialize, Debug)]
pub struct MediaMetadata {
    #[serde(rename = "creationTime")]
    pub creation_time: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "from_int64_str")]
    pub width: Option<u64>,

    #[serde(default, deserialize_with = "from_int64_str")]
    pub height: Option<u64>,
}

impl MediaItem {
    const BASE_URI: &'static str = "/v1/mediaItems/";

    /// Returns information for the specified media item id
    pub async fn from_id(client: &Client, id: &str) -> Result<Self, GPhotosError> {
        let req_url = url::Url::parse(client.origin())?
            .join(Self::BASE_URI)?
            .join(id)?;
        client.get::<MediaItem>(req_url.as_str(), None).await
    }

    /// Attaches previously uploaded bytes as a new media item, optionally
    /// placing it into an album.
    ///
    /// The service reports one result row per requested item; the first
    /// row's status decides whether the picture was accepted.
    pub async fn batch_create(
        client: &Client,
        album_id: Option<&str>,
        upload_token: &str,
        description: &str,
    ) -> Result<MediaItem, GPhotosError> {
        let req_url = url::Url::parse(client.origin())?.join("/v1/mediaItems:batchCreate")?;

        let mut body = json!({
            "newMediaItems": [{
                "description": description,
                "simpleMediaItem": {"uploadToken": upload_token},
            }],
        });
        if let Some(album_id) = album_id {
            body.as_object_mut()
                .ok_or(GPhotosError::JsonSerialization(
                    "batchCreate body is not a JSON object".to_string(),
                ))?
                .insert("albumId".to_string(), json!(album_id));
        }
        let data = serde_json::to_vec(&body)?;

        let resp = client
            .post::<BatchCreateResponse>(req_url.as_str(), data)
            .await?;
        let result = resp
            .new_media_item_results
            .and_then(|mut rows| {
                if rows.is_empty() {
                    None
                } else {
                    Some(rows.remove(0))
                }
            })
            .ok_or(GPhotosError::MediaCreate(
                "response has no newMediaItemResults".to_string(),
            ))?;

        match result.status.rpc_code()? {
            RpcCode::Ok => result.media_item.ok_or(GPhotosError::ResponseMissing()),
            rejection => Err(GPhotosError::MediaCreate(format!(
                "{rejection:?}: {}",
                result.status.message.unwrap_or_default()
            ))),
        }
    }

    /// Fetches the picture bytes behind this media item's base url.
    ///
    /// Base urls stay valid for roughly an hour after being handed out.
    pub async fn download(&self, client: &Client) -> Result<Bytes, GPhotosError> {
        let base_url = self
            .base_url
            .as_ref()
            .ok_or(GPhotosError::ResponseMissing())?;
        // "=d" asks for the original bytes instead of a scaled preview
        client.get_raw(&format!("{base_url}=d")).await
    }
}

/// Per item outcome row of a batchCreate call
#[derive(Deserialize, Debug)]
pub struct NewMediaItemResult {
    #[serde(rename = "uploadToken")]
    pub upload_token: Option<String>,

    #[serde(default)]
    pub status: ItemStatus,

    #[serde(rename = "mediaItem")]
    pub media_item: Option<MediaItem>,
}

/// google.rpc status attached to each batchCreate result
#[derive(Deserialize, Debug, Default)]
pub struct ItemStatus {
    pub code: Option<i32>,
    pub message: Option<String>,
}

impl ItemStatus {
    /// Maps the numeric code onto the google.rpc code table.
    /// An absent code reads as [`RpcCode::Ok`].
    pub fn rpc_code(&self) -> Result<RpcCode, GPhotosError> {
        Ok(RpcCode::try_from(self.code.unwrap_or(0))?)
    }
}

// Expected response for a batchCreate request
#[derive(Deserialize, Debug)]
struct BatchCreateResponse {
    #[serde(rename = "newMediaItemResults")]
    new_media_item_results: Option<Vec<NewMediaItemResult>>,
}
