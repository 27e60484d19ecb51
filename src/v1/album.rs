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
use async_stream::try_stream;
use futures::Stream;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Holds information returned from the albums API.
///
/// See [Google Photos API Docs](https://developers.google.com/photos/library/reference/rest/v1/albums)
/// for more details on the individual fields.
#[derive(Serialize, Deserialize, Debug)]
pub struct Album {
    pub id: String,

    pub title: Option<String>,

    #[serde(rename = "productUrl")]
    pub product_url: Option<String>,

    #[serde(rename = "isWriteable")]
    pub is_writeable: Option<bool>,

    #[serde(
        default,
        rename = "mediaItemsCount",
        deserialize_with = "from_int64_str"
    )]
    pub media_items_count: Option<u64>,

    #[serde(
        default,
        rename = "coverPhotoBaseUrl",
        deserialize_with = "from_empty_str_to_none"
    )]
    pub cover_photo_base_url: Option<String>,

    #[serde(rename = "coverPhotoMediaItemId")]
    pub cover_photo_media_item_id: Option<String>,
}

impl Album {
    const BASE_URI: &'static str = "/v1/albums";

    /// Retrieves the albums visible to the authorized user as a stream.
    ///
    /// Pages are fetched lazily while the stream is driven and every album
    /// of a page is yielded in the order the service returned it. The walk
    /// ends when no continuation token comes back, or when a response has
    /// no album list at all.
    pub fn list(
        client: &Client,
        app_created_only: bool,
    ) -> impl Stream<Item = Result<Album, GPhotosError>> {
        let exclude = if app_created_only { "true" } else { "false" };

        // Page through and retrieve the albums and return them as a stream.
        try_stream! {
            let req_url = url::Url::parse(client.origin())?.join(Self::BASE_URI)?;
            let mut page_token: Option<String> = None;

            loop {
                let mut params: Vec<(&str, &str)> =
                    vec![("excludeNonAppCreatedData", exclude)];
                if let Some(token) = page_token.as_deref() {
                    params.push(("pageToken", token));
                }

                let resp = client
                    .get::<AlbumsResponse>(req_url.as_str(), Some(&params))
                    .await?;

                // A response without an album list ends the walk even when
                // a continuation token came back with it
                let Some(albums) = resp.albums else {
                    break;
                };
                for album in albums {
                    yield album;
                }

                match resp.next_page_token {
                    Some(token) if !token.is_empty() => page_token = Some(token),
                    _ => break,
                }
            }
        }
    }

    /// Creates a new album owned by this app with the given title
    pub async fn create(client: &Client, title: &str) -> Result<Album, GPhotosError> {
        let req_url = url::Url::parse(client.origin())?.join(Self::BASE_URI)?;
        let data = serde_json::to_vec(&json!({"album": {"title": title}}))?;
        client.post::<Album>(req_url.as_str(), data).await
    }
}

// Expected response for an album list request
#[derive(Deserialize, Debug)]
struct AlbumsResponse {
    albums: Option<Vec<Album>>,

    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
}
