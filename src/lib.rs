/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! # GPhotos
//!
//! This library was created for pushing photobooth captures into Google Photos
//! through the Library APIv1 interface.
//!
//! For further details on the Rest API refer to the [Google Photos API Docs](https://developers.google.com/photos/library/reference/rest)
//!
//! ## Features
//!
//! - Upload a picture into a named album
//!     - Two step protocol: raw byte upload followed by media item creation
//!     - Album is resolved case insensitively and created when missing
//!     - Album name to id lookups are cached for the life of the process
//! - Authorized session handling
//!     - Token cache survives process restarts
//!     - Expired access tokens are refreshed ahead of use
//! - Temporary share url for an uploaded media item
//! - Lower level interface for handling the raw communication
//!
//! *The API uses OAuth2. This library refreshes and persists tokens but
//! acquiring the initial user consent is left up to the consumer, plugged in
//! through the [`v1::ConsentFlow`] trait*
//!
//! *If you want to use this library for more than is currently implemented,
//! the [`v1::Client`] is a way to make request/responses in a more direct way*
//!
//! ## Installation
//!
//! ```toml
//! [dependencies]
//! gphotos = "0.3.0"
//! ```
//!
//! ## Usage
//!
//! **You will need an OAuth2 client secrets file from the Google API console
//! prior to using the API**
//!
//! ```rust
//! use gphotos::v1::{ClientIdentity, ConsentFlow, Creds, GPhotosError, Uploader};
//! use std::path::Path;
//!
//!struct MyConsent;
//!
//!#[async_trait::async_trait]
//!impl ConsentFlow for MyConsent {
//!    async fn authorize(
//!        &self,
//!        _identity: &ClientIdentity,
//!        _scopes: &[&str],
//!    ) -> Result<Creds, GPhotosError> {
//!        // Run the browser/device consent of your choice here and hand the
//!        // resulting tokens back as a Creds
//!        Err(GPhotosError::Auth("consent flow not wired up".to_string()))
//!    }
//!}
//!
//!async fn upload_booth_shot(picture: &Path) -> Result<(), GPhotosError> {
//!    // The secrets file identifies this application to the API. The token
//!    // cache lands next to it and is reused across restarts.
//!    let mut uploader = Uploader::new(
//!        "client_id.json",
//!        None,
//!        Box::new(MyConsent),
//!    )
//!    .await;
//!
//!    // Resolves or creates the album, uploads the bytes and attaches them
//!    let media_id = uploader.upload(picture, "Photobooth").await?;
//!
//!    // Short lived url suitable for a QR code or a preview screen
//!    let share_url = uploader.get_temporary_url(&media_id).await?;
//!    println!("uploaded as {media_id}, preview at {share_url}");
//!    Ok(())
//!}
//! ```
//!
pub mod v1;
