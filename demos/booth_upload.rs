/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

extern crate gphotos;

use anyhow::Result;
use dotenvy::dotenv;
use gphotos::v1::{ClientIdentity, ConsentFlow, Creds, GPhotosError, Uploader};
use std::path::PathBuf;

// This demo only consumes tokens that were already granted; run any of the
// stock Google OAuth2 helper tools once to produce the token cache file.
struct CacheOnlyConsent;

#[async_trait::async_trait]
impl ConsentFlow for CacheOnlyConsent {
    async fn authorize(
        &self,
        _identity: &ClientIdentity,
        _scopes: &[&str],
    ) -> Result<Creds, GPhotosError> {
        Err(GPhotosError::Auth(
            "no token cache found, authorize this app out of band first".to_string(),
        ))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    // The client identity file is downloaded from the Google API console
    // for an OAuth2 "Desktop app" client
    let identity_file = std::env::var("GPHOTOS_CLIENT_ID_FILE")?;
    let token_cache: Option<PathBuf> = std::env::var("GPHOTOS_TOKEN_CACHE").ok().map(Into::into);

    let picture = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: booth_upload <picture> [album]"))?;
    let album = std::env::args().nth(2).unwrap_or_else(|| "Pibooth".to_string());

    let mut uploader = Uploader::new(identity_file, token_cache, Box::new(CacheOnlyConsent)).await;

    let media_id = uploader.upload(&picture, &album).await?;
    println!("Uploaded {picture} as media item {media_id}");

    // The returned url expires after roughly an hour
    let url = uploader.get_temporary_url(&media_id).await?;
    println!("View it for a while at: {url}");

    Ok(())
}
