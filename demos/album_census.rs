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
use futures::{StreamExt, pin_mut};
use gphotos::v1::{Album, Client, Creds};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    // Reuses the token cache written by a prior authorized run
    let token_cache: PathBuf = std::env::var("GPHOTOS_TOKEN_CACHE")?.into();
    let creds = Creds::from_file(&token_cache)?;
    let client = Client::new(creds);

    // Walk the app created albums and tally their sizes
    let albums = Album::list(&client, true);
    pin_mut!(albums);

    let mut total: u64 = 0;
    while let Some(album) = albums.next().await {
        let album = album?;
        let count = album.media_items_count.unwrap_or(0);
        println!(
            "{:<40} {:>6} items  (id {})",
            album.title.unwrap_or_default(),
            count,
            album.id
        );
        total += count;
    }
    println!("Total media items across app created albums: {total}");

    Ok(())
}
