/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v1::album::Album;
use crate::v1::auth::{ClientIdentity, ConsentFlow, Creds, SCOPES};
use crate::v1::client::{API_ORIGIN, Client};
use crate::v1::errors::GPhotosError;
use crate::v1::media_item::MediaItem;
use bytes::Bytes;
use futures::{StreamExt, pin_mut};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

// Probe target for the reachability check
pub const PROBE_ORIGIN: &str = "https://www.google.com/";

// Reachability probes give up after this long
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

// Token cache written next to the identity file when no path is given
const DEFAULT_TOKEN_CACHE: &str = "google_credentials.dat";

/// Origins the uploader talks to.
///
/// Defaults target the live service; integration tests point both at a
/// local stand-in.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub api_origin: String,
    pub probe_origin: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            api_origin: API_ORIGIN.to_string(),
            probe_origin: PROBE_ORIGIN.to_string(),
        }
    }
}

/// Uploads photobooth pictures into a named Google Photos album.
///
/// Keeps the authorized session and the album name to id cache between
/// uploads and survives process restarts through the on disk token cache.
/// One uploader drives one upload at a time; nothing runs in the
/// background between calls.
pub struct Uploader {
    identity: Option<ClientIdentity>,
    token_cache: PathBuf,
    consent: Box<dyn ConsentFlow>,
    https_client: reqwest::Client,
    client: Option<Client>,
    album_ids: HashMap<String, String>,
    endpoints: Endpoints,
}

impl Uploader {
    /// Creates an uploader from the OAuth2 client secrets file.
    ///
    /// A missing or unreadable secrets file deactivates the uploader for
    /// the life of the process instead of failing; every later operation
    /// then reports [`GPhotosError::Deactivated`] without touching the
    /// network. When `token_cache` is `None` the cache lands next to the
    /// secrets file.
    pub async fn new(
        identity_file: impl AsRef<Path>,
        token_cache: Option<PathBuf>,
        consent: Box<dyn ConsentFlow>,
    ) -> Self {
        Self::with_endpoints(identity_file, token_cache, consent, Endpoints::default()).await
    }

    /// Creates an uploader talking to the given origins
    pub async fn with_endpoints(
        identity_file: impl AsRef<Path>,
        token_cache: Option<PathBuf>,
        consent: Box<dyn ConsentFlow>,
        endpoints: Endpoints,
    ) -> Self {
        let identity_file = identity_file.as_ref();
        let identity = match ClientIdentity::from_file(identity_file) {
            Ok(identity) => Some(identity),
            Err(err) => {
                log::error!(
                    "Can not load the client identity file {identity_file:?}, uploads are disabled - {err}"
                );
                None
            }
        };
        let token_cache = token_cache.unwrap_or_else(|| {
            identity_file
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default()
                .join(DEFAULT_TOKEN_CACHE)
        });

        let mut uploader = Self {
            identity,
            token_cache,
            consent,
            https_client: reqwest::Client::new(),
            client: None,
            album_ids: HashMap::new(),
            endpoints,
        };

        // The session comes up at construction when the service is
        // reachable; a failure here is logged and retried on first use
        if uploader.identity.is_some() && uploader.is_reachable().await {
            if let Err(err) = uploader.ensure_client().await {
                log::warn!("Session setup deferred - {err}");
            }
        }
        uploader
    }

    /// Whether a usable client identity was loaded
    pub fn is_activated(&self) -> bool {
        self.identity.is_some()
    }

    /// Whether the service can be reached right now.
    ///
    /// Only a completed round trip counts; the response status does not
    /// matter. Transport failures read as unreachable.
    pub async fn is_reachable(&self) -> bool {
        let resp = self
            .https_client
            .head(&self.endpoints.probe_origin)
            .timeout(PROBE_TIMEOUT)
            .send()
            .await;
        match resp {
            Ok(_) => true,
            Err(err) => {
                log::warn!("No internet connection - {err}");
                false
            }
        }
    }

    /// Resolves an album title to its id, case insensitively.
    ///
    /// Hits the process local cache first and otherwise walks the app
    /// created albums, caching every title seen along the way. The first
    /// album carrying a given normalized title wins; later duplicates are
    /// ignored.
    pub async fn get_album_id(&mut self, name: &str) -> Result<Option<String>, GPhotosError> {
        let wanted = name.to_lowercase();
        if let Some(id) = self.album_ids.get(&wanted) {
            return Ok(Some(id.clone()));
        }

        self.ensure_client().await?;
        let client = self.client.as_ref().ok_or(GPhotosError::SessionMissing())?;

        let albums = Album::list(client, true);
        pin_mut!(albums);
        while let Some(album) = albums.next().await {
            let album = album?;
            let Some(title) = album.title else {
                continue;
            };
            let key = title.to_lowercase();
            let found = key == wanted;
            let id = self.album_ids.entry(key).or_insert(album.id).clone();
            if found {
                return Ok(Some(id));
            }
        }
        Ok(None)
    }

    /// Creates a new app owned album and caches its id
    pub async fn create_album(&mut self, name: &str) -> Result<String, GPhotosError> {
        self.ensure_client().await?;
        let client = self.client.as_ref().ok_or(GPhotosError::SessionMissing())?;

        let album = Album::create(client, name).await.map_err(|err| {
            log::error!("Can not create the album '{name}' - {err}");
            GPhotosError::AlbumCreate(err.to_string())
        })?;
        log::info!("Album '{name}' created with id {}", album.id);
        let id = self
            .album_ids
            .entry(name.to_lowercase())
            .or_insert(album.id)
            .clone();
        Ok(id)
    }

    /// Uploads one picture and places it into the named album, creating the
    /// album when it does not exist yet. An empty `album_name` leaves the
    /// picture in the library without an album.
    ///
    /// Returns the new media item id. Every failure is terminal for this
    /// picture; nothing is retried.
    pub async fn upload(
        &mut self,
        picture: impl AsRef<Path>,
        album_name: &str,
    ) -> Result<String, GPhotosError> {
        let picture = picture.as_ref();

        if !self.is_activated() {
            log::error!("Uploads are deactivated, check the client identity file");
            return Err(GPhotosError::Deactivated());
        }
        if !self.is_reachable().await {
            log::error!("Upload of {picture:?} skipped, service is not reachable");
            return Err(GPhotosError::Unreachable());
        }
        self.ensure_client().await?;

        let album_id = if album_name.is_empty() {
            log::debug!("No album name given, the picture goes to the library only");
            None
        } else {
            match self.get_album_id(album_name).await? {
                Some(id) => {
                    log::info!("Uploading into EXISTING photo album '{album_name}'");
                    Some(id)
                }
                None => {
                    log::info!("Uploading into NEW photo album '{album_name}'");
                    Some(self.create_album(album_name).await?)
                }
            }
        };

        let data = std::fs::read(picture)
            .map_err(|err| GPhotosError::SourceRead(picture.to_path_buf(), err))?;
        let file_name = picture
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let client = self.client.as_ref().ok_or(GPhotosError::SessionMissing())?;
        let upload_token = client
            .upload_bytes(&file_name, Bytes::from(data))
            .await
            .map_err(|err| {
                log::error!("Can not upload the picture {file_name} - {err}");
                err
            })?;
        let media_item = MediaItem::batch_create(client, album_id.as_deref(), &upload_token, "")
            .await
            .map_err(|err| {
                log::error!("Can not create a media item for {file_name} - {err}");
                err
            })?;

        log::info!("Picture {file_name} added to the photo library");
        Ok(media_item.id)
    }

    /// Returns a short lived url for viewing the uploaded media item.
    ///
    /// The service keeps these urls valid for roughly one hour; fetch a
    /// fresh one instead of storing it.
    pub async fn get_temporary_url(&mut self, media_id: &str) -> Result<String, GPhotosError> {
        self.ensure_client().await?;
        let client = self.client.as_ref().ok_or(GPhotosError::SessionMissing())?;

        let item = MediaItem::from_id(client, media_id).await.map_err(|err| {
            log::warn!("Can not get a temporary url for media item {media_id} - {err}");
            err
        })?;
        item.base_url.ok_or_else(|| {
            log::warn!("Media item {media_id} came back without a base url");
            GPhotosError::ResponseMissing()
        })
    }

    // Establishes or revalidates the authorized session: cached tokens
    // first, the consent flow when no cache exists at all, one refresh
    // grant ahead of use when the held credential expired.
    async fn ensure_client(&mut self) -> Result<(), GPhotosError> {
        let identity = self.identity.as_ref().ok_or(GPhotosError::Deactivated())?;

        if self.client.is_none() {
            let cache_exists = self
                .token_cache
                .metadata()
                .map(|meta| meta.len() > 0)
                .unwrap_or(false);

            let creds = if cache_exists {
                Creds::from_file(&self.token_cache).map_err(|err| {
                    log::error!("Error loading auth tokens, incorrect format - {err}");
                    GPhotosError::Auth("token cache has an incorrect format".to_string())
                })?
            } else {
                log::info!("No cached auth tokens, running the consent flow");
                let creds = self.consent.authorize(identity, &SCOPES).await.map_err(|err| {
                    log::error!("Consent flow failed - {err}");
                    err
                })?;
                self.persist_creds(&creds);
                creds
            };
            self.client = Some(Client::with_origin(
                creds,
                self.endpoints.api_origin.clone(),
            ));
        }

        // Single refresh ahead of use when the held credential expired
        if let Some(client) = self.client.as_mut() {
            if client.refresh_creds_if_expired().await? {
                let creds = client.creds().clone();
                self.persist_creds(&creds);
            }
        }
        Ok(())
    }

    // Best effort persistence; losing the cache only costs a future consent
    fn persist_creds(&self, creds: &Creds) {
        if let Err(err) = creds.save(&self.token_cache) {
            log::debug!("Can not save auth tokens - {err}");
        }
    }
}

impl std::fmt::Debug for Uploader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Uploader")
            .field("activated", &self.identity.is_some())
            .field("token_cache", &self.token_cache)
            .field("cached_albums", &self.album_ids.len())
            .finish()
    }
}
