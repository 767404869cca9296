/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::sharedstreams::album::fetch_stream;
use crate::sharedstreams::asset_urls::fetch_asset_urls;
use crate::sharedstreams::errors::SharedAlbumError;
use crate::sharedstreams::photo::enrich_photos;
use crate::sharedstreams::{Album, ApiClient, ClientConfig, ShareToken};
use log::info;
use std::sync::Arc;

/// Entry point for reading iCloud shared albums.
///
/// Cloning is cheap, clones share the underlying connection pool.
///
/// ```no_run
/// use icloud_shared_album::sharedstreams::Client;
///
/// # async fn run() -> Result<(), icloud_shared_album::sharedstreams::SharedAlbumError> {
/// let client = Client::new()?;
/// let album = client.album("B0BGWZuqDGKsRNa").await?;
/// println!("{} has {} photos", album.metadata.stream_name, album.photo_count());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    api_client: Arc<ApiClient>,
}

impl Client {
    /// Creates a client using the default settings
    pub fn new() -> Result<Self, SharedAlbumError> {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Result<Self, SharedAlbumError> {
        Ok(Self {
            api_client: Arc::new(ApiClient::new(config)?),
        })
    }

    /// Retrieves the album for the provided share token
    pub async fn album(&self, token: &str) -> Result<Album, SharedAlbumError> {
        let token = ShareToken::parse(token)?;
        let base_url = self.api_client.base_url_for(&token);
        let base_url = self.api_client.resolve_base_url(&base_url).await?;
        self.album_from_base_url(&base_url).await
    }

    /// Retrieves the album served at an already resolved stream base URL
    pub async fn album_from_base_url(&self, base_url: &str) -> Result<Album, SharedAlbumError> {
        let (contents, base_url) = fetch_stream(&self.api_client, base_url).await?;
        let urls = fetch_asset_urls(&self.api_client, &base_url, &contents.guids).await?;
        let photos = enrich_photos(
            contents.photos,
            &contents.guids,
            &urls,
            self.api_client.config().join_key,
        );
        info!(
            "Fetched album `{}` with {} photos and {} resolved URLs",
            contents.metadata.stream_name,
            photos.len(),
            urls.len()
        );
        Ok(Album {
            metadata: contents.metadata,
            photos,
        })
    }
}
