/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::sharedstreams::ApiClient;
use crate::sharedstreams::errors::SharedAlbumError;
use crate::sharedstreams::parsers::{from_null_to_default, from_null_to_empty_str};
use futures::{StreamExt, TryStreamExt, stream};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const WEBASSETURLS_ENDPOINT: &str = "webasseturls";

// Body sent to webasseturls
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct AssetUrlsRequest<'a> {
    photo_guids: &'a [String],
}

// Expected response from a webasseturls request
#[derive(Deserialize, Debug)]
struct AssetUrlsResponse {
    #[serde(default, deserialize_with = "from_null_to_default")]
    items: HashMap<String, AssetUrlItem>,
}

#[derive(Deserialize, Debug)]
struct AssetUrlItem {
    #[serde(default, deserialize_with = "from_null_to_empty_str")]
    url_location: String,

    #[serde(default, deserialize_with = "from_null_to_empty_str")]
    url_path: String,
}

impl AssetUrlsResponse {
    fn into_urls(self) -> HashMap<String, String> {
        self.items
            .into_iter()
            .filter_map(|(id, item)| {
                if item.url_location.is_empty() || item.url_path.is_empty() {
                    debug!("Ignoring incomplete URL entry for {}", id);
                    return None;
                }
                let url = format!("https://{}{}", item.url_location, item.url_path);
                Some((id, url))
            })
            .collect()
    }
}

/// Splits the guids into request sized chunks. A zero size is treated as one.
pub(crate) fn chunk_guids(guids: &[String], chunk_size: usize) -> std::slice::Chunks<'_, String> {
    guids.chunks(chunk_size.max(1))
}

async fn fetch_chunk(
    api_client: &ApiClient,
    base_url: &str,
    chunk: &[String],
) -> Result<HashMap<String, String>, SharedAlbumError> {
    debug!("Requesting URLs for {} photos", chunk.len());
    let (resp, _) = api_client
        .post::<_, AssetUrlsResponse>(
            base_url,
            WEBASSETURLS_ENDPOINT,
            &AssetUrlsRequest { photo_guids: chunk },
        )
        .await?;
    Ok(resp.into_urls())
}

/// Resolves download URLs for all guids, keyed by the identifiers the service
/// answers with. Any failing chunk fails the whole lookup.
pub(crate) async fn fetch_asset_urls(
    api_client: &ApiClient,
    base_url: &str,
    guids: &[String],
) -> Result<HashMap<String, String>, SharedAlbumError> {
    let config = api_client.config();
    stream::iter(chunk_guids(guids, config.chunk_size))
        .map(|chunk| fetch_chunk(api_client, base_url, chunk))
        .buffer_unordered(config.chunk_concurrency.max(1))
        .try_fold(HashMap::new(), |mut urls, chunk_urls| async move {
            urls.extend(chunk_urls);
            Ok(urls)
        })
        .await
}
