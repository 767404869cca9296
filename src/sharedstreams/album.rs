/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::sharedstreams::errors::SharedAlbumError;
use crate::sharedstreams::parsers::{
    from_null_to_default, from_null_to_empty_str, from_numeric_str,
};
use crate::sharedstreams::{ApiClient, Photo};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::HashMap;

const WEBSTREAM_ENDPOINT: &str = "webstream";

/// Album level information returned alongside the photos.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AlbumMetadata {
    #[serde(default, deserialize_with = "from_null_to_empty_str")]
    pub stream_name: String,

    #[serde(default, deserialize_with = "from_null_to_empty_str")]
    pub user_first_name: String,

    #[serde(default, deserialize_with = "from_null_to_empty_str")]
    pub user_last_name: String,

    #[serde(default, deserialize_with = "from_null_to_empty_str")]
    pub stream_ctag: String,

    /// Item count as declared by the service
    #[serde(default, deserialize_with = "from_numeric_str")]
    pub items_returned: u64,

    /// Passed through untouched
    #[serde(default)]
    pub locations: Value,
}

/// A fetched shared album with URL enriched photos in stream order.
#[derive(Serialize, Clone, Debug, Default)]
pub struct Album {
    pub metadata: AlbumMetadata,
    pub photos: Vec<Photo>,
}

impl Album {
    pub fn photo_count(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }
}

/// Photos of a stream before URL enrichment
#[derive(Debug, Default)]
pub(crate) struct StreamContents {
    pub(crate) photos: HashMap<String, Photo>,
    /// Guids in arrival order
    pub(crate) guids: Vec<String>,
    pub(crate) metadata: AlbumMetadata,
}

// Expected response from a webstream request
#[derive(Deserialize, Debug)]
struct WebStreamResponse {
    #[serde(default, deserialize_with = "from_null_to_default")]
    photos: Vec<Photo>,

    #[serde(flatten)]
    metadata: AlbumMetadata,
}

impl WebStreamResponse {
    fn into_contents(self) -> StreamContents {
        let mut contents = StreamContents {
            photos: HashMap::with_capacity(self.photos.len()),
            guids: Vec::with_capacity(self.photos.len()),
            metadata: self.metadata,
        };
        for photo in self.photos {
            if photo.photo_guid.is_empty() {
                warn!("Skipping photo without a guid");
                continue;
            }
            if photo.derivatives.is_empty() {
                warn!("Skipping photo {} without derivatives", photo.photo_guid);
                continue;
            }
            if contents.photos.contains_key(&photo.photo_guid) {
                warn!("Skipping duplicate photo {}", photo.photo_guid);
                continue;
            }
            contents.guids.push(photo.photo_guid.clone());
            contents.photos.insert(photo.photo_guid.clone(), photo);
        }
        contents
    }
}

/// Retrieves the photo list and album metadata from `<base_url>/webstream`.
///
/// Returns the contents and the base URL that answered after any host redirects.
pub(crate) async fn fetch_stream(
    api_client: &ApiClient,
    base_url: &str,
) -> Result<(StreamContents, String), SharedAlbumError> {
    let (resp, base_url) = api_client
        .post::<_, WebStreamResponse>(base_url, WEBSTREAM_ENDPOINT, &json!({"streamCtag": null}))
        .await?;
    let contents = resp.into_contents();
    debug!(
        "Stream `{}` returned {} photos ({} declared)",
        contents.metadata.stream_name,
        contents.guids.len(),
        contents.metadata.items_returned
    );
    Ok((contents, base_url))
}
