/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::sharedstreams::parsers::{
    from_null_to_default, from_null_to_empty_str, from_numeric_str, from_rfc3339_or_epoch,
};
use crate::sharedstreams::{AssetType, JoinKey};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One rendered resolution of a photo or video.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Derivative {
    #[serde(default, deserialize_with = "from_null_to_empty_str")]
    pub checksum: String,

    #[serde(default, deserialize_with = "from_numeric_str")]
    pub file_size: u64,

    #[serde(default, deserialize_with = "from_numeric_str")]
    pub width: u32,

    #[serde(default, deserialize_with = "from_numeric_str")]
    pub height: u32,

    /// Resolved download URL, unset until enriched
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Holds a single item of a shared stream as returned by `webstream`.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    #[serde(default, deserialize_with = "from_null_to_empty_str")]
    pub photo_guid: String,

    #[serde(default, deserialize_with = "from_null_to_empty_str")]
    pub batch_guid: String,

    #[serde(default, deserialize_with = "from_null_to_empty_str")]
    pub caption: String,

    #[serde(default, deserialize_with = "from_null_to_empty_str")]
    pub contributor_first_name: String,

    #[serde(default, deserialize_with = "from_null_to_empty_str")]
    pub contributor_last_name: String,

    #[serde(default, deserialize_with = "from_null_to_empty_str")]
    pub contributor_full_name: String,

    #[serde(default, deserialize_with = "from_rfc3339_or_epoch")]
    pub date_created: DateTime<Utc>,

    #[serde(default, deserialize_with = "from_rfc3339_or_epoch")]
    pub batch_date_created: DateTime<Utc>,

    #[serde(default, deserialize_with = "from_numeric_str")]
    pub width: u32,

    #[serde(default, deserialize_with = "from_numeric_str")]
    pub height: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_asset_type: Option<String>,

    /// Derivatives keyed by size label, in the order the service sent them
    #[serde(default, deserialize_with = "from_null_to_default")]
    pub derivatives: IndexMap<String, Derivative>,
}

impl Photo {
    pub fn asset_type(&self) -> AssetType {
        AssetType::from_media_asset_type(self.media_asset_type.as_deref())
    }

    /// Derivative with the largest byte size, first encountered wins ties
    pub fn largest_derivative(&self) -> Option<&Derivative> {
        self.derivatives.values().fold(None, |best, d| match best {
            Some(b) if b.file_size >= d.file_size => Some(b),
            _ => Some(d),
        })
    }

    /// Derivative with the smallest byte size, first encountered wins ties
    pub fn smallest_derivative(&self) -> Option<&Derivative> {
        self.derivatives.values().fold(None, |best, d| match best {
            Some(b) if b.file_size <= d.file_size => Some(b),
            _ => Some(d),
        })
    }

    /// Attaches resolved URLs to the derivatives that have a matching entry.
    /// Derivatives without a match keep their URL unset.
    pub fn enrich(&mut self, urls: &HashMap<String, String>, join_key: JoinKey) {
        for (label, derivative) in self.derivatives.iter_mut() {
            let url = match join_key {
                JoinKey::Checksum => urls.get(&derivative.checksum),
                JoinKey::GuidDerivative => urls.get(&format!("{}-{}", self.photo_guid, label)),
            };
            if let Some(url) = url {
                derivative.url = Some(url.clone());
            }
        }
    }
}

/// Joins resolved URLs onto the photos, returned in `guids` order.
pub(crate) fn enrich_photos(
    mut photos: HashMap<String, Photo>,
    guids: &[String],
    urls: &HashMap<String, String>,
    join_key: JoinKey,
) -> Vec<Photo> {
    guids
        .iter()
        .filter_map(|guid| photos.remove(guid))
        .map(|mut photo| {
            photo.enrich(urls, join_key);
            photo
        })
        .collect()
}
