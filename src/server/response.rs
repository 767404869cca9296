/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::sharedstreams::{Album, AssetType, Derivative, Photo};
use serde::{Deserialize, Serialize};

/// Simplified photo returned by `GET /album/{key}`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    pub caption: String,
    pub full_image_url: String,
    pub thumbnail_url: String,
    pub asset_type: AssetType,
}

/// Error body for 4xx/5xx responses
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl From<&Photo> for ImageResponse {
    fn from(photo: &Photo) -> Self {
        let url_of = |d: Option<&Derivative>| {
            d.and_then(|d| d.url.clone()).unwrap_or_default()
        };
        Self {
            caption: photo.caption.clone(),
            full_image_url: url_of(photo.largest_derivative()),
            thumbnail_url: url_of(photo.smallest_derivative()),
            asset_type: photo.asset_type(),
        }
    }
}

/// Simplified photo list ordered by creation time, oldest first
pub fn image_responses(album: &Album) -> Vec<ImageResponse> {
    let mut photos: Vec<&Photo> = album.photos.iter().collect();
    photos.sort_by_key(|p| p.date_created);
    photos.into_iter().map(ImageResponse::from).collect()
}
