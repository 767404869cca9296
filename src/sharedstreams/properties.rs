/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use serde::{Deserialize, Serialize};
use strum_macros::{EnumString, IntoStaticStr};

/// Kind of media a photo entry holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AssetType {
    Image,
    Video,
}

impl AssetType {
    /// Only an explicit `"video"` media asset type is a video
    pub fn from_media_asset_type(media_asset_type: Option<&str>) -> Self {
        match media_asset_type {
            Some("video") => AssetType::Video,
            _ => AssetType::Image,
        }
    }
}

/// Key used to join resolved asset URLs back onto derivatives.
///
/// The `webasseturls` response has been observed keyed by derivative checksum,
/// older clients keyed it by `"{photoGuid}-{derivativeKey}"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, IntoStaticStr)]
pub enum JoinKey {
    #[default]
    #[strum(serialize = "checksum")]
    Checksum,
    #[strum(serialize = "guid-derivative")]
    GuidDerivative,
}
