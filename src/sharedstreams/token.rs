/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::sharedstreams::errors::SharedAlbumError;
use std::fmt;

const BASE62_CHARSET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Path suffix every shared stream endpoint lives under
pub(crate) const SHARED_STREAMS_PATH: &str = "sharedstreams";

/// Decodes a base-62 string, most significant digit first.
///
/// Returns `None` when the input is empty, contains a character outside of
/// `0-9A-Za-z` or overflows.
pub fn base62_decode(s: &str) -> Option<u64> {
    if s.is_empty() {
        return None;
    }
    s.bytes().try_fold(0u64, |acc, c| {
        let digit = BASE62_CHARSET.iter().position(|&v| v == c)? as u64;
        acc.checked_mul(62)?.checked_add(digit)
    })
}

/// Public share token taken from an iCloud shared album link.
///
/// The leading characters select the server partition that hosts the album.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareToken {
    raw: String,
    partition: u64,
}

impl ShareToken {
    /// Parses and validates a raw share token
    pub fn parse(raw: &str) -> Result<Self, SharedAlbumError> {
        let bytes = raw.as_bytes();
        let digits = match bytes.first() {
            None => return Err(SharedAlbumError::InvalidToken("token is empty".into())),
            Some(b'A') => raw.get(1..2),
            Some(_) => raw.get(1..3),
        }
        .ok_or_else(|| {
            SharedAlbumError::InvalidToken(format!("token `{raw}` is too short"))
        })?;

        let partition = base62_decode(digits).ok_or_else(|| {
            SharedAlbumError::InvalidToken(format!(
                "token `{raw}` has an invalid partition `{digits}`"
            ))
        })?;

        Ok(Self {
            raw: raw.to_string(),
            partition,
        })
    }

    /// Server partition number encoded in the token
    pub fn partition(&self) -> u64 {
        self.partition
    }

    /// Token as it appears in URL paths, with any `;` suffix removed
    pub fn path_token(&self) -> &str {
        self.raw
            .split_once(';')
            .map_or(self.raw.as_str(), |(token, _)| token)
    }

    /// Partition specific host, e.g. `p07-sharedstreams.icloud.com`
    pub fn host(&self) -> String {
        format!("p{:02}-sharedstreams.icloud.com", self.partition)
    }

    /// Base URL of the stream for this token, e.g.
    /// `https://p07-sharedstreams.icloud.com/<token>/sharedstreams`
    pub fn base_url(&self) -> String {
        stream_base_url(&format!("https://{}", self.host()), self.path_token())
    }
}

impl fmt::Display for ShareToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_token())
    }
}

/// Builds `<origin>/<token>/sharedstreams`
pub(crate) fn stream_base_url(origin: &str, path_token: &str) -> String {
    format!(
        "{}/{}/{}",
        origin.trim_end_matches('/'),
        path_token,
        SHARED_STREAMS_PATH
    )
}

/// Extracts the token path segment from a stream base URL
pub(crate) fn path_token_from_base_url(base_url: &str) -> Result<String, SharedAlbumError> {
    let url = url::Url::parse(base_url)?;
    url.path_segments()
        .and_then(|mut segments| segments.find(|s| !s.is_empty()))
        .map(str::to_string)
        .ok_or_else(|| {
            SharedAlbumError::InvalidToken(format!("no token segment in `{base_url}`"))
        })
}
