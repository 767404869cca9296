/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

use thiserror::Error;

/// Error conditions that can be returned
#[derive(Error, Debug)]
pub enum SharedAlbumError {
    #[error("Invalid share token: {0}")]
    InvalidToken(String),

    #[error("Request network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed decoding response: {source} (body: {body})")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    #[error("Too many redirects after {attempts} attempts, hosts visited: {hosts:?}")]
    TooManyRedirects { attempts: u32, hosts: Vec<String> },

    #[error("Redirect response is missing X-Apple-MMe-Host (body: {body})")]
    MalformedRedirect { body: String },

    #[error("URL Parse error: {0}")]
    UrlParsing(#[from] url::ParseError),

    #[error("Failed serializing to JSON: {0}")]
    JsonSerialization(String),

    #[error("API Response was error: {0}, body: {1}")]
    ApiResponse(u16, String),
}
