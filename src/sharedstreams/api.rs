/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::sharedstreams::errors::SharedAlbumError;
use crate::sharedstreams::token::{path_token_from_base_url, stream_base_url};
use crate::sharedstreams::{JoinKey, ShareToken};
use bytes::Bytes;
use log::{debug, info, warn};
use num_enum::TryFromPrimitive;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Headers the shared streams service expects from a browser client.
/// Requests without them are rejected.
pub const DEFAULT_HEADERS: &[(&str, &str)] = &[
    ("Origin", "https://www.icloud.com"),
    ("Accept-Language", "en-US,en;q=0.8"),
    (
        "User-Agent",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_12_4) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/56.0.2924.87 Safari/537.36",
    ),
    ("Content-Type", "text/plain"),
    ("Accept", "*/*"),
    ("Referer", "https://www.icloud.com/sharedalbum/"),
    ("Connection", "keep-alive"),
];

/// Number of photo guids sent per `webasseturls` request
pub const CHUNK_SIZE: usize = 25;

/// Number of `330` host redirects followed before giving up
pub const MAX_REDIRECTS: u32 = 2;

// Body field carrying the new host in a 330 response
const APPLE_HOST_FIELD: &str = "X-Apple-MMe-Host";

/// Settings used for talking to the shared streams service.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Headers sent with every `webstream`/`webasseturls` request
    pub headers: Vec<(String, String)>,

    /// Timeout applied to each outbound request
    pub timeout: Duration,

    pub max_redirects: u32,

    pub chunk_size: usize,

    /// How many `webasseturls` chunks may be in flight at once
    pub chunk_concurrency: usize,

    pub join_key: JoinKey,

    /// Scheme used when building URLs for hosts handed out by a 330 response
    pub scheme: String,

    /// Sends the initial requests to this origin instead of the partition host
    pub origin_override: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            headers: DEFAULT_HEADERS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            timeout: Duration::from_secs(30),
            max_redirects: MAX_REDIRECTS,
            chunk_size: CHUNK_SIZE,
            chunk_concurrency: 4,
            join_key: JoinKey::default(),
            scheme: "https".into(),
            origin_override: None,
        }
    }
}

/// Status codes the shared streams service answers with
#[derive(Debug, PartialEq, Eq, TryFromPrimitive)]
#[repr(u16)]
pub enum ApiResponseCode {
    Ok = 200,
    MovedPermanently = 301,
    Found = 302,
    TemporaryRedirect = 307,
    PermanentRedirect = 308,

    // Apple specific, body carries the host to retry against
    HostMoved = 330,
}

impl ApiResponseCode {
    fn is_http_redirect(&self) -> bool {
        use ApiResponseCode as C;
        matches!(
            self,
            C::MovedPermanently | C::Found | C::TemporaryRedirect | C::PermanentRedirect
        )
    }
}

/// Directly communicates with the shared streams service.
#[derive(Clone)]
pub struct ApiClient {
    config: ClientConfig,
    https_client: reqwest::Client,
}

impl ApiClient {
    /// Creates a new client. Redirects are never followed automatically and no
    /// cookies are kept, so a single instance is safe to share between albums.
    pub fn new(config: ClientConfig) -> Result<Self, SharedAlbumError> {
        let https_client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            config,
            https_client,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Base URL the first request for this token goes to
    pub fn base_url_for(&self, token: &ShareToken) -> String {
        match &self.config.origin_override {
            Some(origin) => stream_base_url(origin, token.path_token()),
            None => token.base_url(),
        }
    }

    /// Probes the base URL and follows a single HTTP redirect to the canonical host
    pub async fn resolve_base_url(&self, base_url: &str) -> Result<String, SharedAlbumError> {
        debug!("Probing {}", base_url);
        let resp = self.https_client.get(base_url).send().await?;
        let status = resp.status();
        debug!("Probe status {}", status);

        let is_redirect = ApiResponseCode::try_from(status.as_u16())
            .map(|c| c.is_http_redirect())
            .unwrap_or(false);
        if !is_redirect {
            return Ok(base_url.to_string());
        }

        let location = resp
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty());
        match location {
            Some(location) => {
                let resolved = url::Url::parse(base_url)?.join(location)?;
                let resolved = resolved.as_str().trim_end_matches('/').to_string();
                info!("Base URL redirected to {}", resolved);
                Ok(resolved)
            }
            None => Ok(base_url.to_string()),
        }
    }

    /// Posts `body` to `<base_url>/<endpoint>`, following 330 host redirects.
    ///
    /// Returns the decoded response and the base URL that finally answered.
    pub async fn post<B, T>(
        &self,
        base_url: &str,
        endpoint: &str,
        body: &B,
    ) -> Result<(T, String), SharedAlbumError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let payload = serde_json::to_string(body)
            .map_err(|e| SharedAlbumError::JsonSerialization(e.to_string()))?;

        let mut current_base = base_url.to_string();
        let mut hosts: Vec<String> = Vec::new();
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;
            let req_url = format!("{}/{}", current_base, endpoint);
            debug!("POST {} (attempt {})", req_url, attempts);

            let mut req = self.https_client.post(&req_url);
            for (name, value) in &self.config.headers {
                req = req.header(name.as_str(), value.as_str());
            }
            let resp = req.body(payload.clone()).send().await?;
            let status = resp.status();
            let resp_body = resp.bytes().await?;
            debug!("{} answered {}", req_url, status);

            match ApiResponseCode::try_from(status.as_u16()) {
                Ok(ApiResponseCode::Ok) => {
                    return decode_body(&resp_body).map(|v| (v, current_base));
                }
                Ok(ApiResponseCode::HostMoved) => {
                    let host = moved_host(&resp_body)?;
                    warn!("{} moved to host {}", req_url, host);
                    hosts.push(host.clone());

                    if attempts > self.config.max_redirects {
                        return Err(SharedAlbumError::TooManyRedirects { attempts, hosts });
                    }
                    let token = path_token_from_base_url(&current_base)?;
                    current_base =
                        stream_base_url(&format!("{}://{}", self.config.scheme, host), &token);
                    info!("Retrying against {}", current_base);
                }
                _ => {
                    return Err(SharedAlbumError::ApiResponse(
                        status.as_u16(),
                        body_text(&resp_body),
                    ));
                }
            }
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .finish()
    }
}

// Body of a 330 response
#[derive(Deserialize, Debug)]
struct HostMovedBody {
    #[serde(rename = "X-Apple-MMe-Host")]
    host: Option<String>,
}

fn moved_host(body: &Bytes) -> Result<String, SharedAlbumError> {
    serde_json::from_slice::<HostMovedBody>(body)
        .ok()
        .and_then(|b| b.host)
        .filter(|h| !h.is_empty())
        .ok_or_else(|| {
            warn!("330 response without {}", APPLE_HOST_FIELD);
            SharedAlbumError::MalformedRedirect {
                body: body_text(body),
            }
        })
}

fn decode_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, SharedAlbumError> {
    serde_json::from_slice(body).map_err(|source| SharedAlbumError::Decode {
        source,
        body: body_text(body),
    })
}

fn body_text(body: &Bytes) -> String {
    String::from_utf8_lossy(body).into_owned()
}
