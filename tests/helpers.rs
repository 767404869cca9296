/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use icloud_shared_album::sharedstreams::{Client, ClientConfig, JoinKey};
use serde::Deserialize;
use serde_json::{Value, json};
use std::net::{SocketAddr, TcpListener};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[allow(dead_code)]
pub(crate) const TOKEN: &str = "B0BGWZuqDGKsRNa";

/// How the fake webstream endpoint answers
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub(crate) enum StreamBehavior {
    Photos(Vec<Value>),
    AlwaysMoved,
    MovedOnce(Vec<Value>),
    MovedWithoutHost,
    Garbage,
    /// Answers 200 with this body as is
    Raw(Value),
}

/// How the fake webasseturls endpoint answers
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum AssetUrlsBehavior {
    Resolve,
    AlwaysMoved,
    MovedOnce,
    MovedWithoutHost,
    /// Answers 500 to the request with this zero based index
    FailOnRequest(usize),
}

#[derive(Debug, Clone)]
pub(crate) struct MockSettings {
    pub(crate) stream: StreamBehavior,
    /// Location sent back by the initial probe with a 307
    pub(crate) probe_location: Option<String>,
    pub(crate) asset_keys: JoinKey,
    pub(crate) asset_urls: AssetUrlsBehavior,
}

impl MockSettings {
    #[allow(dead_code)]
    pub(crate) fn photos(photos: Vec<Value>) -> Self {
        Self {
            stream: StreamBehavior::Photos(photos),
            probe_location: None,
            asset_keys: JoinKey::Checksum,
            asset_urls: AssetUrlsBehavior::Resolve,
        }
    }

    #[allow(dead_code)]
    pub(crate) fn stream(stream: StreamBehavior) -> Self {
        Self {
            stream,
            probe_location: None,
            asset_keys: JoinKey::Checksum,
            asset_urls: AssetUrlsBehavior::Resolve,
        }
    }

    #[allow(dead_code)]
    pub(crate) fn with_asset_urls(mut self, asset_urls: AssetUrlsBehavior) -> Self {
        self.asset_urls = asset_urls;
        self
    }
}

#[derive(Debug, Default)]
pub(crate) struct Hits {
    pub(crate) probe: AtomicUsize,
    pub(crate) webstream: AtomicUsize,
    pub(crate) webasseturls: AtomicUsize,
    pub(crate) chunk_sizes: Mutex<Vec<usize>>,
    pub(crate) tokens: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl Hits {
    pub(crate) fn probe(&self) -> usize {
        self.probe.load(Ordering::SeqCst)
    }

    pub(crate) fn webstream(&self) -> usize {
        self.webstream.load(Ordering::SeqCst)
    }

    pub(crate) fn webasseturls(&self) -> usize {
        self.webasseturls.load(Ordering::SeqCst)
    }
}

struct MockState {
    settings: MockSettings,
    addr: SocketAddr,
    hits: web::Data<Hits>,
}

/// In-process stand in for the shared streams service
pub(crate) struct MockICloud {
    pub(crate) addr: SocketAddr,
    pub(crate) hits: web::Data<Hits>,
    handle: ServerHandle,
}

#[allow(dead_code)]
impl MockICloud {
    /// Must be called from within an actix runtime
    pub(crate) fn start(settings: MockSettings) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = web::Data::new(Hits::default());
        let state = web::Data::new(MockState {
            settings,
            addr,
            hits: hits.clone(),
        });

        let server = HttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .route("/{token}/sharedstreams", web::get().to(probe))
                .route("/{token}/sharedstreams/webstream", web::post().to(webstream))
                .route(
                    "/{token}/sharedstreams/webasseturls",
                    web::post().to(webasseturls),
                )
        })
        .workers(1)
        .listen(listener)
        .unwrap()
        .run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self { addr, hits, handle }
    }

    pub(crate) fn origin(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub(crate) fn client_config(&self) -> ClientConfig {
        ClientConfig {
            origin_override: Some(self.origin()),
            scheme: "http".into(),
            timeout: Duration::from_secs(5),
            ..ClientConfig::default()
        }
    }

    pub(crate) fn client(&self) -> Client {
        Client::with_config(self.client_config()).unwrap()
    }

    pub(crate) async fn stop(self) {
        self.handle.stop(false).await;
    }
}

/// A stream photo with a full, a thumbnail and a poster derivative.
/// Only the full and thumbnail derivatives resolve to URLs.
#[allow(dead_code)]
pub(crate) fn photo_fixture(guid: &str, date_created: &str) -> Value {
    json!({
        "photoGuid": guid,
        "batchGuid": format!("batch-{guid}"),
        "caption": format!("caption {guid}"),
        "contributorFirstName": "Jane",
        "contributorLastName": "Doe",
        "contributorFullName": "Jane Doe",
        "dateCreated": date_created,
        "batchDateCreated": date_created,
        "width": "4032",
        "height": "3024",
        "derivatives": {
            "2048": {"checksum": format!("{guid}-full"), "fileSize": "500000", "width": "2048", "height": "1536"},
            "342": {"checksum": format!("{guid}-thumb"), "fileSize": "20000", "width": "342", "height": "256"},
            "PosterFrame": {"checksum": format!("{guid}-poster"), "fileSize": "90000", "width": "1024", "height": "768"}
        }
    })
}

#[allow(dead_code)]
pub(crate) fn photo_fixtures(n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| photo_fixture(&format!("guid-{i:03}"), "2024-01-01T00:00:00Z"))
        .collect()
}

#[allow(dead_code)]
pub(crate) fn asset_url(key: &str) -> String {
    format!("https://cvws.icloud-content.com/B/{key}")
}

fn stream_body(photos: &[Value]) -> Value {
    json!({
        "streamName": "Summer Trip",
        "userFirstName": "Jane",
        "userLastName": "Doe",
        "streamCtag": "FT;12",
        "itemsReturned": photos.len().to_string(),
        "locations": {"loc-1": {"latitude": 48.1, "longitude": 11.5}},
        "photos": photos
    })
}

fn moved(state: &MockState) -> HttpResponse {
    HttpResponse::build(StatusCode::from_u16(330).unwrap())
        .json(json!({"X-Apple-MMe-Host": state.addr.to_string()}))
}

fn has_browser_headers(req: &HttpRequest) -> bool {
    let headers = req.headers();
    headers.get("origin").and_then(|v| v.to_str().ok()) == Some("https://www.icloud.com")
        && headers.get("referer").and_then(|v| v.to_str().ok())
            == Some("https://www.icloud.com/sharedalbum/")
        && headers.get("content-type").and_then(|v| v.to_str().ok()) == Some("text/plain")
}

async fn probe(state: web::Data<MockState>) -> HttpResponse {
    state.hits.probe.fetch_add(1, Ordering::SeqCst);
    match &state.settings.probe_location {
        Some(location) => HttpResponse::TemporaryRedirect()
            .insert_header(("Location", location.as_str()))
            .finish(),
        None => HttpResponse::Ok().finish(),
    }
}

async fn webstream(
    state: web::Data<MockState>,
    req: HttpRequest,
    token: web::Path<String>,
    body: web::Bytes,
) -> HttpResponse {
    let attempt = state.hits.webstream.fetch_add(1, Ordering::SeqCst);
    state.hits.tokens.lock().unwrap().push(token.into_inner());

    if !has_browser_headers(&req) {
        return HttpResponse::BadRequest().finish();
    }
    let body: Value = serde_json::from_slice(&body).unwrap_or_default();
    if body != json!({"streamCtag": null}) {
        return HttpResponse::BadRequest().finish();
    }

    match &state.settings.stream {
        StreamBehavior::Photos(photos) => HttpResponse::Ok().json(stream_body(photos)),
        StreamBehavior::AlwaysMoved => moved(&state),
        StreamBehavior::MovedOnce(_) if attempt == 0 => moved(&state),
        StreamBehavior::MovedOnce(photos) => HttpResponse::Ok().json(stream_body(photos)),
        StreamBehavior::MovedWithoutHost => {
            HttpResponse::build(StatusCode::from_u16(330).unwrap()).json(json!({}))
        }
        StreamBehavior::Garbage => HttpResponse::Ok().body("<html>maintenance</html>"),
        StreamBehavior::Raw(body) => HttpResponse::Ok().json(body),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssetUrlsBody {
    photo_guids: Vec<String>,
}

async fn webasseturls(
    state: web::Data<MockState>,
    req: HttpRequest,
    body: web::Bytes,
) -> HttpResponse {
    let attempt = state.hits.webasseturls.fetch_add(1, Ordering::SeqCst);
    if !has_browser_headers(&req) {
        return HttpResponse::BadRequest().finish();
    }
    let Ok(body) = serde_json::from_slice::<AssetUrlsBody>(&body) else {
        return HttpResponse::BadRequest().finish();
    };
    state
        .hits
        .chunk_sizes
        .lock()
        .unwrap()
        .push(body.photo_guids.len());

    match state.settings.asset_urls {
        AssetUrlsBehavior::AlwaysMoved => return moved(&state),
        AssetUrlsBehavior::MovedOnce if attempt == 0 => return moved(&state),
        AssetUrlsBehavior::MovedWithoutHost => {
            return HttpResponse::build(StatusCode::from_u16(330).unwrap()).json(json!({}));
        }
        AssetUrlsBehavior::FailOnRequest(n) if attempt == n => {
            return HttpResponse::InternalServerError().body("chunk failed");
        }
        _ => {}
    }

    let mut items = serde_json::Map::new();
    for guid in &body.photo_guids {
        let keys = match state.settings.asset_keys {
            JoinKey::Checksum => [format!("{guid}-full"), format!("{guid}-thumb")],
            JoinKey::GuidDerivative => [format!("{guid}-2048"), format!("{guid}-342")],
        };
        for key in keys {
            items.insert(
                key.clone(),
                json!({"url_location": "cvws.icloud-content.com", "url_path": format!("/B/{key}")}),
            );
        }
    }
    HttpResponse::Ok().json(json!({"items": items, "locations": {}}))
}
