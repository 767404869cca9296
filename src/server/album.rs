/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use super::AppState;
use super::response::{ErrorResponse, image_responses};
use crate::sharedstreams::SharedAlbumError;
use actix_web::{HttpResponse, ResponseError, http::StatusCode, web};
use log::{debug, error, info};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AlbumApiError {
    #[error("Album key is required")]
    MissingKey,
    #[error(transparent)]
    Fetch(#[from] SharedAlbumError),
}

impl ResponseError for AlbumApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingKey => StatusCode::BAD_REQUEST,
            Self::Fetch(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            Self::MissingKey => "Missing album key",
            Self::Fetch(_) => "Failed to fetch album",
        };
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: error.to_string(),
            message: self.to_string(),
        })
    }
}

async fn get_album(
    state: web::Data<AppState>,
    key: web::Path<String>,
) -> Result<HttpResponse, AlbumApiError> {
    let key = key.into_inner();
    if key.trim().is_empty() {
        return Err(AlbumApiError::MissingKey);
    }

    debug!("Requesting album with key: {}", key);
    let album = state.client.album(&key).await.map_err(|e| {
        error!("Fetching album {} failed: {}", key, e);
        e
    })?;

    if album.is_empty() {
        debug!("Album {} has no photos", key);
        return Ok(HttpResponse::NotFound().finish());
    }

    let images = image_responses(&album);
    info!("Serving {} photos for album key: {}", images.len(), key);
    Ok(HttpResponse::Ok().json(images))
}

async fn missing_key() -> Result<HttpResponse, AlbumApiError> {
    Err(AlbumApiError::MissingKey)
}

pub fn configure_service(cfg: &mut web::ServiceConfig) {
    cfg.route("/album/{key}", web::get().to(get_album))
        .route("/album", web::get().to(missing_key))
        .route("/album/", web::get().to(missing_key));
}
