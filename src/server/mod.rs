/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! HTTP service exposing shared albums as a simplified photo list.
//!
//! An in-flight album fetch is dropped together with the inbound request, so a
//! disconnecting caller also cancels the outbound calls.

pub mod album;
pub mod response;

use crate::config::ServerConfig;
use crate::sharedstreams::Client;
use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use log::info;

/// Shared between all workers
#[derive(Debug, Clone)]
pub struct AppState {
    pub client: Client,
}

pub fn cors(allowed_origins: &[String]) -> Cors {
    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allow_any_header()
}

pub fn configure_service(cfg: &mut web::ServiceConfig) {
    album::configure_service(cfg);
}

/// Runs the service until it is shut down
pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    let client = Client::with_config(config.client.clone()).map_err(std::io::Error::other)?;
    let state = web::Data::new(AppState { client });
    let origins = config.allowed_origins.clone();

    info!("Listening on: {}:{}", config.bind_address, config.port);
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .configure(configure_service)
            .wrap(cors(&origins))
    })
    .bind((config.bind_address.as_str(), config.port))?
    .run()
    .await
}
