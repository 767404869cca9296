/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! # iCloud Shared Album
//!
//! This library reads the contents of a public iCloud "Shared Album" from its share token
//! and can re-expose a simplified photo list over a small HTTP API.
//!
//! ## Features
//!
//! - Share token decoding (server partition lookup)
//! - Canonical host discovery
//!     - HTTP redirects on the first probe
//!     - Apple's `330` host redirects on every API call (bounded)
//! - Album metadata and photo list retrieval
//! - Batched download URL resolution joined back onto every photo derivative
//! - An actix-web service exposing `GET /album/{key}`
//!
//! *Only public share tokens are supported. Nothing is cached between calls.*
//!
//! ## Usage
//!
//! ```no_run
//! use icloud_shared_album::sharedstreams::{Client, SharedAlbumError};
//!
//! async fn print_album(token: &str) -> Result<(), SharedAlbumError> {
//!     let client = Client::new()?;
//!     let album = client.album(token).await?;
//!
//!     println!(
//!         "{} by {} {}",
//!         album.metadata.stream_name, album.metadata.user_first_name, album.metadata.user_last_name
//!     );
//!     for photo in &album.photos {
//!         if let Some(full) = photo.largest_derivative() {
//!             println!("{}: {:?}", photo.photo_guid, full.url);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
pub mod config;
pub mod server;
pub mod sharedstreams;
