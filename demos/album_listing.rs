/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

extern crate icloud_shared_album;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use icloud_shared_album::sharedstreams::{Album, Client};

// Prints the album header and every photo with its derivatives
fn print_album(album: &Album) {
    println!(
        "Album: {} by {} {}",
        album.metadata.stream_name, album.metadata.user_first_name, album.metadata.user_last_name
    );
    println!("Total photos: {}\n", album.metadata.items_returned);

    for photo in &album.photos {
        println!("Photo: {}", photo.photo_guid);
        if !photo.caption.is_empty() {
            println!("Caption: {}", photo.caption);
        }
        println!("By: {}", photo.contributor_full_name);
        println!("Created: {}", photo.date_created.format("%Y-%m-%d %H:%M:%S"));
        println!("Size: {}x{}", photo.width, photo.height);
        println!("Derivatives:");
        for (size, derivative) in &photo.derivatives {
            match &derivative.url {
                Some(url) => println!(
                    "  {}: {}x{} - {}",
                    size, derivative.width, derivative.height, url
                ),
                None => println!("  {}: {}x{}", size, derivative.width, derivative.height),
            }
        }
        println!();
    }
}

// main
#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    // The token is the part after the `#` in a shared album link.
    // It can be passed as the first argument or via ICLOUD_ALBUM_TOKEN.
    let token = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("ICLOUD_ALBUM_TOKEN").ok())
        .context("Usage: album_listing <token>")?;

    let client = Client::new()?;
    let album = client.album(&token).await?;
    print_album(&album);
    Ok(())
}
