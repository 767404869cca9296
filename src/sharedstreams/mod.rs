/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

pub mod album;
pub mod api;
mod asset_urls;
pub mod client;
pub mod errors;
mod parsers;
pub mod photo;
pub mod properties;
pub mod token;

pub use album::*;
pub use api::*;
pub use client::*;
pub use errors::*;
pub use photo::*;
pub use properties::*;
pub use token::*;
