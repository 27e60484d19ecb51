/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

pub mod client;
mod parsers;
pub mod auth;
pub mod album;
pub mod media_item;
pub mod uploader;
pub mod properties;
pub mod errors;

pub use album::*;
pub use auth::*;
pub use client::*;
pub use errors::*;
pub use media_item::*;
pub use properties::*;
pub use uploader::*;
