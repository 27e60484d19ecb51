/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

use crate::v1::RpcCode;
use num_enum::TryFromPrimitiveError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error conditions that can be returned
#[derive(Error, Debug)]
pub enum GPhotosError {
    #[error("I/O error")]
    Io(#[from] io::Error),

    #[error("Request network error")]
    Request(#[from] reqwest::Error),

    #[error("Authorization error. {0}")]
    Auth(String),

    #[error("Deserialization error")]
    Deserialization(#[from] serde_json::Error),

    #[error("URL Parse error")]
    UrlParsing(#[from] url::ParseError),

    #[error("Uploader is deactivated")]
    Deactivated(),

    #[error("Service is not reachable")]
    Unreachable(),

    #[error("No authorized session")]
    SessionMissing(),

    #[error("Failed reading picture file {0:?}")]
    SourceRead(PathBuf, #[source] io::Error),

    #[error("Byte upload was not accepted: {0}")]
    Transfer(String),

    #[error("Media item creation was rejected: {0}")]
    MediaCreate(String),

    #[error("Album creation failed: {0}")]
    AlbumCreate(String),

    #[error("Failed persisting token cache")]
    CachePersist(#[source] io::Error),

    #[error("Expected response missing")]
    ResponseMissing(),

    #[error("API Response was error: {0}, msg: {1}")]
    ApiResponse(u16, String),

    #[error("API Response status code is invalid")]
    ApiStatusCode(#[from] TryFromPrimitiveError<RpcCode>),

    #[error("Failed serializing to JSON: {0}")]
    JsonSerialization(String),
}
