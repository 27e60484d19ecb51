/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use num_enum::TryFromPrimitive;
use strum_macros::{EnumString, IntoStaticStr};

/// Wire value sent in the X-Goog-Upload-Protocol header. Booth pictures
/// fit a single request, so only the raw protocol is spoken.
#[derive(Debug, EnumString, IntoStaticStr)]
pub enum UploadProtocol {
    #[strum(to_string = "raw")]
    Raw,
}

/// Status codes attached to per item results, per the google.rpc code table
#[derive(Debug, TryFromPrimitive)]
#[repr(i32)]
pub enum RpcCode {
    Ok = 0,
    Cancelled = 1,
    Unknown = 2,
    InvalidArgument = 3,
    DeadlineExceeded = 4,
    NotFound = 5,
    AlreadyExists = 6,
    PermissionDenied = 7,
    ResourceExhausted = 8,
    FailedPrecondition = 9,
    Aborted = 10,
    OutOfRange = 11,
    Unimplemented = 12,
    Internal = 13,
    Unavailable = 14,
    DataLoss = 15,
    Unauthenticated = 16,
}
