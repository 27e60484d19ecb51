/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use gphotos::v1::{ClientIdentity, ConsentFlow, Creds, Endpoints, GPhotosError, Uploader};
use serde_json::json;
use std::path::PathBuf;
use tempfile::TempDir;
use wiremock::MockServer;

#[allow(dead_code)]
pub(crate) const TEST_CLIENT_ID: &str = "test-client-id.apps.googleusercontent.com";

#[allow(dead_code)]
pub(crate) const TEST_CLIENT_SECRET: &str = "test-client-secret";

// On disk fixtures for one test. Dropping the struct removes the files.
#[allow(dead_code)]
pub(crate) struct Fixture {
    pub dir: TempDir,
    pub identity_file: PathBuf,
    pub token_cache: PathBuf,
}

// Writes a client secrets file whose token endpoint points at the stub server
#[allow(dead_code)]
pub(crate) fn write_fixture_files(server_uri: &str) -> anyhow::Result<Fixture> {
    let dir = tempfile::tempdir()?;
    let identity_file = dir.path().join("client_id.json");
    let identity = json!({
        "installed": {
            "client_id": TEST_CLIENT_ID,
            "client_secret": TEST_CLIENT_SECRET,
            "token_uri": format!("{server_uri}/token"),
            "auth_uri": "https://accounts.google.com/o/oauth2/auth",
        }
    });
    std::fs::write(&identity_file, serde_json::to_string_pretty(&identity)?)?;
    let token_cache = dir.path().join("google_credentials.dat");
    Ok(Fixture {
        dir,
        identity_file,
        token_cache,
    })
}

// A small jpeg-ish payload standing in for a captured picture
#[allow(dead_code)]
pub(crate) fn write_picture(fixture: &Fixture, name: &str) -> anyhow::Result<PathBuf> {
    let path = fixture.dir.path().join(name);
    std::fs::write(&path, b"\xff\xd8\xff\xe0 booth capture bytes")?;
    Ok(path)
}

#[allow(dead_code)]
pub(crate) fn test_identity(server_uri: &str) -> ClientIdentity {
    ClientIdentity {
        client_id: TEST_CLIENT_ID.to_string(),
        client_secret: TEST_CLIENT_SECRET.to_string(),
        token_uri: format!("{server_uri}/token"),
        auth_uri: None,
    }
}

#[allow(dead_code)]
pub(crate) fn test_creds(server_uri: &str) -> Creds {
    Creds::from_tokens(
        &test_identity(server_uri),
        "access-token-1",
        Some("refresh-token-1"),
    )
}

// Builds an uploader with both origins pointed at the stub server
#[allow(dead_code)]
pub(crate) async fn stub_uploader(
    server: &MockServer,
    fixture: &Fixture,
    consent: Box<dyn ConsentFlow>,
) -> Uploader {
    Uploader::with_endpoints(
        &fixture.identity_file,
        Some(fixture.token_cache.clone()),
        consent,
        Endpoints {
            api_origin: server.uri(),
            probe_origin: server.uri(),
        },
    )
    .await
}

// Consent flow double handing back a canned credential
pub(crate) struct StubConsent {
    pub creds: Creds,
}

#[async_trait::async_trait]
impl ConsentFlow for StubConsent {
    async fn authorize(
        &self,
        _identity: &ClientIdentity,
        _scopes: &[&str],
    ) -> Result<Creds, GPhotosError> {
        Ok(self.creds.clone())
    }
}

// Consent flow double for tests where consent must never run
pub(crate) struct DeniedConsent;

#[async_trait::async_trait]
impl ConsentFlow for DeniedConsent {
    async fn authorize(
        &self,
        _identity: &ClientIdentity,
        _scopes: &[&str],
    ) -> Result<Creds, GPhotosError> {
        panic!("the consent flow must not run in this test");
    }
}
