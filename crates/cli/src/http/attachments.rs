// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Attachment downloads with account credentials.
//!
//! Document URLs point at the web application rather than the API, so they
//! are fetched with HTTP basic authentication instead of the bearer token.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use tracing::debug;

use super::client::send_failed;
use super::transport::{Method, Request, Transport};
use tmv_core::FileFetcher;

/// Username and password for the web application.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Value of the `Authorization` header.
    pub fn basic_auth(&self) -> String {
        let pair = format!("{}:{}", self.username, self.password);
        format!("Basic {}", BASE64.encode(pair))
    }
}

/// [`FileFetcher`] that downloads document content with basic auth.
pub struct CredentialFetcher<T: Transport> {
    transport: T,
    credentials: Credentials,
}

impl<T: Transport> CredentialFetcher<T> {
    pub fn new(transport: T, credentials: Credentials) -> Self {
        CredentialFetcher {
            transport,
            credentials,
        }
    }

    #[cfg(test)]
    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: Transport> FileFetcher for CredentialFetcher<T> {
    fn fetch(&mut self, url: &str) -> tmv_core::Result<Vec<u8>> {
        let request =
            Request::new(Method::Get, url).header("Authorization", self.credentials.basic_auth());
        let response = self.transport.send(&request).map_err(send_failed)?;
        if !response.is_success() {
            return Err(tmv_core::Error::from_status(
                response.status,
                format!("download of {} failed with status {}", url, response.status),
            ));
        }
        debug!("downloaded {} bytes from {}", response.body.len(), url);
        Ok(response.body)
    }
}
