// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Authenticated API client.
//!
//! Wraps a [`Transport`] with:
//! - Bearer authorization from the current access token
//! - A bounded retry loop for transient gateway errors
//! - Access token refresh when the service answers 401
//! - The OAuth2 PIN-code flow used by `tmv login`

use std::thread;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::transport::{Body, Method, Request, Response, Transport, TransportError};
use crate::config::Config;
use crate::error::{Error, Result};

/// Statuses treated as transient and retried.
pub const RETRY_CODES: [u16; 3] = [502, 503, 504];

const API_ROOT: &str = "/v1/";

/// Access and refresh token pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// Connection settings for the client.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub host: String,
    pub auth_host: String,
    pub client_id: String,
    pub client_secret: String,
    /// Retries after the first attempt.
    pub retry_count: u32,
    pub retry_delay: Duration,
}

impl ClientSettings {
    /// Builds settings from configuration. The application credentials must be set.
    pub fn from_config(config: &Config) -> Result<Self> {
        let (client_id, client_secret) = config.client_credentials().ok_or_else(|| {
            Error::Config("client_id and client_secret are required in [application]".into())
        })?;
        Ok(ClientSettings {
            host: config.api.host.clone(),
            auth_host: config.api.auth_host.clone(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            retry_count: config.api.retry_count,
            retry_delay: config.api.retry_delay(),
        })
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
}

/// HTTP client for the hosted API.
pub struct HttpClient<T: Transport> {
    transport: T,
    settings: ClientSettings,
    tokens: Option<Tokens>,
}

impl<T: Transport> HttpClient<T> {
    pub fn new(transport: T, settings: ClientSettings) -> Self {
        HttpClient {
            transport,
            settings,
            tokens: None,
        }
    }

    /// Starts from previously obtained tokens (builder pattern).
    pub fn with_tokens(mut self, tokens: Tokens) -> Self {
        self.tokens = Some(tokens);
        self
    }

    /// The current tokens, including any refreshed during this session.
    pub fn tokens(&self) -> Option<&Tokens> {
        self.tokens.as_ref()
    }

    /// Direct access to the transport (for tests).
    #[cfg(test)]
    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }

    /// Page the user must visit to obtain a PIN code.
    pub fn authorize_url(&self) -> String {
        format!(
            "{}/authorization?client_id={}&response_type=pin_code",
            base_url(&self.settings.auth_host),
            self.settings.client_id
        )
    }

    /// Exchanges a PIN code for tokens and starts using them.
    pub fn exchange_pin(&mut self, pin: &str) -> Result<Tokens> {
        let response = self.token_request(&[("grant_type", "pin_code"), ("pin_code", pin)])?;
        let refresh_token = response
            .refresh_token
            .ok_or_else(|| Error::Auth("token response has no refresh token".into()))?;
        let tokens = Tokens {
            access_token: response.access_token,
            refresh_token,
        };
        self.tokens = Some(tokens.clone());
        Ok(tokens)
    }

    /// Obtains a new access token with the refresh token.
    pub fn refresh(&mut self) -> Result<()> {
        let refresh_token = self
            .tokens
            .as_ref()
            .map(|t| t.refresh_token.clone())
            .ok_or(Error::NotLoggedIn)?;
        let response = self.token_request(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", &refresh_token),
        ])?;
        debug!("refreshed access token");
        self.tokens = Some(Tokens {
            access_token: response.access_token,
            refresh_token: response.refresh_token.unwrap_or(refresh_token),
        });
        Ok(())
    }

    fn token_request(&mut self, grant: &[(&str, &str)]) -> Result<TokenResponse> {
        let mut fields = vec![
            ("client_id".to_string(), self.settings.client_id.clone()),
            ("client_secret".to_string(), self.settings.client_secret.clone()),
        ];
        fields.extend(grant.iter().map(|(k, v)| (k.to_string(), v.to_string())));

        let url = format!("{}/token", base_url(&self.settings.auth_host));
        let request = Request::new(Method::Post, url).body(Body::Form(fields));
        let response = self.transport.send(&request)?;
        if !response.is_success() {
            return Err(Error::Auth(error_reason(&response)));
        }
        Ok(serde_json::from_slice(&response.body)?)
    }

    /// GETs a single record.
    pub fn get<D: DeserializeOwned>(&mut self, path: &str) -> tmv_core::Result<D> {
        let response = self.execute(Method::Get, path, &[], Body::Empty)?;
        Ok(serde_json::from_slice(&response.body)?)
    }

    /// GETs a list of records. An empty response (204) is an empty list.
    pub fn get_list<D: DeserializeOwned>(
        &mut self,
        path: &str,
        query: &[(&str, String)],
    ) -> tmv_core::Result<Vec<D>> {
        let response = self.execute(Method::Get, path, query, Body::Empty)?;
        if response.status == 204 || response.body.is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_slice(&response.body)?)
    }

    /// POSTs a JSON body and parses the created record.
    pub fn post<B: Serialize, D: DeserializeOwned>(
        &mut self,
        path: &str,
        body: &B,
    ) -> tmv_core::Result<D> {
        let data = serde_json::to_vec(body)?;
        self.post_bytes(path, "application/json", data)
    }

    /// POSTs a raw body with the given content type and parses the created record.
    pub fn post_bytes<D: DeserializeOwned>(
        &mut self,
        path: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> tmv_core::Result<D> {
        let body = Body::Bytes {
            content_type: content_type.to_string(),
            data,
        };
        let response = self.execute(Method::Post, path, &[], body)?;
        Ok(serde_json::from_slice(&response.body)?)
    }

    pub fn delete(&mut self, path: &str) -> tmv_core::Result<()> {
        self.execute(Method::Delete, path, &[], Body::Empty)?;
        Ok(())
    }

    /// Sends a request, retrying transient failures and refreshing the
    /// access token once it expires. Non-2xx results become core errors.
    fn execute(
        &mut self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Body,
    ) -> tmv_core::Result<Response> {
        let url = format!("{}{}{}", base_url(&self.settings.host), API_ROOT, path);
        let mut retries = 0;
        let mut refreshed = false;

        let response = loop {
            let mut request = Request::new(method, url.as_str()).body(body.clone());
            for (name, value) in query {
                request = request.query(name, value.clone());
            }
            if let Some(tokens) = &self.tokens {
                request = request.header("Authorization", format!("Bearer {}", tokens.access_token));
            }

            let response = self.transport.send(&request).map_err(send_failed)?;
            // One re-send per request after a refresh, outside the retry budget.
            if response.status == 401 && !refreshed && self.tokens.is_some() {
                self.refresh().map_err(|e| tmv_core::Error::Remote {
                    status: 401,
                    reason: e.to_string(),
                })?;
                refreshed = true;
                continue;
            }
            if !RETRY_CODES.contains(&response.status) || retries >= self.settings.retry_count {
                break response;
            }
            retries += 1;
            warn!(
                "{} {} returned {}, retrying ({}/{})",
                method.as_str(),
                path,
                response.status,
                retries,
                self.settings.retry_count
            );
            thread::sleep(self.settings.retry_delay);
        };

        if response.is_success() {
            Ok(response)
        } else {
            Err(tmv_core::Error::from_status(
                response.status,
                error_reason(&response),
            ))
        }
    }
}

/// Core error for a request that never got a response.
pub(crate) fn send_failed(e: TransportError) -> tmv_core::Error {
    tmv_core::Error::Remote {
        status: 0,
        reason: e.to_string(),
    }
}

/// Scheme and host, defaulting to https when no scheme is given.
pub(crate) fn base_url(host: &str) -> String {
    if host.contains("://") {
        host.trim_end_matches('/').to_string()
    } else {
        format!("https://{}", host.trim_end_matches('/'))
    }
}

/// Human reason for a failed response, from its JSON error fields when present.
fn error_reason(response: &Response) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_slice(&response.body).ok();
    let message = parsed.as_ref().and_then(|v| {
        ["error_description", "error", "message"]
            .iter()
            .find_map(|key| v.get(key).and_then(|m| m.as_str()))
    });
    match message {
        Some(message) => message.to_string(),
        None => format!("error response: status code = {}", response.status),
    }
}
