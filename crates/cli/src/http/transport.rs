// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transport abstraction for HTTP requests.
//!
//! Provides a trait-based transport layer that enables:
//! - Real HTTP calls through `ureq` for production
//! - Mock transports for unit testing

use std::io::Read;
use std::time::Duration;

/// Error type for transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request could not be delivered.
    #[error("failed to send request: {0}")]
    SendFailed(String),

    /// The response body could not be read.
    #[error("failed to read response: {0}")]
    ReceiveFailed(String),
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// HTTP method of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

/// Request payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Empty,
    /// Raw bytes sent with the given content type.
    Bytes {
        content_type: String,
        data: Vec<u8>,
    },
    /// URL-encoded form fields.
    Form(Vec<(String, String)>),
}

/// A single HTTP request.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Body,
}

impl Request {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Request {
            method,
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: Body::Empty,
        }
    }

    /// Adds a query parameter (builder pattern).
    pub fn query(mut self, name: &str, value: impl Into<String>) -> Self {
        self.query.push((name.to_string(), value.into()));
        self
    }

    /// Adds a header (builder pattern).
    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    /// Sets the body (builder pattern).
    pub fn body(mut self, body: Body) -> Self {
        self.body = body;
        self
    }

    /// Returns the first header with the given name, ignoring case.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and body of a completed request, whatever the status.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Response {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport trait for request/response exchanges.
///
/// Non-2xx statuses are returned as responses, not errors; only failures
/// to exchange the request at all are [`TransportError`]s.
pub trait Transport {
    fn send(&mut self, request: &Request) -> TransportResult<Response>;
}

/// Blocking HTTP transport using `ureq`.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        UreqTransport { agent }
    }
}

impl Transport for UreqTransport {
    fn send(&mut self, request: &Request) -> TransportResult<Response> {
        let mut req = self.agent.request(request.method.as_str(), &request.url);
        for (name, value) in &request.query {
            req = req.query(name, value);
        }
        for (name, value) in &request.headers {
            req = req.set(name, value);
        }

        let result = match &request.body {
            Body::Empty => req.call(),
            Body::Bytes { content_type, data } => {
                req.set("Content-Type", content_type).send_bytes(data)
            }
            Body::Form(fields) => {
                let pairs: Vec<(&str, &str)> = fields
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str()))
                    .collect();
                req.send_form(&pairs)
            }
        };

        let response = match result {
            Ok(response) => response,
            Err(ureq::Error::Status(_, response)) => response,
            Err(ureq::Error::Transport(e)) => {
                return Err(TransportError::SendFailed(e.to_string()))
            }
        };

        let status = response.status();
        let mut body = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut body)
            .map_err(|e| TransportError::ReceiveFailed(e.to_string()))?;
        Ok(Response { status, body })
    }
}
