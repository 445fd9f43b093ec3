// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for the transport module.

#![allow(clippy::unwrap_used)]

use super::transport::{Body, Method, Request, Response, Transport, TransportError, TransportResult};
use std::collections::VecDeque;

/// Mock transport replaying canned responses and recording requests.
#[derive(Default)]
pub struct MockTransport {
    /// Responses returned by send(), oldest first.
    responses: VecDeque<TransportResult<Response>>,
    /// Requests that were sent via send().
    pub requests: Vec<Request>,
}

impl MockTransport {
    pub fn new() -> Self {
        MockTransport::default()
    }

    /// Queue a response with a JSON body.
    pub fn respond(&mut self, status: u16, body: &str) -> &mut Self {
        self.responses
            .push_back(Ok(Response::new(status, body.as_bytes())));
        self
    }

    /// Queue a transport failure.
    pub fn fail(&mut self, reason: &str) -> &mut Self {
        self.responses
            .push_back(Err(TransportError::SendFailed(reason.to_string())));
        self
    }

    /// Paths of every request sent, without the host.
    pub fn paths(&self) -> Vec<String> {
        self.requests
            .iter()
            .map(|r| match r.url.find("/v1/") {
                Some(i) => r.url[i..].to_string(),
                None => r.url.clone(),
            })
            .collect()
    }

    pub fn last(&self) -> &Request {
        self.requests.last().unwrap()
    }

    pub fn remaining(&self) -> usize {
        self.responses.len()
    }
}

impl Transport for MockTransport {
    fn send(&mut self, request: &Request) -> TransportResult<Response> {
        self.requests.push(request.clone());
        self.responses
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::SendFailed("no response queued".into())))
    }
}

#[test]
fn test_request_builder() {
    let request = Request::new(Method::Get, "https://api.example.test/v1/spaces.json")
        .query("per_page", "100")
        .header("Authorization", "Bearer abc");

    assert_eq!(request.method.as_str(), "GET");
    assert_eq!(request.query, vec![("per_page".to_string(), "100".to_string())]);
    assert_eq!(request.header_value("authorization"), Some("Bearer abc"));
    assert_eq!(request.body, Body::Empty);
}

#[test]
fn test_response_success_range() {
    assert!(Response::new(200, "").is_success());
    assert!(Response::new(204, "").is_success());
    assert!(!Response::new(301, "").is_success());
    assert!(!Response::new(404, "").is_success());
}

#[test]
fn test_mock_replays_in_order() {
    let mut mock = MockTransport::new();
    mock.respond(200, "first").respond(500, "second");
    let request = Request::new(Method::Delete, "https://api.example.test/v1/x.json");

    assert_eq!(mock.send(&request).unwrap().body, b"first".to_vec());
    assert_eq!(mock.send(&request).unwrap().status, 500);
    assert!(mock.send(&request).is_err());
    assert_eq!(mock.requests.len(), 3);
}
