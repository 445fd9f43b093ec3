// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP access to the hosted ticket service.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  ApiRemote  │────►│ HttpClient  │────►│  Transport  │
//! │  (Remote)   │◄────│ retry/oauth │◄────│   (trait)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                ▲
//! ┌──────────────────┐                           │
//! │ CredentialFetcher│───────────────────────────┘
//! │  (FileFetcher)   │  basic auth downloads
//! └──────────────────┘
//! ```
//!
//! # Features
//!
//! - REST paths and payload wrapping for every remote operation
//! - Bounded retry on gateway errors
//! - Access token refresh on 401
//! - OAuth2 PIN-code login
//! - Injectable transport trait for testing

mod api;
mod attachments;
mod client;
mod transport;

pub use api::{ApiRemote, DEFAULT_PAGE_SIZE};
pub use attachments::{CredentialFetcher, Credentials};
pub use client::{ClientSettings, HttpClient, Tokens, RETRY_CODES};
pub use transport::{
    Body, Method, Request, Response, Transport, TransportError, TransportResult, UreqTransport,
};




#[cfg(test)]
pub(crate) mod transport_tests;
