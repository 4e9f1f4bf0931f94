// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Protocol boundary types shared with the engine.
//!
//! The CoAP engine parses wire messages and hands the endpoint fully
//! reassembled requests; the endpoint hands back fully formed responses.
//! These are the types that cross that boundary. Nothing here knows about
//! framing, options, or retransmission.

use std::fmt;

/// Request methods the endpoint understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Read the current value (CoAP 0.01).
    Get,
    /// Write or re-initialize the value (CoAP 0.03).
    Put,
    /// Reset the value to its default (CoAP 0.04).
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Put => write!(f, "PUT"),
            Method::Delete => write!(f, "DELETE"),
        }
    }
}

/// Response status codes produced by resource handlers.
///
/// The numeric encoding follows the CoAP code registry (class in the top
/// three bits, detail in the bottom five), so an engine can emit the value
/// verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCode {
    /// 2.01 - a PUT initialized a previously-default attribute.
    Created,
    /// 2.02 - a DELETE reset the attribute.
    Deleted,
    /// 2.04 - a PUT overwrote a previously-set attribute.
    Changed,
    /// 2.05 - a GET succeeded; payload carries the value.
    Content,
    /// 4.04 - no resource registered under the requested path.
    NotFound,
    /// 4.05 - the resource does not expose the requested method.
    MethodNotAllowed,
}

impl ResponseCode {
    /// Raw CoAP code byte: `class << 5 | detail`.
    #[must_use]
    pub const fn raw(self) -> u8 {
        match self {
            ResponseCode::Created => (2 << 5) | 1,
            ResponseCode::Deleted => (2 << 5) | 2,
            ResponseCode::Changed => (2 << 5) | 4,
            ResponseCode::Content => (2 << 5) | 5,
            ResponseCode::NotFound => (4 << 5) | 4,
            ResponseCode::MethodNotAllowed => (4 << 5) | 5,
        }
    }

    /// Dotted `class.detail` notation, e.g. `"2.05"`.
    #[must_use]
    pub const fn dotted(self) -> &'static str {
        match self {
            ResponseCode::Created => "2.01",
            ResponseCode::Deleted => "2.02",
            ResponseCode::Changed => "2.04",
            ResponseCode::Content => "2.05",
            ResponseCode::NotFound => "4.04",
            ResponseCode::MethodNotAllowed => "4.05",
        }
    }

    /// `true` for the 2.xx class.
    #[must_use]
    pub const fn is_success(self) -> bool {
        self.raw() >> 5 == 2
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dotted())
    }
}

/// Opaque per-request reply handle supplied by the engine.
///
/// The endpoint never inspects it; it only travels from
/// [`crate::transport::ProtocolStack::take_request`] back into
/// [`crate::transport::ProtocolStack::respond`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReplyToken(pub u64);

/// One inbound request, scoped to a single dispatch cycle.
#[derive(Debug)]
pub struct Request {
    /// Request method.
    pub method: Method,
    /// Target resource path, e.g. `shoe/name`.
    pub path: String,
    /// Reassembled request body.
    ///
    /// `None` means the engine could not retrieve the body. The endpoint
    /// deliberately treats that the same as an empty body (the wire
    /// protocol gives no way to tell the cases apart), so both routes
    /// through [`Request::payload_bytes`] as `&[]`.
    pub payload: Option<Vec<u8>>,
    /// Reply handle for the response.
    pub token: ReplyToken,
}

impl Request {
    /// Build a request.
    #[must_use]
    pub fn new(method: Method, path: &str, payload: Option<Vec<u8>>, token: ReplyToken) -> Self {
        Self {
            method,
            path: path.to_string(),
            payload,
            token,
        }
    }

    /// Request body, with an unavailable body conflated to empty.
    #[must_use]
    pub fn payload_bytes(&self) -> &[u8] {
        self.payload.as_deref().unwrap_or(&[])
    }
}

/// One outbound response, handed back to the engine and discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Status code.
    pub code: ResponseCode,
    /// Response payload; empty for status-only responses.
    pub payload: Vec<u8>,
}

impl Response {
    /// Status-only response with no payload.
    #[must_use]
    pub fn empty(code: ResponseCode) -> Self {
        Self {
            code,
            payload: Vec::new(),
        }
    }

    /// Response carrying a payload.
    #[must_use]
    pub fn with_payload(code: ResponseCode, payload: Vec<u8>) -> Self {
        Self { code, payload }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_code_raw_encoding() {
        assert_eq!(ResponseCode::Created.raw(), 0x41);
        assert_eq!(ResponseCode::Deleted.raw(), 0x42);
        assert_eq!(ResponseCode::Changed.raw(), 0x44);
        assert_eq!(ResponseCode::Content.raw(), 0x45);
        assert_eq!(ResponseCode::NotFound.raw(), 0x84);
        assert_eq!(ResponseCode::MethodNotAllowed.raw(), 0x85);
    }

    #[test]
    fn test_response_code_class() {
        assert!(ResponseCode::Content.is_success());
        assert!(ResponseCode::Created.is_success());
        assert!(!ResponseCode::NotFound.is_success());
        assert_eq!(ResponseCode::Changed.dotted(), "2.04");
    }

    #[test]
    fn test_payload_conflation() {
        let missing = Request::new(Method::Put, "shoe/name", None, ReplyToken(1));
        let empty = Request::new(Method::Put, "shoe/name", Some(Vec::new()), ReplyToken(2));
        assert_eq!(missing.payload_bytes(), b"");
        assert_eq!(empty.payload_bytes(), b"");
    }
}
