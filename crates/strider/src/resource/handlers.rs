// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-method handler logic.
//!
//! The registry has already checked that the resource exists and exposes
//! the method; this module implements the method semantics against the
//! value cell.
//!
//! Status derivation on PUT compares the *current* contents against the
//! default *before* the new value lands: Created means the write
//! initialized a previously-default attribute, Changed means it overwrote
//! a previously-set one. Writing the default value back therefore reports
//! Created; that is defined behavior, not an accident.

use super::{Backing, ResourceEntry};
use crate::core::ResourceStore;
use crate::protocol::{Method, Request, Response, ResponseCode};

/// Run the handler for `entry` matching the request method.
pub(crate) fn execute(
    entry: &ResourceEntry,
    store: &mut ResourceStore,
    request: &Request,
) -> Response {
    match request.method {
        Method::Get => get(entry, store),
        Method::Put => put(entry, store, request),
        Method::Delete => delete(entry, store),
    }
}

/// GET: respond Content with the current value.
///
/// The counter resource re-derives its text from the live counter first,
/// so the payload reflects the counter at read time rather than at the
/// last write.
fn get(entry: &ResourceEntry, store: &mut ResourceStore) -> Response {
    if let Backing::Counter(steps) = &entry.backing {
        let text = steps.value().to_string();
        store.cell_mut(entry.slot).set(text.as_bytes());
    }
    let cell = store.cell(entry.slot);
    Response::with_payload(ResponseCode::Content, cell.bytes().to_vec())
}

/// PUT: derive the status, then store (or re-initialize on empty body).
///
/// An empty or unavailable body is an explicit reset-to-default request,
/// not an in-place empty write. Oversized bodies are truncated by the
/// cell; truncation is not an error.
fn put(entry: &ResourceEntry, store: &mut ResourceStore, request: &Request) -> Response {
    let cell = store.cell_mut(entry.slot);
    let code = if cell.is_default() {
        ResponseCode::Created
    } else {
        ResponseCode::Changed
    };

    let body = request.payload_bytes();
    if body.is_empty() {
        cell.reset();
    } else {
        cell.set(body);
    }

    Response::empty(code)
}

/// DELETE: reset to default and respond Deleted.
///
/// For the counter resource this also zeroes the counter itself, so the
/// next GET reports `0`.
fn delete(entry: &ResourceEntry, store: &mut ResourceStore) -> Response {
    if let Backing::Counter(steps) = &entry.backing {
        steps.reset();
    }
    store.cell_mut(entry.slot).reset();
    Response::empty(ResponseCode::Deleted)
}
