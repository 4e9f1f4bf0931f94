// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Resource registry: name -> handler-set binding and request routing.
//!
//! Registration happens once before the dispatch loop starts polling;
//! handlers registered after the engine accepts requests would race. After
//! startup the registry is read-only - only the value cells it points at
//! mutate.

use super::{handlers, ResourceEntry, ResourceSpec};
use crate::core::ResourceStore;
use crate::protocol::{Request, Response, ResponseCode};
use std::collections::HashMap;
use std::fmt;

/// Registry construction errors.
#[derive(Debug, Clone)]
pub enum RegistryError {
    /// A resource with this name is already registered.
    DuplicateName { name: String },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::DuplicateName { name } => {
                write!(f, "resource already registered: {}", name)
            }
        }
    }
}

impl std::error::Error for RegistryError {}

/// Maps resource names to their handler entries.
#[derive(Default)]
pub struct Registry {
    entries: HashMap<&'static str, ResourceEntry>,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `spec`, allocating its value cell in `store`.
    ///
    /// Registration order does not affect dispatch; names must be unique.
    pub fn register(
        &mut self,
        spec: ResourceSpec,
        store: &mut ResourceStore,
    ) -> Result<(), RegistryError> {
        if self.entries.contains_key(spec.name) {
            return Err(RegistryError::DuplicateName {
                name: spec.name.to_string(),
            });
        }

        let slot = store.alloc(spec.default);
        self.entries.insert(
            spec.name,
            ResourceEntry {
                methods: spec.methods,
                backing: spec.backing,
                slot,
            },
        );
        log::debug!("[registry] registered {}", spec.name);
        Ok(())
    }

    /// Number of registered resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Route one request to its handler and produce the response.
    ///
    /// Unknown names and disallowed methods are protocol-level negative
    /// responses, never local faults; the session keeps serving.
    pub fn dispatch(&self, store: &mut ResourceStore, request: &Request) -> Response {
        let Some(entry) = self.entries.get(request.path.as_str()) else {
            log::debug!("[registry] {} {}: no such resource", request.method, request.path);
            return Response::empty(ResponseCode::NotFound);
        };

        if !entry.methods.contains(request.method) {
            log::debug!(
                "[registry] {} {}: method not allowed",
                request.method,
                request.path
            );
            return Response::empty(ResponseCode::MethodNotAllowed);
        }

        let response = handlers::execute(entry, store, request);
        log::debug!(
            "[registry] {} {} -> {}",
            request.method,
            request.path,
            response.code
        );
        response
    }
}
