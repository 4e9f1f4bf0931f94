// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # Strider - Smart-Shoe CoAP Resource Endpoint
//!
//! A pure Rust endpoint exposing a smart shoe's mutable attributes (lace
//! state, LED color, step count, size, name) as CoAP resources on the
//! well-known port, advertised over mDNS for local discovery.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use strider::{MemoryTransport, Node, NodeConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (transport, _handle) = MemoryTransport::new();
//!     let mut node = Node::new(NodeConfig::default(), transport)?;
//!
//!     // Register with the discovery responder, then serve forever.
//!     let mut advertiser = strider::discovery::LogAdvertiser;
//!     node.advertise(&mut advertiser)?;
//!     node.serve()
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +--------------------------------------------------------------------+
//! |                          Session Layer                             |
//! |   Node::serve -> open_session -> dispatch loop -> rebuild on error |
//! +--------------------------------------------------------------------+
//! |                          Resource Layer                            |
//! |   Registry lookup | Method gate | Handlers | ResourceStore cells   |
//! +--------------------------------------------------------------------+
//! |                         Boundary Traits                            |
//! |   ProtocolStack (CoAP engine)  |  Advertiser (mDNS responder)      |
//! +--------------------------------------------------------------------+
//! ```
//!
//! The protocol engine (framing, acknowledgement, retransmission,
//! block-wise reassembly) and the mDNS responder are collaborators behind
//! traits; this crate implements the endpoint core. A deterministic
//! in-process engine ([`MemoryTransport`]) backs the tests and the soak
//! tool.
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Node`] | The endpoint: resource state plus session lifecycle |
//! | [`NodeConfig`] | Runtime configuration with `STRIDER_*` env overrides |
//! | [`Registry`] | Name -> handler-set binding, request routing |
//! | [`ResourceStore`] | Bounded value cells backing every attribute |
//! | [`WaitBudget`] | Adaptive wait window for the transport poll |
//! | [`ProtocolStack`] | Protocol-engine boundary trait |
//! | [`Advertiser`](discovery::Advertiser) | Discovery-responder boundary trait |
//!
//! ## Modules Overview
//!
//! - [`engine`] - dispatch loop, session lifecycle, wait pacing (start here)
//! - [`resource`] - method sets, handlers, registry, the shoe catalog
//! - [`core`] - value storage and the step counter
//! - [`transport`] - protocol-engine boundary, port reservation, memory engine
//! - [`discovery`] - mDNS advertisement boundary
//! - [`config`] - constants and runtime configuration
//!
//! ## See Also
//!
//! - [RFC 7252](https://www.rfc-editor.org/rfc/rfc7252) - CoAP
//! - [RFC 6762](https://www.rfc-editor.org/rfc/rfc6762) - Multicast DNS
//! - [RFC 6763](https://www.rfc-editor.org/rfc/rfc6763) - DNS-Based Service Discovery

/// Constants and runtime configuration.
pub mod config;
/// Endpoint core state: value storage and the step counter.
pub mod core;
/// mDNS advertisement boundary.
pub mod discovery;
/// Dispatch loop, session lifecycle, wait pacing.
pub mod engine;
/// Console logging glue for the `log` facade.
pub mod logging;
/// Protocol boundary types shared with the engine.
pub mod protocol;
/// Resource model: method sets, handlers, registry, the shoe catalog.
pub mod resource;
/// Protocol-engine boundary, port reservation, in-process engine.
pub mod transport;

pub use crate::core::{ResourceStore, StepCounter};
pub use config::NodeConfig;
pub use engine::{Node, Session, WaitBudget};
pub use protocol::{Method, ReplyToken, Request, Response, ResponseCode};
pub use resource::{Registry, RegistryError};
pub use transport::{
    MemoryHandle, MemoryTransport, ProtocolStack, StackFactory, TransportError,
};
