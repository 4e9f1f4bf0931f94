// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Protocol-engine boundary.
//!
//! The endpoint does not parse, acknowledge, or retransmit CoAP messages;
//! a protocol engine does, behind the [`ProtocolStack`] trait. The
//! contract mirrors the engine model the dispatch loop is built around:
//!
//! - [`ProtocolStack::process`] blocks for at most the caller's wait
//!   budget, drives protocol work (retransmission timers, block-wise
//!   reassembly), and reports how much time it consumed. Reporting the
//!   full budget means nothing happened before the window closed.
//! - Requests parsed during a `process` call are drained afterwards via
//!   [`ProtocolStack::take_request`]; each carries an opaque
//!   [`ReplyToken`](crate::protocol::ReplyToken) that travels back in
//!   [`ProtocolStack::respond`].
//! - A hard `process` error condemns the whole session; the node tears
//!   the stack down and builds a fresh one via [`StackFactory::open`].
//!
//! # Modules
//!
//! - [`net`] - socket2-backed reservation of the advertised udp/tcp port
//! - [`memory`] - deterministic in-process engine for tests and the soak
//!   tool

pub mod memory;
pub mod net;

pub use memory::{MemoryHandle, MemoryStack, MemoryTransport};
pub use net::PortReservation;

use crate::protocol::{ReplyToken, Request, Response};
use std::fmt;
use std::io;
use std::time::Duration;

/// Transport/session errors. Any of these is session-fatal: the current
/// stack is abandoned and the outer loop rebuilds it.
#[derive(Debug)]
pub enum TransportError {
    /// Endpoint construction failed (e.g. the port is already bound).
    Endpoint { reason: String },
    /// The engine reported a hard I/O failure while polling.
    Io(io::Error),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Endpoint { reason } => write!(f, "endpoint setup failed: {}", reason),
            TransportError::Io(err) => write!(f, "transport I/O failed: {}", err),
        }
    }
}

impl std::error::Error for TransportError {}

impl From<io::Error> for TransportError {
    fn from(err: io::Error) -> Self {
        TransportError::Io(err)
    }
}

/// One transport binding of the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// Connectionless binding (CoAP over UDP).
    Udp,
    /// Connection-oriented binding (CoAP over TCP).
    Tcp,
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Udp => write!(f, "udp"),
            Binding::Tcp => write!(f, "tcp"),
        }
    }
}

/// The endpoints one session multiplexes.
#[derive(Debug, Clone)]
pub struct EndpointPlan {
    /// Port shared by every binding.
    pub port: u16,
    /// Bindings to open, in order.
    pub bindings: Vec<Binding>,
}

impl EndpointPlan {
    /// The standard dual plan: UDP and TCP on the same port, one request
    /// multiplexer across both.
    #[must_use]
    pub fn dual(port: u16) -> Self {
        Self {
            port,
            bindings: vec![Binding::Udp, Binding::Tcp],
        }
    }
}

/// A protocol engine bound to one session's endpoints.
pub trait ProtocolStack {
    /// Drive protocol work for at most `budget`.
    ///
    /// Returns the time the engine consumed: strictly less than `budget`
    /// when a protocol timer fired early, `budget` (or more) when the
    /// full window elapsed. May parse any number of requests internally;
    /// drain them with [`ProtocolStack::take_request`] afterwards.
    ///
    /// # Errors
    /// A hard I/O failure; the session must be torn down.
    fn process(&mut self, budget: Duration) -> Result<Duration, TransportError>;

    /// Next request parsed by the engine, if any.
    fn take_request(&mut self) -> Option<Request>;

    /// Hand a finished response back for transmission.
    ///
    /// # Errors
    /// A hard I/O failure; the session must be torn down.
    fn respond(&mut self, token: ReplyToken, response: Response) -> Result<(), TransportError>;
}

/// Builds a fresh [`ProtocolStack`] for each session.
///
/// The node calls this once per session; after a hard error the old stack
/// is dropped and `open` runs again with the same plan.
pub trait StackFactory {
    /// The stack type this factory produces.
    type Stack: ProtocolStack;

    /// Open a stack bound to `plan`.
    ///
    /// # Errors
    /// Endpoint acquisition failed; the session cannot start.
    fn open(&mut self, plan: &EndpointPlan) -> Result<Self::Stack, TransportError>;
}
