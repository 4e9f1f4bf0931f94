// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Deterministic in-process protocol engine.
//!
//! Stands in for a wire CoAP engine in tests and in the soak tool. The
//! stack side lives on the dispatch worker; the [`MemoryHandle`] side
//! lives on client threads and feeds it:
//!
//! ```text
//! MemoryHandle.submit() -> ArrayQueue (inbox) -> MemoryStack.take_request()
//!                                                     v
//! MemoryHandle.take_response() <- mailbox <- MemoryStack.respond()
//! ```
//!
//! Time is virtual: `process` never sleeps. Scheduled timer deadlines are
//! consumed against the caller's wait budget exactly the way a real
//! engine reports early timer fires, which is what the adaptive wait
//! scheduler is tested against. Poll faults and session-open faults are
//! injectable to drive the session-rebuild path.

use super::{EndpointPlan, ProtocolStack, StackFactory, TransportError};
use crate::protocol::{Method, ReplyToken, Request, Response};
use crossbeam::queue::ArrayQueue;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Capacity of the request ring.
const INBOX_DEPTH: usize = 64;

struct Shared {
    inbox: ArrayQueue<Request>,
    mailbox: Mutex<Vec<(ReplyToken, Response)>>,
    timers: Mutex<VecDeque<Duration>>,
    poll_faults: AtomicUsize,
    open_faults: AtomicUsize,
    sessions_opened: AtomicUsize,
    next_token: AtomicU64,
}

/// Decrement `counter` if positive; `true` when a fault was consumed.
fn consume_fault(counter: &AtomicUsize) -> bool {
    let mut current = counter.load(Ordering::Relaxed);
    while current > 0 {
        match counter.compare_exchange(current, current - 1, Ordering::Relaxed, Ordering::Relaxed)
        {
            Ok(_) => return true,
            Err(observed) => current = observed,
        }
    }
    false
}

/// Factory producing [`MemoryStack`] sessions over one shared state.
///
/// Resource state lives in the node; this shared state models the
/// network, so queued requests survive a session rebuild the way
/// in-flight datagrams survive a server restart.
pub struct MemoryTransport {
    shared: Arc<Shared>,
}

impl MemoryTransport {
    /// Create the factory and its client handle.
    #[must_use]
    pub fn new() -> (Self, MemoryHandle) {
        let shared = Arc::new(Shared {
            inbox: ArrayQueue::new(INBOX_DEPTH),
            mailbox: Mutex::new(Vec::new()),
            timers: Mutex::new(VecDeque::new()),
            poll_faults: AtomicUsize::new(0),
            open_faults: AtomicUsize::new(0),
            sessions_opened: AtomicUsize::new(0),
            next_token: AtomicU64::new(1),
        });
        (
            Self {
                shared: Arc::clone(&shared),
            },
            MemoryHandle { shared },
        )
    }
}

impl StackFactory for MemoryTransport {
    type Stack = MemoryStack;

    fn open(&mut self, plan: &EndpointPlan) -> Result<Self::Stack, TransportError> {
        if consume_fault(&self.shared.open_faults) {
            return Err(TransportError::Endpoint {
                reason: "injected endpoint failure".to_string(),
            });
        }
        self.shared.sessions_opened.fetch_add(1, Ordering::Relaxed);
        log::debug!(
            "[memory] stack open, port {} bindings {}",
            plan.port,
            plan.bindings.len()
        );
        Ok(MemoryStack {
            shared: Arc::clone(&self.shared),
        })
    }
}

/// One session of the in-process engine.
pub struct MemoryStack {
    shared: Arc<Shared>,
}

impl ProtocolStack for MemoryStack {
    fn process(&mut self, budget: Duration) -> Result<Duration, TransportError> {
        if consume_fault(&self.shared.poll_faults) {
            return Err(TransportError::Io(io::Error::new(
                io::ErrorKind::ConnectionReset,
                "injected transport fault",
            )));
        }

        let mut timers = self.shared.timers.lock();
        if let Some(front) = timers.front_mut() {
            // Timer inside the window: fires early, consumes its deadline.
            // Timer beyond the window: the full budget elapses and the
            // deadline moves closer.
            if *front <= budget {
                let consumed = *front;
                timers.pop_front();
                return Ok(consumed);
            }
            *front -= budget;
            return Ok(budget);
        }
        drop(timers);

        if self.shared.inbox.is_empty() {
            // Idle: the whole window elapsed with nothing to do.
            Ok(budget)
        } else {
            // Queued work is handed over without consuming wait time.
            Ok(Duration::ZERO)
        }
    }

    fn take_request(&mut self) -> Option<Request> {
        self.shared.inbox.pop()
    }

    fn respond(&mut self, token: ReplyToken, response: Response) -> Result<(), TransportError> {
        self.shared.mailbox.lock().push((token, response));
        Ok(())
    }
}

/// Client-side handle: request injection, response retrieval, fault and
/// timer scripting. Clone freely across threads.
#[derive(Clone)]
pub struct MemoryHandle {
    shared: Arc<Shared>,
}

impl MemoryHandle {
    /// Queue a request for the next dispatch iteration.
    ///
    /// Returns `None` when the ring is full (the request is dropped, as a
    /// saturated datagram socket would).
    pub fn submit(&self, method: Method, path: &str, payload: Option<&[u8]>) -> Option<ReplyToken> {
        let token = ReplyToken(self.shared.next_token.fetch_add(1, Ordering::Relaxed));
        let request = Request::new(method, path, payload.map(<[u8]>::to_vec), token);
        match self.shared.inbox.push(request) {
            Ok(()) => Some(token),
            Err(_) => {
                log::warn!("[memory] inbox full, dropping {} {}", method, path);
                None
            }
        }
    }

    /// Take the response for `token`, if the endpoint produced one.
    #[must_use]
    pub fn take_response(&self, token: ReplyToken) -> Option<Response> {
        let mut mailbox = self.shared.mailbox.lock();
        let index = mailbox.iter().position(|(t, _)| *t == token)?;
        Some(mailbox.swap_remove(index).1)
    }

    /// Drain every pending response.
    #[must_use]
    pub fn drain_responses(&self) -> Vec<(ReplyToken, Response)> {
        std::mem::take(&mut *self.shared.mailbox.lock())
    }

    /// Schedule a protocol timer `deadline` of virtual time away.
    pub fn schedule_timer(&self, deadline: Duration) {
        self.shared.timers.lock().push_back(deadline);
    }

    /// Make the next `count` polls fail hard.
    pub fn fail_polls(&self, count: usize) {
        self.shared.poll_faults.fetch_add(count, Ordering::Relaxed);
    }

    /// Make the next `count` session opens fail.
    pub fn fail_opens(&self, count: usize) {
        self.shared.open_faults.fetch_add(count, Ordering::Relaxed);
    }

    /// Sessions opened so far.
    #[must_use]
    pub fn sessions_opened(&self) -> usize {
        self.shared.sessions_opened.load(Ordering::Relaxed)
    }
}
