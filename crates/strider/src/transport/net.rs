// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Endpoint port reservation.
//!
//! The engine owns the sockets it actually serves on; this module only
//! claims the advertised udp/tcp port for the lifetime of a session so a
//! second node on the same host fails fast at session setup instead of
//! advertising a port it does not own. Dropping the reservation releases
//! the port - session teardown discards endpoint state, resource state
//! stays.

use super::{Binding, EndpointPlan};
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::{SocketAddr, TcpListener, UdpSocket};

/// Listen backlog for the TCP side of the reservation.
const TCP_BACKLOG: i32 = 8;

#[derive(Debug)]
enum Reserved {
    Udp(UdpSocket),
    Tcp(TcpListener),
}

/// Holds the advertised port's udp/tcp bindings for one session.
#[derive(Debug)]
pub struct PortReservation {
    reserved: Vec<Reserved>,
}

impl PortReservation {
    /// Bind every endpoint in `plan`.
    ///
    /// SO_REUSEADDR is deliberately NOT set: a duplicate node must get
    /// `AddrInUse` here, at session setup, where it is recoverable.
    ///
    /// # Errors
    /// Any bind failure. The caller treats this as session-fatal.
    pub fn bind(plan: &EndpointPlan) -> io::Result<Self> {
        let mut reserved = Vec::with_capacity(plan.bindings.len());

        for binding in &plan.bindings {
            let addr: SocketAddr = ([0, 0, 0, 0], plan.port).into();
            match binding {
                Binding::Udp => {
                    let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))?;
                    socket.set_nonblocking(true)?;
                    socket.bind(&addr.into())?;
                    log::debug!("[net] reserved udp {}", addr);
                    reserved.push(Reserved::Udp(socket.into()));
                }
                Binding::Tcp => {
                    let socket = Socket::new(Domain::IPV4, Type::STREAM, Some(Protocol::TCP))?;
                    socket.set_nonblocking(true)?;
                    socket.bind(&addr.into())?;
                    socket.listen(TCP_BACKLOG)?;
                    log::debug!("[net] reserved tcp {}", addr);
                    reserved.push(Reserved::Tcp(socket.into()));
                }
            }
        }

        Ok(Self { reserved })
    }

    /// Actual port of the UDP binding, if the plan had one.
    ///
    /// Differs from the plan's port only when the plan asked for port 0.
    #[must_use]
    pub fn udp_port(&self) -> Option<u16> {
        self.reserved.iter().find_map(|r| match r {
            Reserved::Udp(socket) => socket.local_addr().ok().map(|addr| addr.port()),
            Reserved::Tcp(_) => None,
        })
    }

    /// Number of bindings held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reserved.len()
    }

    /// `true` when nothing is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reserved.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reservation_binds_both_endpoints() {
        let plan = EndpointPlan::dual(0);
        let reservation = PortReservation::bind(&plan).expect("bind on port 0 should succeed");
        assert_eq!(reservation.len(), 2);
        assert!(reservation.udp_port().expect("udp binding present") > 0);
    }

    #[test]
    fn test_duplicate_reservation_fails_fast() {
        let first =
            PortReservation::bind(&EndpointPlan::dual(0)).expect("first bind should succeed");
        let taken = first.udp_port().expect("udp binding present");

        let err = PortReservation::bind(&EndpointPlan::dual(taken))
            .expect_err("second bind on the same udp port should fail");
        assert_eq!(err.kind(), io::ErrorKind::AddrInUse);
    }

    #[test]
    fn test_drop_releases_the_port() {
        let plan = EndpointPlan::dual(0);
        let first = PortReservation::bind(&plan).expect("first bind should succeed");
        let taken = first.udp_port().expect("udp binding present");
        drop(first);

        // Rebinding the released port succeeds once the reservation is gone.
        PortReservation::bind(&EndpointPlan::dual(taken))
            .expect("rebind after release should succeed");
    }
}
