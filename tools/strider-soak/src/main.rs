// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # strider-soak: Long-Running Endpoint Soak Harness
//!
//! Runs a full node - discovery registration, port reservation, dispatch
//! loop - with a client thread cycling scripted traffic through the
//! in-process engine, forever. Useful for watching session-rebuild
//! behavior and counter drift over hours.
//!
//! Configuration comes from the `STRIDER_*` environment (see
//! `strider::config::NodeConfig::from_env`); log level from
//! `STRIDER_LOG`.
//!
//! ```bash
//! STRIDER_LOG=debug cargo run -p strider-soak
//! ```

#![allow(clippy::uninlined_format_args)] // Tool code readability over pedantic

use std::thread;
use std::time::Duration;
use strider::discovery::LogAdvertiser;
use strider::protocol::Method;
use strider::transport::MemoryHandle;
use strider::{MemoryTransport, Node, NodeConfig};

/// Pause between scripted requests.
const REQUEST_GAP: Duration = Duration::from_millis(300);
/// Virtual protocol-timer deadline injected once per cycle.
const CYCLE_TIMER: Duration = Duration::from_millis(750);

fn main() {
    if strider::logging::init_from_env().is_err() {
        eprintln!("strider-soak: logger already installed");
    }

    let mut config = NodeConfig::from_env();
    // Claim the advertised port so a second soak on this host fails fast.
    config.reserve_port = true;

    let (transport, handle) = MemoryTransport::new();
    let mut node = match Node::new(config, transport) {
        Ok(node) => node,
        Err(err) => {
            log::error!("[soak] node setup failed: {}", err);
            std::process::exit(1);
        }
    };

    // Discoverability is a precondition of serving: registration failure
    // stops the process before any session opens.
    let mut advertiser = LogAdvertiser;
    if let Err(err) = node.advertise(&mut advertiser) {
        log::error!("[soak] discovery registration failed: {}", err);
        std::process::exit(1);
    }

    thread::spawn(move || exercise(handle));

    log::info!("[soak] serving");
    node.serve()
}

/// Cycle the whole attribute surface, forever.
fn exercise(handle: MemoryHandle) {
    let cycle: &[(Method, &str, Option<&[u8]>)] = &[
        (Method::Get, "shoe/size", None),
        (Method::Put, "shoe/shoelace", Some(b"tie")),
        (Method::Put, "shoe/ledcolor", Some(b"FF8800")),
        (Method::Get, "shoe/steps", None),
        (Method::Put, "shoe/name", Some(b"Boots")),
        (Method::Get, "shoe/name", None),
        (Method::Delete, "shoe/name", None),
        (Method::Put, "shoe/shoelace", None),
    ];

    loop {
        for (method, path, payload) in cycle {
            let Some(token) = handle.submit(*method, path, *payload) else {
                thread::sleep(REQUEST_GAP);
                continue;
            };

            thread::sleep(REQUEST_GAP);
            match handle.take_response(token) {
                Some(response) => {
                    log::info!(
                        "[soak] {} {} -> {} {}",
                        method,
                        path,
                        response.code,
                        String::from_utf8_lossy(&response.payload)
                    );
                }
                None => log::warn!("[soak] {} {} not answered yet", method, path),
            }
        }

        // Keep the adaptive budget honest with an occasional early timer.
        handle.schedule_timer(CYCLE_TIMER);

        // Late answers to warned-about requests would otherwise pile up.
        let stale = handle.drain_responses();
        if !stale.is_empty() {
            log::debug!("[soak] discarded {} late responses", stale.len());
        }
    }
}
