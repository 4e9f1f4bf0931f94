// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # Strider Example: Shoe Walkthrough
//!
//! Walks the whole attribute surface once over the in-process engine:
//! reads, writes, a reset, and the derived step counter.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example shoe_walkthrough
//! ```

use std::time::Duration;
use strider::protocol::Method;
use strider::{MemoryTransport, Node, NodeConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (transport, handle) = MemoryTransport::new();
    let config = NodeConfig {
        yield_slice: Duration::ZERO,
        ..NodeConfig::default()
    };
    let mut node = Node::new(config, transport)?;
    let mut session = node.open_session()?;

    let script: [(Method, &str, Option<&[u8]>); 9] = [
        (Method::Get, "shoe/size", None),
        (Method::Get, "shoe/name", None),
        (Method::Put, "shoe/name", Some(b"Boots")),
        (Method::Get, "shoe/name", None),
        (Method::Put, "shoe/shoelace", Some(b"tie")),
        (Method::Put, "shoe/ledcolor", Some(b"FF8800")),
        (Method::Get, "shoe/steps", None),
        (Method::Delete, "shoe/name", None),
        (Method::Get, "shoe/name", None),
    ];

    for (method, path, payload) in script {
        let token = handle
            .submit(method, path, payload)
            .expect("inbox should accept the request");
        node.step(&mut session)?;
        let response = handle
            .take_response(token)
            .expect("request answered within one iteration");
        println!(
            "{:>6} {:<14} -> {} {}",
            method.to_string(),
            path,
            response.code,
            String::from_utf8_lossy(&response.payload)
        );
    }

    Ok(())
}
