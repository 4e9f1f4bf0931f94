// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! End-to-end tests over the in-process engine: client handle -> dispatch
//! loop -> registry -> handlers -> response.

use std::time::Duration;
use strider::protocol::{Method, Response, ResponseCode};
use strider::transport::{MemoryHandle, MemoryStack, MemoryTransport};
use strider::{Node, NodeConfig, Session};

fn test_node() -> (Node<MemoryTransport>, Session<MemoryStack>, MemoryHandle) {
    let (transport, handle) = MemoryTransport::new();
    let config = NodeConfig {
        yield_slice: Duration::ZERO,
        ..NodeConfig::default()
    };
    let mut node = Node::new(config, transport).expect("node should build");
    let session = node.open_session().expect("session should open");
    (node, session, handle)
}

/// Submit one request and run the loop until it is answered.
fn roundtrip(
    node: &mut Node<MemoryTransport>,
    session: &mut Session<MemoryStack>,
    handle: &MemoryHandle,
    method: Method,
    path: &str,
    payload: Option<&[u8]>,
) -> Response {
    let token = handle
        .submit(method, path, payload)
        .expect("inbox should accept the request");
    node.step(session).expect("step should succeed");
    handle
        .take_response(token)
        .expect("request should be answered within one iteration")
}

#[test]
fn test_name_lifecycle_scenario() {
    let (mut node, mut session, handle) = test_node();

    let read = roundtrip(&mut node, &mut session, &handle, Method::Get, "shoe/name", None);
    assert_eq!(read.code, ResponseCode::Content);
    assert_eq!(read.payload, b"Empty");

    let write = roundtrip(
        &mut node,
        &mut session,
        &handle,
        Method::Put,
        "shoe/name",
        Some(b"Boots"),
    );
    assert_eq!(write.code, ResponseCode::Created);

    let read = roundtrip(&mut node, &mut session, &handle, Method::Get, "shoe/name", None);
    assert_eq!(read.payload, b"Boots");

    let write = roundtrip(
        &mut node,
        &mut session,
        &handle,
        Method::Put,
        "shoe/name",
        Some(b"Sneakers"),
    );
    assert_eq!(write.code, ResponseCode::Changed);

    let delete = roundtrip(
        &mut node,
        &mut session,
        &handle,
        Method::Delete,
        "shoe/name",
        None,
    );
    assert_eq!(delete.code, ResponseCode::Deleted);

    let read = roundtrip(&mut node, &mut session, &handle, Method::Get, "shoe/name", None);
    assert_eq!(read.payload, b"Empty");
}

#[test]
fn test_empty_body_write_resets_lace_state() {
    let (mut node, mut session, handle) = test_node();

    roundtrip(
        &mut node,
        &mut session,
        &handle,
        Method::Put,
        "shoe/shoelace",
        Some(b"tie"),
    );

    let reset = roundtrip(
        &mut node,
        &mut session,
        &handle,
        Method::Put,
        "shoe/shoelace",
        Some(b""),
    );
    assert_eq!(reset.code, ResponseCode::Changed);

    let read = roundtrip(
        &mut node,
        &mut session,
        &handle,
        Method::Get,
        "shoe/shoelace",
        None,
    );
    assert_eq!(read.payload, b"untie");
}

#[test]
fn test_oversized_write_stores_exactly_capacity() {
    let (mut node, mut session, handle) = test_node();
    let oversized = vec![b'z'; 150];

    let write = roundtrip(
        &mut node,
        &mut session,
        &handle,
        Method::Put,
        "shoe/data",
        Some(&oversized),
    );
    assert_eq!(write.code, ResponseCode::Changed);

    let read = roundtrip(&mut node, &mut session, &handle, Method::Get, "shoe/data", None);
    assert_eq!(read.payload.len(), 100);
    assert_eq!(read.payload, &oversized[..100]);
}

#[test]
fn test_writable_resources_report_created_then_changed() {
    let (mut node, mut session, handle) = test_node();

    for path in ["shoe/data", "shoe/shoelace", "shoe/ledcolor", "shoe/name"] {
        let first = roundtrip(
            &mut node,
            &mut session,
            &handle,
            Method::Put,
            path,
            Some(b"first-value"),
        );
        assert_eq!(first.code, ResponseCode::Created, "first write to {}", path);

        let second = roundtrip(
            &mut node,
            &mut session,
            &handle,
            Method::Put,
            path,
            Some(b"second-value"),
        );
        assert_eq!(second.code, ResponseCode::Changed, "second write to {}", path);
    }
}

#[test]
fn test_delete_restores_defaults() {
    let (mut node, mut session, handle) = test_node();
    let cases: [(&str, &[u8]); 3] = [
        ("shoe/data", b"Hello World!"),
        ("shoe/ledcolor", b"000000"),
        ("shoe/name", b"Empty"),
    ];

    for (path, default) in cases {
        roundtrip(
            &mut node,
            &mut session,
            &handle,
            Method::Put,
            path,
            Some(b"overwritten"),
        );
        let delete = roundtrip(&mut node, &mut session, &handle, Method::Delete, path, None);
        assert_eq!(delete.code, ResponseCode::Deleted, "delete of {}", path);

        let read = roundtrip(&mut node, &mut session, &handle, Method::Get, path, None);
        assert_eq!(read.payload, default, "default of {}", path);
    }
}

#[test]
fn test_shoelace_does_not_expose_delete() {
    let (mut node, mut session, handle) = test_node();

    let delete = roundtrip(
        &mut node,
        &mut session,
        &handle,
        Method::Delete,
        "shoe/shoelace",
        None,
    );
    assert_eq!(delete.code, ResponseCode::MethodNotAllowed);
}

#[test]
fn test_size_is_read_only() {
    let (mut node, mut session, handle) = test_node();

    let put = roundtrip(
        &mut node,
        &mut session,
        &handle,
        Method::Put,
        "shoe/size",
        Some(b"11W"),
    );
    assert_eq!(put.code, ResponseCode::MethodNotAllowed);

    let delete = roundtrip(&mut node, &mut session, &handle, Method::Delete, "shoe/size", None);
    assert_eq!(delete.code, ResponseCode::MethodNotAllowed);

    let read = roundtrip(&mut node, &mut session, &handle, Method::Get, "shoe/size", None);
    assert_eq!(read.code, ResponseCode::Content);
    assert_eq!(read.payload, b"7.5MX");
}

#[test]
fn test_unknown_resource_is_not_found() {
    let (mut node, mut session, handle) = test_node();

    let read = roundtrip(
        &mut node,
        &mut session,
        &handle,
        Method::Get,
        "shoe/heel-height",
        None,
    );
    assert_eq!(read.code, ResponseCode::NotFound);

    // The session keeps serving other resources afterwards.
    let read = roundtrip(&mut node, &mut session, &handle, Method::Get, "shoe/size", None);
    assert_eq!(read.code, ResponseCode::Content);
}

#[test]
fn test_steps_reports_loop_iterations_in_ascii_decimal() {
    let (mut node, mut session, handle) = test_node();

    // Three idle iterations, then the read itself is iteration four.
    for _ in 0..3 {
        node.step(&mut session).expect("idle step should succeed");
    }
    let read = roundtrip(&mut node, &mut session, &handle, Method::Get, "shoe/steps", None);
    assert_eq!(read.payload, b"4");
    assert_eq!(node.steps(), 4);
}

#[test]
fn test_steps_tick_once_per_iteration_regardless_of_request_volume() {
    let (mut node, mut session, handle) = test_node();

    // Both reads land in the same iteration and must agree.
    let first = handle
        .submit(Method::Get, "shoe/steps", None)
        .expect("submit should succeed");
    let second = handle
        .submit(Method::Get, "shoe/steps", None)
        .expect("submit should succeed");
    node.step(&mut session).expect("step should succeed");

    let first = handle.take_response(first).expect("first response");
    let second = handle.take_response(second).expect("second response");
    assert_eq!(first.payload, b"1");
    assert_eq!(second.payload, b"1");
    assert_eq!(node.steps(), 1);
}

#[test]
fn test_steps_delete_resets_the_counter() {
    let (mut node, mut session, handle) = test_node();

    for _ in 0..5 {
        node.step(&mut session).expect("idle step should succeed");
    }
    let delete = roundtrip(
        &mut node,
        &mut session,
        &handle,
        Method::Delete,
        "shoe/steps",
        None,
    );
    assert_eq!(delete.code, ResponseCode::Deleted);

    // The reset lands mid-iteration; the next read sees only the ticks
    // that happened after it.
    let read = roundtrip(&mut node, &mut session, &handle, Method::Get, "shoe/steps", None);
    assert_eq!(read.payload, b"1");
}

#[test]
fn test_steps_rejects_put() {
    let (mut node, mut session, handle) = test_node();

    let put = roundtrip(
        &mut node,
        &mut session,
        &handle,
        Method::Put,
        "shoe/steps",
        Some(b"9000"),
    );
    assert_eq!(put.code, ResponseCode::MethodNotAllowed);
}
