// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Strider Global Configuration - Single Source of Truth
//!
//! This module centralizes all protocol constants and runtime configuration.
//! **NEVER hardcode elsewhere!**
//!
//! # Architecture
//!
//! - **Level 1 (Static)**: Compile-time constants (port, capacity, timing)
//! - **Level 2 (Dynamic)**: [`NodeConfig`] for per-node runtime config with
//!   `STRIDER_*` environment overrides
//!
//! # Example
//!
//! ```
//! use strider::config::{NodeConfig, COAP_PORT};
//!
//! let config = NodeConfig::default();
//! assert_eq!(config.port, COAP_PORT);
//! ```

use std::time::Duration;

// =======================================================================
// Protocol constants (RFC 7252)
// =======================================================================

/// CoAP well-known port (RFC 7252 Sec.12.6, IANA registered).
///
/// Both the UDP and the TCP binding of the endpoint use this port.
/// **NEVER hardcode 5683 elsewhere!**
pub const COAP_PORT: u16 = 5683;

/// Fixed capacity of every resource value buffer, in bytes.
///
/// Writes larger than this are silently truncated; see
/// [`crate::core::ValueCell::set`].
pub const VALUE_CAPACITY: usize = 100;

// =======================================================================
// Dispatch loop timing
// =======================================================================

/// Base wait window handed to the protocol engine when the budget re-arms.
///
/// Matches the libcoap resource-check interval (2 s): periodic protocol
/// housekeeping keeps a stable period even when timers fire early.
pub const BASE_WAIT: Duration = Duration::from_secs(2);

/// Cooperative yield between dispatch iterations.
///
/// Bounds how hard the loop can spin when the engine returns immediately.
pub const YIELD_SLICE: Duration = Duration::from_millis(50);

// =======================================================================
// Runtime configuration
// =======================================================================

/// Per-node runtime configuration.
///
/// Defaults come from the constants above; [`NodeConfig::from_env`] applies
/// `STRIDER_*` environment overrides on top.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Base host identifier announced over mDNS (without suffix).
    pub hostname: String,
    /// Append a hardware-derived disambiguator to the hostname.
    pub hostname_suffix: bool,
    /// mDNS instance name.
    pub instance: String,
    /// Port for both endpoint bindings and the service advertisement.
    pub port: u16,
    /// Base wait window for the adaptive scheduler.
    pub base_wait: Duration,
    /// Cooperative yield between dispatch iterations.
    pub yield_slice: Duration,
    /// Reserve the advertised udp/tcp port at session setup.
    ///
    /// Lets a second node on the same host fail fast instead of serving a
    /// port it does not own. Disabled in tests.
    pub reserve_port: bool,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            hostname: "strider".to_string(),
            hostname_suffix: true,
            instance: "Strider Shoe".to_string(),
            port: COAP_PORT,
            base_wait: BASE_WAIT,
            yield_slice: YIELD_SLICE,
            reserve_port: false,
        }
    }
}

impl NodeConfig {
    /// Build a configuration from the environment.
    ///
    /// Recognized variables:
    ///
    /// | Variable | Meaning |
    /// |----------|---------|
    /// | `STRIDER_HOSTNAME` | base host identifier |
    /// | `STRIDER_HOST_SUFFIX` | `0` disables the hardware suffix |
    /// | `STRIDER_INSTANCE` | mDNS instance name |
    /// | `STRIDER_PORT` | endpoint/advertisement port |
    ///
    /// Unparseable values are logged and ignored.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(hostname) = std::env::var("STRIDER_HOSTNAME") {
            if !hostname.is_empty() {
                config.hostname = hostname;
            }
        }
        if let Ok(suffix) = std::env::var("STRIDER_HOST_SUFFIX") {
            config.hostname_suffix = suffix != "0";
        }
        if let Ok(instance) = std::env::var("STRIDER_INSTANCE") {
            if !instance.is_empty() {
                config.instance = instance;
            }
        }
        if let Ok(port) = std::env::var("STRIDER_PORT") {
            match port.parse::<u16>() {
                Ok(port) => config.port = port,
                Err(err) => {
                    log::warn!("[config] ignoring STRIDER_PORT={}: {}", port, err);
                }
            }
        }

        config
    }
}
