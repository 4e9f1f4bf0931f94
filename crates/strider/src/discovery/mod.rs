// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Discovery boundary: mDNS service advertisement.
//!
//! The node does not speak mDNS; a responder does, behind the
//! [`Advertiser`] trait. At startup the node registers a host identifier,
//! an instance name, the service/proto/port triple and a small set of TXT
//! records, then may update individual records afterwards. Registration
//! failure is startup-fatal for the process: an endpoint nobody can
//! discover must not start serving.

pub mod hostname;

pub use hostname::generate_hostname;

use std::fmt;

/// Result alias for discovery-related operations.
pub type DiscoveryResult<T> = Result<T, DiscoveryError>;

/// Discovery subsystem error categorisation.
#[derive(Debug, Clone)]
pub enum DiscoveryError {
    /// The responder rejected the service registration.
    RegistrationFailed { reason: String },
    /// A TXT record update was rejected.
    UpdateFailed { reason: String },
}

impl fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscoveryError::RegistrationFailed { reason } => {
                write!(f, "service registration failed: {}", reason)
            }
            DiscoveryError::UpdateFailed { reason } => {
                write!(f, "TXT record update failed: {}", reason)
            }
        }
    }
}

impl std::error::Error for DiscoveryError {}

/// Everything the responder needs to announce one service instance.
#[derive(Debug, Clone)]
pub struct ServiceRegistration {
    /// Host identifier, already suffixed if configured.
    pub hostname: String,
    /// Human-readable instance name.
    pub instance: String,
    /// Service label, e.g. `_coap`.
    pub service: String,
    /// Protocol label, e.g. `_udp`.
    pub proto: String,
    /// Advertised port.
    pub port: u16,
    /// Descriptive key/value records.
    pub txt: Vec<(String, String)>,
}

/// A local-network discovery responder.
pub trait Advertiser {
    /// Register `registration` with the responder.
    ///
    /// # Errors
    /// The responder could not take the registration; callers treat this
    /// as fatal at startup.
    fn register(&mut self, registration: &ServiceRegistration) -> DiscoveryResult<()>;

    /// Add or replace one TXT record of an already-registered service.
    ///
    /// # Errors
    /// The responder could not apply the update.
    fn set_txt(&mut self, service: &str, proto: &str, key: &str, value: &str)
        -> DiscoveryResult<()>;
}

/// Advertiser that only logs what a responder would announce.
///
/// Used by the soak tool, and wherever no real responder is wired up.
#[derive(Debug, Default)]
pub struct LogAdvertiser;

impl Advertiser for LogAdvertiser {
    fn register(&mut self, registration: &ServiceRegistration) -> DiscoveryResult<()> {
        log::info!(
            "[mdns] register {} '{}' {}.{} port {} ({} TXT records)",
            registration.hostname,
            registration.instance,
            registration.service,
            registration.proto,
            registration.port,
            registration.txt.len()
        );
        Ok(())
    }

    fn set_txt(
        &mut self,
        service: &str,
        proto: &str,
        key: &str,
        value: &str,
    ) -> DiscoveryResult<()> {
        log::info!("[mdns] txt {}.{} {}={}", service, proto, key, value);
        Ok(())
    }
}

/// In-memory advertiser recording every call, with injectable failure.
#[derive(Debug, Default)]
pub struct RecordingAdvertiser {
    /// Registrations received, in order.
    pub registrations: Vec<ServiceRegistration>,
    /// TXT updates received as `(service, proto, key, value)`.
    pub txt_updates: Vec<(String, String, String, String)>,
    fail_registration: bool,
}

impl RecordingAdvertiser {
    /// Create an advertiser that accepts everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make [`Advertiser::register`] fail.
    pub fn fail_registration(&mut self) {
        self.fail_registration = true;
    }
}

impl Advertiser for RecordingAdvertiser {
    fn register(&mut self, registration: &ServiceRegistration) -> DiscoveryResult<()> {
        if self.fail_registration {
            return Err(DiscoveryError::RegistrationFailed {
                reason: "injected registration failure".to_string(),
            });
        }
        self.registrations.push(registration.clone());
        Ok(())
    }

    fn set_txt(
        &mut self,
        service: &str,
        proto: &str,
        key: &str,
        value: &str,
    ) -> DiscoveryResult<()> {
        self.txt_updates.push((
            service.to_string(),
            proto.to_string(),
            key.to_string(),
            value.to_string(),
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> ServiceRegistration {
        ServiceRegistration {
            hostname: "strider-0A1B2C".to_string(),
            instance: "Strider Shoe".to_string(),
            service: "_coap".to_string(),
            proto: "_udp".to_string(),
            port: 5683,
            txt: vec![("model".to_string(), "strider-one".to_string())],
        }
    }

    #[test]
    fn test_recording_advertiser_captures_calls() {
        let mut advertiser = RecordingAdvertiser::new();
        advertiser
            .register(&registration())
            .expect("registration should succeed");
        advertiser
            .set_txt("_coap", "_udp", "path", "/shoe")
            .expect("update should succeed");

        assert_eq!(advertiser.registrations.len(), 1);
        assert_eq!(advertiser.registrations[0].port, 5683);
        assert_eq!(
            advertiser.txt_updates,
            vec![(
                "_coap".to_string(),
                "_udp".to_string(),
                "path".to_string(),
                "/shoe".to_string()
            )]
        );
    }

    #[test]
    fn test_recording_advertiser_injected_failure() {
        let mut advertiser = RecordingAdvertiser::new();
        advertiser.fail_registration();

        let err = advertiser
            .register(&registration())
            .expect_err("injected failure should surface");
        assert!(matches!(err, DiscoveryError::RegistrationFailed { .. }));
        assert!(advertiser.registrations.is_empty());
    }

    #[test]
    fn test_discovery_error_display() {
        let err = DiscoveryError::RegistrationFailed {
            reason: "responder down".into(),
        };
        assert_eq!(
            err.to_string(),
            "service registration failed: responder down"
        );
    }
}
