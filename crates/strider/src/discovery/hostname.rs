// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Host identifier generation.
//!
//! Several nodes of the same model can share a network, so the announced
//! hostname may carry a hardware-derived disambiguator. The suffix is
//! derived from the primary interface address; a host without a usable
//! interface falls back to the bare base name with a warning.

use std::net::IpAddr;

/// Build the announced hostname from `base`.
///
/// With `with_suffix`, appends three hex bytes derived from the primary
/// interface address, e.g. `strider-C0A816`.
#[must_use]
pub fn generate_hostname(base: &str, with_suffix: bool) -> String {
    if !with_suffix {
        return base.to_string();
    }

    match local_ip_address::local_ip() {
        Ok(IpAddr::V4(ip)) => {
            let octets = ip.octets();
            format!(
                "{}-{:02X}{:02X}{:02X}",
                base, octets[1], octets[2], octets[3]
            )
        }
        Ok(IpAddr::V6(ip)) => {
            let segments = ip.segments();
            format!("{}-{:04X}{:04X}", base, segments[6], segments[7])
        }
        Err(err) => {
            log::warn!("[mdns] no primary interface address ({}), using bare hostname", err);
            base.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_hostname_without_suffix() {
        assert_eq!(generate_hostname("strider", false), "strider");
    }

    #[test]
    fn test_suffixed_hostname_shape() {
        let hostname = generate_hostname("strider", true);
        assert!(hostname.starts_with("strider"));
        if let Some(suffix) = hostname.strip_prefix("strider-") {
            // Three or four hex bytes depending on address family.
            assert!(suffix.len() == 6 || suffix.len() == 8);
            assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
        }
    }
}
