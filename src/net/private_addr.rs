//! Private-address detection.
//!
//! The default admission predicate backing the private-host check: a URL
//! is private when its host is, or resolves to, an address inside a
//! non-public range (loopback, RFC1918, link-local, unique-local, the
//! cloud metadata range, unspecified). Hostname resolution failure is a
//! check failure, never an implicit allow; this predicate guards a
//! security boundary.

use std::net::IpAddr;

use url::{Host, Url};

use crate::gateway::error::ValidatorError;

/// Decide whether a URL points at a private/non-public address.
///
/// Literal IP hosts are checked directly; domain hosts are resolved via
/// DNS and every resolved address is checked, so a name with any private
/// A/AAAA record counts as private.
pub async fn is_private_url(url: &str) -> Result<bool, ValidatorError> {
    let parsed =
        Url::parse(url).map_err(|e| ValidatorError::new(format!("invalid URL: {}", e)))?;
    let host = parsed
        .host()
        .ok_or_else(|| ValidatorError::new("URL has no host"))?;

    match host {
        Host::Ipv4(v4) => Ok(is_private_ip(IpAddr::V4(v4))),
        Host::Ipv6(v6) => Ok(is_private_ip(IpAddr::V6(v6))),
        Host::Domain(domain) => {
            let port = parsed.port_or_known_default().unwrap_or(80);
            let addrs = tokio::net::lookup_host((domain, port)).await.map_err(|e| {
                ValidatorError::new(format!("failed to resolve host {}: {}", domain, e))
            })?;

            let mut resolved_any = false;
            for addr in addrs {
                resolved_any = true;
                if is_private_ip(addr.ip()) {
                    return Ok(true);
                }
            }

            if !resolved_any {
                return Err(ValidatorError::new(format!(
                    "host {} did not resolve to any address",
                    domain
                )));
            }
            Ok(false)
        }
    }
}

/// Range check for a single address.
pub fn is_private_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            v4.is_loopback()
                || v4.is_private()
                || v4.is_link_local()
                || v4.is_broadcast()
                || v4.is_unspecified()
                || v4.octets()[0] == 0
        }
        IpAddr::V6(v6) => {
            if v6.is_loopback() || v6.is_unspecified() {
                return true;
            }
            // IPv4-mapped addresses (::ffff:10.0.0.1 etc) inherit the v4 verdict.
            if let Some(v4) = v6.to_ipv4_mapped() {
                return is_private_ip(IpAddr::V4(v4));
            }
            let segments = v6.segments();
            // fe80::/10 link-local
            if segments[0] & 0xffc0 == 0xfe80 {
                return true;
            }
            // fc00::/7 unique local
            if segments[0] & 0xfe00 == 0xfc00 {
                return true;
            }
            false
        }
    }
}
