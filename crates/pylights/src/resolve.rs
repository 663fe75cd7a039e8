//! Hostname resolution.
//!
//! The core only ever sees addresses. Hostnames such as `pylights.local`
//! are looked up here, preferring IPv4 since the device's HTTP server
//! binds to it.

use std::net::{IpAddr, SocketAddr};

use tracing::debug;

use crate::error::CliError;

/// Resolve `host` to an IP address string usable by `Controller::connect`.
pub async fn resolve_host(host: &str, port: u16) -> Result<String, CliError> {
    if let Ok(ip) = host.trim_matches(['[', ']']).parse::<IpAddr>() {
        return Ok(ip.to_string());
    }

    let addrs: Vec<SocketAddr> = tokio::net::lookup_host((host, port))
        .await
        .map_err(|e| CliError::ResolveFailed {
            host: host.to_owned(),
            reason: e.to_string(),
        })?
        .collect();

    let chosen = pick_address(&addrs).ok_or_else(|| CliError::ResolveFailed {
        host: host.to_owned(),
        reason: "no addresses returned".into(),
    })?;
    debug!(host, address = %chosen, "resolved device host");
    Ok(chosen.to_string())
}

/// First IPv4 address, else the first address of any family.
fn pick_address(addrs: &[SocketAddr]) -> Option<IpAddr> {
    addrs
        .iter()
        .find(|a| a.is_ipv4())
        .or_else(|| addrs.first())
        .map(SocketAddr::ip)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_ipv4() {
        let addrs: Vec<SocketAddr> = vec![
            "[fe80::1]:5001".parse().expect("v6"),
            "192.168.1.20:5001".parse().expect("v4"),
        ];
        assert_eq!(
            pick_address(&addrs),
            Some("192.168.1.20".parse().expect("ip"))
        );
    }

    #[tokio::test]
    async fn literal_addresses_skip_lookup() {
        assert_eq!(resolve_host("10.0.0.7", 5001).await.expect("ip"), "10.0.0.7");
        assert_eq!(resolve_host("[::1]", 5001).await.expect("ip"), "::1");
    }
}
