// src/core/scanner/dns_scanner.rs

use hickory_resolver::TokioAsyncResolver;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tokio::net::lookup_host;
use tracing::{debug, warn};

/// Resolves `host:port` to every address the side probes may try.
///
/// IP literals, bracketed IPv6 included, are returned without a lookup. Names go
/// through the operating system resolver first, the same path the primary fetch
/// takes, so `/etc/hosts` entries and internal resolvers apply. When that yields
/// nothing, the system resolver configuration is queried directly through hickory.
/// The whole resolution is bounded by `timeout`.
///
/// # Returns
/// The addresses in resolver order, or a description of why there are none.
pub async fn resolve_addresses(
    host: &str,
    port: u16,
    timeout: Duration,
) -> Result<Vec<SocketAddr>, String> {
    let bare = host.trim_start_matches('[').trim_end_matches(']');
    if bare.is_empty() {
        return Err("No host to resolve".to_string());
    }
    if let Ok(ip) = bare.parse::<IpAddr>() {
        debug!(host = bare, "Host is an IP literal, skipping DNS lookup.");
        return Ok(vec![SocketAddr::new(ip, port)]);
    }

    match tokio::time::timeout(timeout, resolve_name(bare, port)).await {
        Ok(result) => result,
        Err(_) => {
            warn!(host = bare, ?timeout, "DNS lookup timed out.");
            Err(format!("DNS lookup timed out after {:?}", timeout))
        }
    }
}

async fn resolve_name(host: &str, port: u16) -> Result<Vec<SocketAddr>, String> {
    match lookup_host((host, port)).await {
        Ok(addrs) => {
            let addrs: Vec<SocketAddr> = addrs.collect();
            if !addrs.is_empty() {
                debug!(host, count = addrs.len(), "System resolver answered.");
                return Ok(addrs);
            }
            debug!(host, "System resolver returned no addresses.");
        }
        Err(e) => debug!(host, error = %e, "System resolver failed, asking hickory."),
    }

    let resolver = TokioAsyncResolver::tokio_from_system_conf().map_err(|e| {
        warn!(error = %e, "Could not load the system resolver configuration.");
        format!("DNS Error: {}", e)
    })?;
    let lookup = resolver.lookup_ip(host).await.map_err(|e| {
        warn!(host, error = %e, "DNS lookup failed.");
        format!("DNS Error: {}", e)
    })?;

    let addrs: Vec<SocketAddr> = lookup.iter().map(|ip| SocketAddr::new(ip, port)).collect();
    debug!(host, count = addrs.len(), "Hickory lookup finished.");
    if addrs.is_empty() {
        Err(format!("No address records found for {}", host))
    } else {
        Ok(addrs)
    }
}
