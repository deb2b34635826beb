// src/core/scanner/ssl_scanner.rs

use tracing::{debug, error, info, warn};

use crate::core::scanner::dns_scanner::resolve_addresses;
use chrono::{DateTime, Utc};
use native_tls::TlsConnector;
use std::net::{SocketAddr, TcpStream};
use std::time::{Duration, Instant};
use tokio::task::spawn_blocking;
use x509_parser::prelude::*;

const HTTPS_PORT: u16 = 443;
// connect_timeout rejects a zero duration.
const MIN_STEP: Duration = Duration::from_millis(10);

// What the handshake proved about the peer. Only logged: the report keeps a single
// liveness bit.
struct PeerCertificate {
    subject: String,
    issuer: String,
    not_after: DateTime<Utc>,
}

/// Probes whether `host` completes a TLS handshake on port 443.
///
/// The handshake uses the platform trust store and hostname verification, so an
/// untrusted or mismatched certificate fails it. Every resolved address is tried in
/// turn. The probe as a whole, resolution included, is bounded by `timeout`; any
/// failure yields `false`.
///
/// # Arguments
/// * `host` - Host component of the target URL (IPv6 may be bracketed).
/// * `timeout` - Overall time limit of the probe.
pub async fn run_ssl_probe(host: &str, timeout: Duration) -> bool {
    probe_tls(host, HTTPS_PORT, timeout).await
}

async fn probe_tls(host: &str, port: u16, timeout: Duration) -> bool {
    info!(host, port, "Starting TLS handshake probe.");
    let bare = host.trim_start_matches('[').trim_end_matches(']').to_string();
    if bare.is_empty() {
        warn!("No host to probe, treating TLS as invalid.");
        return false;
    }

    let started = Instant::now();
    let attempt = async {
        let addrs = resolve_addresses(&bare, port, timeout).await?;
        let remaining = timeout.saturating_sub(started.elapsed()).max(MIN_STEP);
        let server_name = bare.clone();
        debug!(count = addrs.len(), "Spawning blocking task for TLS handshake.");
        spawn_blocking(move || perform_tls_handshake(&server_name, &addrs, remaining))
            .await
            .unwrap_or_else(|e| {
                error!(panic = %e, "Blocking TLS probe task panicked!");
                Err(format!("Task panicked: {}", e))
            })
    };

    // The blocking thread may outlive this deadline; its sockets carry their own
    // timeouts and it is dropped once they fire.
    match tokio::time::timeout(timeout, attempt).await {
        Err(_) => {
            warn!(host = %bare, ?timeout, "TLS probe exceeded its time limit.");
            false
        }
        Ok(Ok(cert)) => {
            let days_left = cert.not_after.signed_duration_since(Utc::now()).num_days();
            info!(
                subject = %cert.subject,
                issuer = %cert.issuer,
                days_left,
                "TLS handshake succeeded."
            );
            true
        }
        Ok(Err(e)) => {
            warn!(host = %bare, error = %e, "TLS probe failed.");
            false
        }
    }
}

/// Connects to the first address that accepts, bounding each connect by `step`.
fn connect_any(addrs: &[SocketAddr], step: Duration) -> Result<TcpStream, String> {
    let mut last_error = String::from("No addresses to connect to");
    for addr in addrs {
        debug!(%addr, "Connecting TCP stream.");
        match TcpStream::connect_timeout(addr, step) {
            Ok(stream) => return Ok(stream),
            Err(e) => {
                debug!(%addr, error = %e, "TCP connect failed, trying next address.");
                last_error = format!("TCP Connection Error: {}", e);
            }
        }
    }
    Err(last_error)
}

fn perform_tls_handshake(
    host: &str,
    addrs: &[SocketAddr],
    step: Duration,
) -> Result<PeerCertificate, String> {
    let connector =
        TlsConnector::new().map_err(|e| format!("TlsConnector Error: {}", e))?;

    let stream = connect_any(addrs, step)?;
    stream
        .set_read_timeout(Some(step))
        .and_then(|_| stream.set_write_timeout(Some(step)))
        .map_err(|e| format!("Socket configuration error: {}", e))?;

    debug!(host, "Performing TLS handshake.");
    let stream = connector
        .connect(host, stream)
        .map_err(|e| format!("TLS Handshake Error: {}", e))?;

    let cert = match stream.peer_certificate() {
        Ok(Some(c)) => c,
        Ok(None) => return Err("Server did not provide a certificate.".to_string()),
        Err(e) => return Err(format!("Could not get peer certificate: {}", e)),
    };
    let cert_der = cert
        .to_der()
        .map_err(|e| format!("Could not convert certificate to DER: {}", e))?;
    let (_, x509) =
        parse_x509_certificate(&cert_der).map_err(|e| format!("X.509 Parse Error: {}", e))?;

    Ok(PeerCertificate {
        subject: x509.subject().to_string(),
        issuer: x509.issuer().to_string(),
        not_after: asn1_time_to_chrono_utc(&x509.validity().not_after),
    })
}

fn asn1_time_to_chrono_utc(time: &ASN1Time) -> DateTime<Utc> {
    DateTime::from_timestamp(time.timestamp(), 0).unwrap_or_default()
}
