//! Network WHOIS backend built on `whois-service`.

use tracing::{debug, info, warn};
use whois_service::{WhoisClient, WhoisResponse};

use super::parse::country_from_raw;
use super::types::{WhoisError, WhoisRecord, WhoisValue};
use super::WhoisLookup;

/// Looks domains up through `whois_service::WhoisClient`, which handles the IANA
/// bootstrap, RDAP-first querying and per-server rate limiting.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServiceWhoisClient;

impl ServiceWhoisClient {
    pub fn new() -> Self {
        Self
    }
}

impl WhoisLookup for ServiceWhoisClient {
    async fn lookup(&self, domain: &str) -> Result<WhoisRecord, WhoisError> {
        info!(domain, "Starting WHOIS lookup.");

        // The client is lightweight, so a fresh one per lookup is fine.
        let client = WhoisClient::new().await.map_err(|e| WhoisError::Client {
            reason: e.to_string(),
        })?;

        match client.lookup(domain).await {
            Ok(response) => {
                let record = record_from_response(&response);
                info!(domain, empty = record.is_empty(), "WHOIS lookup finished.");
                Ok(record)
            }
            Err(e) => {
                warn!(domain, error = %e, "WHOIS lookup failed.");
                Err(WhoisError::Lookup {
                    domain: domain.to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }
}

/// Converts a `whois-service` answer into the fields the analyzer reports.
fn record_from_response(response: &WhoisResponse) -> WhoisRecord {
    let Some(parsed) = response.parsed_data.as_ref() else {
        debug!("WHOIS answer carried no parsed data, reading raw text only.");
        return build_record(None, None, None, &response.raw_data);
    };
    build_record(
        parsed.registrar.clone(),
        parsed.creation_date.clone(),
        parsed.expiration_date.clone(),
        &response.raw_data,
    )
}

// whois-service has no country field, so it is read from the raw answer.
fn build_record(
    registrar: Option<String>,
    creation_date: Option<String>,
    expiration_date: Option<String>,
    raw: &str,
) -> WhoisRecord {
    let present = |value: Option<String>| {
        value
            .filter(|v| !v.trim().is_empty())
            .map(WhoisValue::Single)
    };
    WhoisRecord {
        registrar: present(registrar),
        creation_date: present(creation_date),
        expiration_date: present(expiration_date),
        country: country_from_raw(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = "\
Domain Name: EXAMPLE.NL
Registrar: Example Registrar B.V.
Registrant Country: NL
>>> Last update of WHOIS database: 2024-10-01T12:00:00Z <<<
";

    #[test]
    fn parsed_fields_are_kept_and_country_comes_from_raw_text() {
        let record = build_record(
            Some("Example Registrar B.V.".into()),
            Some("2001-02-03T04:05:06Z".into()),
            None,
            RAW,
        );
        assert_eq!(record.registrar, Some(WhoisValue::Single("Example Registrar B.V.".into())));
        assert_eq!(
            record.creation_date,
            Some(WhoisValue::Single("2001-02-03T04:05:06Z".into()))
        );
        assert!(record.expiration_date.is_none());
        assert_eq!(record.country, Some(WhoisValue::Single("NL".into())));
    }

    #[test]
    fn blank_parsed_fields_count_as_missing() {
        let record = build_record(Some("  ".into()), Some(String::new()), None, "");
        assert!(record.is_empty());
    }
}
