//! WHOIS registration lookup
//!
//! Pure Rust WHOIS over TCP/43 (no external `whois` binary required).
//! The response is unstructured text; registration evidence is pulled
//! out by literal line-prefix matching.

use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

use super::RegistrationLookup;
use crate::error::{BrandSeekError, Result};
use crate::types::RegistrationInfo;

const IANA_WHOIS: &str = "whois.iana.org";
const QUERY_TIMEOUT: Duration = Duration::from_secs(10);

/// WHOIS client for registration detail lookup.
///
/// Stateless; safe to invoke concurrently across many domains.
pub struct WhoisClient {
    query_timeout: Duration,
}

impl WhoisClient {
    pub fn new() -> Self {
        Self {
            query_timeout: QUERY_TIMEOUT,
        }
    }

    /// Fetch the raw WHOIS text for a domain.
    pub async fn lookup_raw(&self, domain: &str) -> Result<String> {
        let tld = domain
            .rsplit('.')
            .next()
            .ok_or_else(|| BrandSeekError::validation("Invalid domain format - no TLD found"))?
            .to_lowercase();

        // Unknown TLDs fall back to IANA discovery (no extra user config).
        match whois_server_for_tld(&tld) {
            Some(server) => self.query_whois(server, domain).await,
            None => {
                let iana = self.query_whois(IANA_WHOIS, &tld).await?;
                let discovered = parse_iana_referral(&iana).ok_or_else(|| {
                    BrandSeekError::domain_check(
                        domain.to_string(),
                        format!("No WHOIS server found for TLD: {}", tld),
                    )
                })?;
                self.query_whois(&discovered, domain).await
            }
        }
    }

    async fn query_whois(&self, server: &str, query: &str) -> Result<String> {
        let addr = format!("{}:43", server);
        let secs = self.query_timeout.as_secs();

        let mut stream = timeout(self.query_timeout, TcpStream::connect(&addr))
            .await
            .map_err(|_| BrandSeekError::timeout("WHOIS connect", secs))?
            .map_err(|e| {
                BrandSeekError::network(format!("WHOIS connect failed: {}", e), None, Some(addr.clone()))
            })?;

        timeout(
            self.query_timeout,
            stream.write_all(format!("{}\r\n", query).as_bytes()),
        )
        .await
        .map_err(|_| BrandSeekError::timeout("WHOIS write", secs))?
        .map_err(|e| {
            BrandSeekError::network(format!("WHOIS write failed: {}", e), None, Some(addr.clone()))
        })?;

        let mut buf = Vec::new();
        timeout(self.query_timeout, stream.read_to_end(&mut buf))
            .await
            .map_err(|_| BrandSeekError::timeout("WHOIS read", secs))?
            .map_err(|e| {
                BrandSeekError::network(format!("WHOIS read failed: {}", e), None, Some(addr))
            })?;

        Ok(String::from_utf8_lossy(&buf).to_string())
    }
}

impl Default for WhoisClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RegistrationLookup for WhoisClient {
    async fn fetch_registration(&self, domain: &str) -> RegistrationInfo {
        match self.lookup_raw(domain).await {
            Ok(raw) => parse_registration(&raw),
            Err(e) => {
                tracing::warn!(
                    domain = %domain,
                    error = %e,
                    "WHOIS lookup failed, treating as no registration evidence"
                );
                RegistrationInfo::default()
            }
        }
    }
}

/// Extract registration evidence from raw WHOIS text.
///
/// Only three literal line prefixes are recognized; the value is
/// everything after the first `": "` separator. All other lines are
/// ignored.
pub fn parse_registration(raw: &str) -> RegistrationInfo {
    let mut info = RegistrationInfo::default();

    for line in raw.lines() {
        if line.starts_with("Registrar WHOIS Server:") {
            info.registrar_server = line_value(line);
        } else if line.starts_with("Registrar:") {
            info.registrar = line_value(line);
        } else if line.starts_with("Registrar Registration Expiration Date:") {
            info.expiration_date = line_value(line);
        }
    }

    info
}

fn line_value(line: &str) -> Option<String> {
    line.splitn(2, ": ")
        .nth(1)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Convention-based mapping for high-usage TLDs.
fn whois_server_for_tld(tld: &str) -> Option<&'static str> {
    match tld {
        "com" | "net" => Some("whois.verisign-grs.com"),
        "org" => Some("whois.pir.org"),
        "io" => Some("whois.nic.io"),
        "ai" => Some("whois.nic.ai"),
        "co" => Some("whois.nic.co"),
        "me" => Some("whois.nic.me"),
        "xyz" => Some("whois.nic.xyz"),
        _ => None,
    }
}

/// Pull the authoritative server out of an IANA TLD record
/// (`whois:` line, falling back to `refer:`).
fn parse_iana_referral(iana: &str) -> Option<String> {
    for prefix in ["whois:", "refer:"] {
        let server = iana
            .lines()
            .map(str::trim)
            .find_map(|line| {
                if line.to_lowercase().starts_with(prefix) {
                    line.splitn(2, ':').nth(1).map(|s| s.trim().to_string())
                } else {
                    None
                }
            })
            .filter(|s| !s.is_empty());

        if server.is_some() {
            return server;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_registered_domain() {
        let raw = "\
Domain Name: EXAMPLE.COM
Registry Domain ID: 2336799_DOMAIN_COM-VRSN
Registrar WHOIS Server: whois.example-registrar.com
Registrar URL: http://www.example-registrar.com
Registrar: Example Corp
Registrar Registration Expiration Date: 2030-08-13T04:00:00Z
Name Server: A.IANA-SERVERS.NET
";
        let info = parse_registration(raw);

        assert_eq!(info.registrar.as_deref(), Some("Example Corp"));
        assert_eq!(
            info.registrar_server.as_deref(),
            Some("whois.example-registrar.com")
        );
        assert_eq!(
            info.expiration_date.as_deref(),
            Some("2030-08-13T04:00:00Z")
        );
        assert!(!info.is_empty());
    }

    #[test]
    fn test_unrecognized_prefixes_are_ignored() {
        let raw = "\
No match for domain \"UNREGISTERED-EXAMPLE.COM\".
>>> Last update of whois database: 2026-08-06T00:00:00Z <<<
Registrar URL: http://www.example-registrar.com
";
        let info = parse_registration(raw);
        assert!(info.is_empty());
    }

    #[test]
    fn test_registrar_server_line_does_not_populate_registrar() {
        let raw = "Registrar WHOIS Server: whois.example-registrar.com\n";
        let info = parse_registration(raw);

        assert!(info.registrar.is_none());
        assert_eq!(
            info.registrar_server.as_deref(),
            Some("whois.example-registrar.com")
        );
    }

    #[test]
    fn test_prefix_without_value_leaves_field_unset() {
        let info = parse_registration("Registrar:\nRegistrar WHOIS Server:\n");
        assert!(info.is_empty());
    }

    #[test]
    fn test_partial_evidence_still_counts() {
        let info = parse_registration("Registrar: Example Corp\n");
        assert_eq!(info.registrar.as_deref(), Some("Example Corp"));
        assert!(info.registrar_server.is_none());
        assert!(info.expiration_date.is_none());
        assert!(!info.is_empty());
    }

    #[test]
    fn test_iana_referral_parsing() {
        let sample = "\
domain:       COM
organisation: Verisign Global Registry Services
whois:        whois.verisign-grs.com
status:       ACTIVE
";
        assert_eq!(
            parse_iana_referral(sample).as_deref(),
            Some("whois.verisign-grs.com")
        );

        assert_eq!(
            parse_iana_referral("refer: whois.nic.dev\n").as_deref(),
            Some("whois.nic.dev")
        );

        assert!(parse_iana_referral("status: ACTIVE\n").is_none());
    }

    #[test]
    fn test_known_tld_servers() {
        assert_eq!(whois_server_for_tld("com"), Some("whois.verisign-grs.com"));
        assert_eq!(whois_server_for_tld("io"), Some("whois.nic.io"));
        assert_eq!(whois_server_for_tld("dev"), None);
    }

    #[tokio::test]
    async fn test_lookup_error_yields_empty_info() {
        // Reserved TLD: the IANA discovery path cannot produce a
        // server, so the lookup fails and is swallowed.
        let client = WhoisClient::new();
        let info = client.fetch_registration("example.invalid").await;
        assert!(info.is_empty());
    }
}
