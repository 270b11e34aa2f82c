//! Core types and structures for brandseek

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{BrandSeekError, Result};

/// Maximum number of words a candidate brand name may have.
pub const MAX_CANDIDATE_WORDS: usize = 2;

/// A proposed brand name produced by the generation stage.
///
/// Immutable once created; construction validates the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    pub generated_at: DateTime<Utc>,
}

impl Candidate {
    /// Validate and wrap a raw model-produced name.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into().trim().to_string();

        if name.is_empty() {
            return Err(BrandSeekError::validation("Brand name cannot be empty"));
        }

        if name.split_whitespace().count() > MAX_CANDIDATE_WORDS {
            return Err(BrandSeekError::validation(format!(
                "Brand name has more than {} words: {}",
                MAX_CANDIDATE_WORDS, name
            )));
        }

        let valid_chars = Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 \-]*$")
            .map_err(|e| BrandSeekError::internal(e.to_string()))?;

        if !valid_chars.is_match(&name) {
            return Err(BrandSeekError::validation(format!(
                "Brand name contains invalid characters: {}",
                name
            )));
        }

        Ok(Self {
            name,
            generated_at: Utc::now(),
        })
    }

    /// Build the domain string checked for this candidate.
    pub fn domain(&self, tld: &str) -> String {
        format!("{}.{}", self.name.to_lowercase(), tld)
    }
}

/// Registration metadata recovered from a WHOIS response.
///
/// All fields hold the raw line values; absence of a field in the raw
/// text leaves it unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationInfo {
    pub registrar: Option<String>,
    pub registrar_server: Option<String>,
    pub expiration_date: Option<String>,
}

impl RegistrationInfo {
    /// True when no field carries registration evidence.
    pub fn is_empty(&self) -> bool {
        self.registrar.is_none() && self.registrar_server.is_none() && self.expiration_date.is_none()
    }
}

/// Per-candidate availability state.
///
/// Created with `dns_available = false` and empty registration info.
/// The probe stage sets `dns_available` exactly once and the WHOIS
/// stage sets `registration` exactly once; never mutated thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityRecord {
    pub name: String,
    pub domain: String,
    pub dns_available: bool,
    pub registration: RegistrationInfo,
    pub checked_at: DateTime<Utc>,
}

impl AvailabilityRecord {
    pub fn new(candidate: &Candidate, tld: &str) -> Self {
        Self {
            name: candidate.name.clone(),
            domain: candidate.domain(tld),
            dns_available: false,
            registration: RegistrationInfo::default(),
            checked_at: Utc::now(),
        }
    }
}

/// Configuration for one generation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub description: String,
    pub count: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            description: String::new(),
            count: 10,
        }
    }
}

/// LLM provider configuration.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: String,
    pub model: String,
    pub api_key: String,
    pub base_url: Option<String>,
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-4.1-mini".to_string(),
            api_key: String::new(),
            base_url: None,
            temperature: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_validation() {
        assert!(Candidate::new("Acme").is_ok());
        assert!(Candidate::new("Acme Corp").is_ok());
        assert!(Candidate::new("north-star").is_ok());

        assert!(Candidate::new("").is_err());
        assert!(Candidate::new("   ").is_err());
        assert!(Candidate::new("One Two Three").is_err());
        assert!(Candidate::new("acme!").is_err());
    }

    #[test]
    fn test_candidate_domain_is_lowercased() {
        let candidate = Candidate::new("Zeta").unwrap();
        assert_eq!(candidate.domain("com"), "zeta.com");
    }

    #[test]
    fn test_registration_info_emptiness() {
        assert!(RegistrationInfo::default().is_empty());

        let info = RegistrationInfo {
            registrar: Some("Example Corp".to_string()),
            ..Default::default()
        };
        assert!(!info.is_empty());

        let info = RegistrationInfo {
            expiration_date: Some("2030-01-01T00:00:00Z".to_string()),
            ..Default::default()
        };
        assert!(!info.is_empty());
    }

    #[test]
    fn test_availability_record_starts_unverified() {
        let candidate = Candidate::new("Acme").unwrap();
        let record = AvailabilityRecord::new(&candidate, "com");

        assert_eq!(record.name, "Acme");
        assert_eq!(record.domain, "acme.com");
        assert!(!record.dns_available);
        assert!(record.registration.is_empty());
    }
}
