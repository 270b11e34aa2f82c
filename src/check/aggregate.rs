//! Availability verdict aggregation
//!
//! Reconciles the two independent signals into one accept/reject
//! verdict per candidate. DNS absence alone is weak evidence (parked
//! and misconfigured domains resolve to nothing), so acceptance also
//! requires WHOIS to have produced zero registration evidence.

use crate::types::AvailabilityRecord;

/// Return the accepted subset of fully-verified records, in input order.
///
/// A record is accepted iff its DNS probe saw no records and its
/// registration info has no populated fields. Names are not
/// deduplicated.
pub fn aggregate(records: Vec<AvailabilityRecord>) -> Vec<AvailabilityRecord> {
    records
        .into_iter()
        .filter(|record| record.dns_available && record.registration.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Candidate, RegistrationInfo};

    fn record(name: &str, dns_available: bool, registrar: Option<&str>) -> AvailabilityRecord {
        let candidate = Candidate::new(name).unwrap();
        let mut record = AvailabilityRecord::new(&candidate, "com");
        record.dns_available = dns_available;
        record.registration = RegistrationInfo {
            registrar: registrar.map(|s| s.to_string()),
            ..Default::default()
        };
        record
    }

    #[test]
    fn test_requires_both_signals() {
        let records = vec![
            record("Alpha", true, None),
            record("Bravo", false, None),
            record("Charlie", true, Some("Example Corp")),
            record("Delta", false, Some("Example Corp")),
        ];

        let accepted = aggregate(records);
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].name, "Alpha");
    }

    #[test]
    fn test_any_registration_evidence_rejects() {
        let candidate = Candidate::new("Echo").unwrap();
        let mut rec = AvailabilityRecord::new(&candidate, "com");
        rec.dns_available = true;
        rec.registration.expiration_date = Some("2030-01-01T00:00:00Z".to_string());

        assert!(aggregate(vec![rec]).is_empty());
    }

    #[test]
    fn test_preserves_input_order() {
        let records = vec![
            record("Alpha", true, None),
            record("Bravo", true, Some("Example Corp")),
            record("Charlie", true, None),
            record("Delta", true, None),
        ];

        let names: Vec<String> = aggregate(records).into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Alpha", "Charlie", "Delta"]);
    }

    #[test]
    fn test_duplicate_names_survive() {
        // Nothing deduplicates candidates, within a pass or across
        // passes; both copies of a repeated name are accepted.
        let records = vec![record("Alpha", true, None), record("Alpha", true, None)];
        assert_eq!(aggregate(records).len(), 2);
    }

    #[test]
    fn test_whois_failure_is_indistinguishable_from_unregistered() {
        // An unreachable WHOIS lookup yields an empty RegistrationInfo,
        // which the verdict cannot tell apart from confirmed-unregistered.
        // Known false-acceptance source, carried as-is.
        let records = vec![record("Foxtrot", true, None)];
        assert_eq!(aggregate(records).len(), 1);
    }
}
