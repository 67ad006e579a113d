//! # Reference Sink
//!
//! When the user acts on a decoded number, the number and its decoded
//! fields are handed to a persistence backend that counts how often each
//! ID number has been looked up. The backend is an external collaborator
//! behind [`ReferenceSink`]; [`InMemoryReferenceCounter`] is the in-process
//! implementation used by the API service and in tests.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::components::{Citizenship, Gender, IdComponents};
use crate::date::BirthDate;
use crate::error::SinkError;

/// Record handed to the persistence backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceRecord {
    #[serde(rename = "IDNumber")]
    pub id_number: String,
    pub birthdate: BirthDate,
    pub gender: Gender,
    /// True only for South African citizens.
    pub citizen: bool,
}

impl ReferenceRecord {
    /// Snapshot an ID number and its decoded fields.
    pub fn new(id_number: impl Into<String>, components: &IdComponents) -> Self {
        Self {
            id_number: id_number.into(),
            birthdate: components.date,
            gender: components.gender,
            citizen: components.citizenship == Citizenship::Citizen,
        }
    }
}

/// Persistence backend for reference records.
pub trait ReferenceSink {
    /// Store a record and return the updated reference count for its number.
    fn record(&self, record: &ReferenceRecord) -> Result<u64, SinkError>;
}

/// Thread-safe, cloneable reference counter.
///
/// The lock is `parking_lot` and is never held across an `.await`, so
/// clones can be shared freely between request handlers.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReferenceCounter {
    counts: Arc<RwLock<HashMap<String, u64>>>,
}

impl InMemoryReferenceCounter {
    /// Create an empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current count for `id_number`, or `None` if it was never recorded.
    pub fn count(&self, id_number: &str) -> Option<u64> {
        self.counts.read().get(id_number).copied()
    }

    /// Number of distinct ID numbers recorded.
    pub fn len(&self) -> usize {
        self.counts.read().len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ReferenceSink for InMemoryReferenceCounter {
    fn record(&self, record: &ReferenceRecord) -> Result<u64, SinkError> {
        if record.id_number.is_empty() {
            return Err(SinkError::Rejected {
                id_number: String::new(),
                reason: "empty ID number".to_string(),
            });
        }
        let mut counts = self.counts.write();
        let count = counts.entry(record.id_number.clone()).or_insert(0);
        *count += 1;
        Ok(*count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn components(citizenship: Citizenship) -> IdComponents {
        IdComponents {
            length: 13,
            date: BirthDate::Valid(NaiveDate::from_ymd_opt(1980, 1, 1).unwrap()),
            gender: Gender::Male,
            citizenship,
            checksum_valid: true,
            valid: true,
        }
    }

    #[test]
    fn citizen_flag_only_for_citizens() {
        let r = ReferenceRecord::new("8001015009087", &components(Citizenship::Citizen));
        assert!(r.citizen);
        let r = ReferenceRecord::new("8001015009187", &components(Citizenship::PermanentResident));
        assert!(!r.citizen);
        let r = ReferenceRecord::new("80010150092", &components(Citizenship::Invalid));
        assert!(!r.citizen);
    }

    #[test]
    fn record_wire_shape() {
        let r = ReferenceRecord::new("8001015009087", &components(Citizenship::Citizen));
        assert_eq!(
            serde_json::to_value(&r).unwrap(),
            serde_json::json!({
                "IDNumber": "8001015009087",
                "birthdate": "1980-01-01",
                "gender": "Male",
                "citizen": true,
            })
        );
    }

    #[test]
    fn counter_increments_per_number() {
        let counter = InMemoryReferenceCounter::new();
        let a = ReferenceRecord::new("8001015009087", &components(Citizenship::Citizen));
        let b = ReferenceRecord::new("8001014800187", &components(Citizenship::Citizen));

        assert_eq!(counter.record(&a).unwrap(), 1);
        assert_eq!(counter.record(&a).unwrap(), 2);
        assert_eq!(counter.record(&b).unwrap(), 1);
        assert_eq!(counter.count("8001015009087"), Some(2));
        assert_eq!(counter.count("0000000000000"), None);
        assert_eq!(counter.len(), 2);
    }

    #[test]
    fn clones_share_counts() {
        let counter = InMemoryReferenceCounter::new();
        let clone = counter.clone();
        let r = ReferenceRecord::new("8001015009087", &components(Citizenship::Citizen));
        clone.record(&r).unwrap();
        assert_eq!(counter.count("8001015009087"), Some(1));
    }

    #[test]
    fn empty_number_rejected() {
        let counter = InMemoryReferenceCounter::new();
        let r = ReferenceRecord::new("", &IdComponents::undecoded(0));
        assert!(matches!(counter.record(&r), Err(SinkError::Rejected { .. })));
        assert!(counter.is_empty());
    }
}
