use crate::model::FinalizedRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

/// Every restaurant found so far, in the order it was added.
///
/// Address text is the key: a second record for a known address is never
/// stored, and stored records are never changed or removed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<FinalizedRecord>", into = "Vec<FinalizedRecord>")]
pub struct Dataset {
    records: Vec<FinalizedRecord>,
    addresses: HashSet<String>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, address_text: &str) -> bool {
        self.addresses.contains(address_text)
    }

    pub fn records(&self) -> &[FinalizedRecord] {
        &self.records
    }

    /// Appends `record` unless its address is already known.
    pub fn insert(&mut self, record: FinalizedRecord) -> bool {
        if !self.addresses.insert(record.address_text.clone()) {
            return false;
        }
        self.records.push(record);
        true
    }
}

impl From<Vec<FinalizedRecord>> for Dataset {
    fn from(records: Vec<FinalizedRecord>) -> Self {
        let mut addresses = HashSet::with_capacity(records.len());
        for record in &records {
            // Stored records are never removed, duplicates included.
            if !addresses.insert(record.address_text.clone()) {
                warn!(address = %record.address_text, "stored dataset repeats an address");
            }
        }
        Dataset { records, addresses }
    }
}

impl From<Dataset> for Vec<FinalizedRecord> {
    fn from(dataset: Dataset) -> Self {
        dataset.records
    }
}
