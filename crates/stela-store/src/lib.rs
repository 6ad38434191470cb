//! # Stela Record Store
//!
//! The in-memory record store behind the responder: a map from canonical
//! (ASCII-lowercased) owner name to the records seeded for it, in
//! insertion order.
//!
//! - **Case-insensitive**: owner names are folded on insert and on query,
//!   so any casing matches. Folding is ASCII-only; other bytes pass
//!   through untouched.
//! - **Order-preserving**: records for an owner come back exactly as they
//!   were added, duplicates included.
//! - **Read-concurrent**: queries take shard read locks only. The store
//!   is seeded once at startup and treated as immutable afterwards; `add`
//!   is safe at any time but the serving path never relies on seeing
//!   mid-flight mutations.
//!
//! An empty query result does not distinguish "name unknown" from "name
//! known, no records": the responder derives NXDOMAIN by consulting
//! [`RecordStore::query_all`] when a typed lookup comes up empty.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

use dashmap::DashMap;
use stela_proto::{Record, RecordType};

/// Folds an owner name to its canonical lookup key.
///
/// ASCII uppercase letters are lowercased; every other byte, non-ASCII
/// included, is kept as-is.
fn fold_name(name: &[u8]) -> Vec<u8> {
    name.to_ascii_lowercase()
}

/// In-memory store of text-valued resource records.
#[derive(Debug, Default)]
pub struct RecordStore {
    /// Records indexed by folded owner name, insertion order preserved.
    records: DashMap<Box<[u8]>, Vec<Record>>,
}

impl RecordStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    /// Adds a record under its owner name.
    ///
    /// Never fails and never deduplicates: the same triple added twice is
    /// served twice, in insertion order.
    pub fn add(&self, owner: &str, rtype: RecordType, value: &str) {
        let folded = owner.to_ascii_lowercase();
        let record = Record::new(folded.as_str(), rtype, value);

        self.records
            .entry(folded.into_bytes().into_boxed_slice())
            .or_default()
            .push(record);
    }

    /// Returns every record for a name, in insertion order.
    ///
    /// The name may be arbitrary bytes (it usually comes straight from a
    /// decoded wire name); it is folded the same way owners are.
    pub fn query_all(&self, name: &[u8]) -> Vec<Record> {
        let folded = fold_name(name);
        self.records
            .get(folded.as_slice())
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Returns the records of exactly the given type for a name, in
    /// insertion order.
    pub fn query_by_type(&self, name: &[u8], rtype: &RecordType) -> Vec<Record> {
        let folded = fold_name(name);
        self.records
            .get(folded.as_slice())
            .map(|entry| {
                entry
                    .value()
                    .iter()
                    .filter(|record| record.rtype == *rtype)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns the number of distinct owner names.
    pub fn owner_count(&self) -> usize {
        self.records.len()
    }

    /// Returns the total number of records.
    pub fn record_count(&self) -> usize {
        self.records.iter().map(|entry| entry.value().len()).sum()
    }

    /// Returns true if nothing has been seeded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
