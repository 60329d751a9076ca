//! Records of one session, keyed by URL.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::model::{Observation, ResourceRecord};

#[derive(Debug)]
struct Slot {
    /// Insertion order; breaks `first_seen` ties.
    seq: u64,
    record: ResourceRecord,
}

/// URL → record map for a single session.
#[derive(Debug, Default)]
pub(super) struct SessionResources {
    records: HashMap<String, Slot>,
    next_seq: u64,
}

impl SessionResources {
    /// Inserts a new record stamped `now`, or merges into the existing one.
    /// Returns true when a record was created.
    pub(super) fn upsert(&mut self, obs: Observation, now: i64) -> bool {
        match self.records.entry(obs.url.clone()) {
            Entry::Occupied(mut slot) => {
                slot.get_mut().record.merge(obs);
                false
            }
            Entry::Vacant(slot) => {
                let seq = self.next_seq;
                self.next_seq += 1;
                slot.insert(Slot {
                    seq,
                    record: ResourceRecord::from_observation(obs, now),
                });
                true
            }
        }
    }

    pub(super) fn len(&self) -> usize {
        self.records.len()
    }

    /// Snapshot ordered by `first_seen`, then insertion order.
    pub(super) fn sorted(&self) -> Vec<ResourceRecord> {
        let mut slots: Vec<&Slot> = self.records.values().collect();
        slots.sort_by_key(|s| (s.record.first_seen, s.seq));
        slots.into_iter().map(|s| s.record.clone()).collect()
    }
}
