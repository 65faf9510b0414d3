//! Request table (C5): handle-keyed map from a 32-bit id to the record
//! for an in-flight call. `insert` assigns a fresh handle; `remove`
//! detaches a record so its timeout can be cancelled independently of
//! whether the promise has already been fulfilled.

use std::collections::HashMap;

use crate::client::{CallResult, Phase};
use crate::timeout::TimeoutHandle;

/// One outstanding call: the caller's request dict (read-only once past
/// the cookie phase, except for the `hash`/`cookie` fields the
/// handshake inserts), the handshake phase, the owning timeout, and the
/// channel that fulfills the caller's promise.
pub(crate) struct RequestRecord {
    pub(crate) phase: Phase,
    pub(crate) payload: crate::codec::Value,
    pub(crate) timeout: Option<TimeoutHandle>,
    pub(crate) reply: Option<tokio::sync::oneshot::Sender<CallResult>>,
}

#[derive(Default)]
pub(crate) struct RequestTable {
    next_handle: u32,
    entries: HashMap<u32, RequestRecord>,
}

impl RequestTable {
    /// Assigns a handle unused in the table and stores `record` under
    /// it. Handles are generated monotonically and wrap on overflow;
    /// reuse after `remove` is permitted since nothing outside the
    /// table can still reference a removed handle.
    pub(crate) fn insert(&mut self, record: RequestRecord) -> u32 {
        loop {
            let candidate = self.next_handle;
            self.next_handle = self.next_handle.wrapping_add(1);
            if !self.entries.contains_key(&candidate) {
                self.entries.insert(candidate, record);
                return candidate;
            }
        }
    }

    pub(crate) fn get_mut(&mut self, handle: u32) -> Option<&mut RequestRecord> {
        self.entries.get_mut(&handle)
    }

    pub(crate) fn remove(&mut self, handle: u32) -> Option<RequestRecord> {
        self.entries.remove(&handle)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_record() -> RequestRecord {
        RequestRecord {
            phase: Phase::AwaitingCookie,
            payload: crate::codec::Value::dict(),
            timeout: None,
            reply: None,
        }
    }

    #[test]
    fn insert_assigns_distinct_handles() {
        let mut table = RequestTable::default();
        let a = table.insert(blank_record());
        let b = table.insert(blank_record());
        assert_ne!(a, b);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn remove_detaches_entry() {
        let mut table = RequestTable::default();
        let handle = table.insert(blank_record());
        assert!(table.remove(handle).is_some());
        assert!(table.is_empty());
        assert!(table.remove(handle).is_none());
    }

    #[test]
    fn handle_reuse_after_removal_is_permitted() {
        let mut table = RequestTable::default();
        table.next_handle = u32::MAX;
        let first = table.insert(blank_record());
        table.remove(first);
        let second = table.insert(blank_record());
        // Not asserting equality (wrap order is an implementation detail),
        // only that reinsertion after removal succeeds without collision.
        assert_eq!(table.len(), 1);
        let _ = second;
    }
}
