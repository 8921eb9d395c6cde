//! Keyed admission locks.
//!
//! Validation reads (lookup, active count, capacity sum) and the write that follows
//! must not interleave with another admission touching the same business unit code
//! or the same location. Every mutation locks its code first and then at most one
//! location, so lock order is fixed and two operations can never wait on each other.

use std::sync::Arc;

use dashmap::DashMap;
use fulfilment_domain::{BusinessUnitCode, LocationIdentifier};
use tokio::sync::{Mutex, OwnedMutexGuard};

type Slots = DashMap<String, Arc<Mutex<()>>>;

#[derive(Default)]
pub struct AdmissionLocks {
    codes: Slots,
    locations: Slots,
}

impl AdmissionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock_code(&self, code: &BusinessUnitCode) -> KeyGuard<'_> {
        KeyGuard::acquire(&self.codes, code.as_str()).await
    }

    /// Must be taken after the code lock of the same operation.
    pub async fn lock_location(&self, location: &LocationIdentifier) -> KeyGuard<'_> {
        KeyGuard::acquire(&self.locations, location.as_str()).await
    }

    #[cfg(test)]
    fn held_slots(&self) -> usize {
        self.codes.len() + self.locations.len()
    }
}

/// Held lock on one key. The slot is dropped from the map once nobody uses it.
pub struct KeyGuard<'a> {
    slots: &'a Slots,
    key: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl<'a> KeyGuard<'a> {
    async fn acquire(slots: &'a Slots, key: &str) -> KeyGuard<'a> {
        // The map shard lock is released before awaiting the mutex
        let slot = Arc::clone(&slots.entry(key.to_string()).or_default());
        let guard = slot.lock_owned().await;
        KeyGuard {
            slots,
            key: key.to_string(),
            guard: Some(guard),
        }
    }
}

impl Drop for KeyGuard<'_> {
    fn drop(&mut self) {
        self.guard.take();
        self.slots
            .remove_if(&self.key, |_, slot| Arc::strong_count(slot) == 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn code(s: &str) -> BusinessUnitCode {
        BusinessUnitCode::new(s).unwrap()
    }

    #[tokio::test]
    async fn same_key_is_exclusive() {
        let locks = Arc::new(AdmissionLocks::new());
        let first = locks.lock_code(&code("MWH.001")).await;

        let contender = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _guard = locks.lock_code(&code("MWH.001")).await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        drop(first);
        tokio::time::timeout(Duration::from_secs(1), contender)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn different_keys_do_not_block() {
        let locks = AdmissionLocks::new();
        let _a = locks.lock_code(&code("MWH.001")).await;
        let _b = tokio::time::timeout(Duration::from_secs(1), locks.lock_code(&code("MWH.002")))
            .await
            .unwrap();
        let _c = tokio::time::timeout(
            Duration::from_secs(1),
            locks.lock_location(&LocationIdentifier::new("MWH.001").unwrap()),
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn released_slots_are_removed() {
        let locks = AdmissionLocks::new();
        {
            let _code = locks.lock_code(&code("MWH.001")).await;
            let _loc = locks
                .lock_location(&LocationIdentifier::new("ZWOLLE-001").unwrap())
                .await;
            assert_eq!(locks.held_slots(), 2);
        }
        assert_eq!(locks.held_slots(), 0);
    }
}
