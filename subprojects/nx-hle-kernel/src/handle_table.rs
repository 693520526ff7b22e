//! # Handle table
//!
//! A [`HandleTable`] owns a set of emulated objects and names each of them by a [`Handle`].
//!
//! ## Design at a glance
//!
//! • **Minting** – handle values come from a monotonically increasing atomic counter, so two
//!   concurrent inserts can never observe the same value. Values are never recycled; once
//!   `u32::MAX` has been issued further inserts fail with [`HandleError::Exhausted`].
//!
//! • **Storage** – objects live in a `HashMap` behind a [`parking_lot::RwLock`]. Resolution
//!   takes the read lock and clones the stored value, so objects are usually `Arc`s or enums
//!   of `Arc`s. Insertion and removal take the write lock.
//!
//! • **Release** – [`HandleTable::remove`] invalidates a handle. Because values are never
//!   reissued, a stale handle always resolves to [`HandleError::NotFound`].

use core::sync::atomic::{AtomicU32, Ordering};
use std::collections::HashMap;

use parking_lot::RwLock;

use crate::handle::{Handle, INVALID_HANDLE};

/// Handle value issued first by [`HandleTable::new`].
const DEFAULT_FIRST_HANDLE: u32 = 1;

/// Process-wide registry of emulated objects addressed by [`Handle`].
pub struct HandleTable<T> {
    next: AtomicU32,
    entries: RwLock<HashMap<Handle, T>>,
}

impl<T> HandleTable<T> {
    /// Creates an empty table whose first handle is `1`.
    pub fn new() -> Self {
        Self::with_first_handle(DEFAULT_FIRST_HANDLE)
    }

    /// Creates an empty table whose first issued handle is `first`.
    ///
    /// A `first` of zero is bumped to one; zero is the invalid handle.
    pub fn with_first_handle(first: u32) -> Self {
        Self {
            next: AtomicU32::new(first.max(INVALID_HANDLE + 1)),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Registers `object` and returns its freshly minted handle.
    pub fn insert(&self, object: T) -> Result<Handle, HandleError> {
        self.insert_with(|_| object)
    }

    /// Mints a handle, builds the object from it with `make`, and registers the result.
    ///
    /// Used for objects that carry their own id.
    pub fn insert_with(&self, make: impl FnOnce(Handle) -> T) -> Result<Handle, HandleError> {
        let raw = self
            .next
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |next| {
                // The counter wraps to the invalid handle after issuing `u32::MAX`.
                (next != INVALID_HANDLE).then(|| next.wrapping_add(1))
            })
            .map_err(|_| HandleError::Exhausted)?;
        let handle = Handle::from_raw(raw);

        let previous = self.entries.write().insert(handle, make(handle));
        assert!(previous.is_none(), "handle {handle} issued twice");

        log::trace!("handle table: inserted {handle}");
        Ok(handle)
    }

    /// Invalidates `handle` and returns the object it named.
    pub fn remove(&self, handle: Handle) -> Result<T, HandleError> {
        let object = self
            .entries
            .write()
            .remove(&handle)
            .ok_or(HandleError::NotFound(handle))?;

        log::trace!("handle table: removed {handle}");
        Ok(object)
    }

    /// Returns `true` if `handle` names a live object.
    pub fn contains(&self, handle: Handle) -> bool {
        self.entries.read().contains_key(&handle)
    }

    /// Returns the number of live objects.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns `true` if no objects are live.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Runs `f` on the object named by `handle` while holding the read lock.
    pub fn with<R>(&self, handle: Handle, f: impl FnOnce(&T) -> R) -> Result<R, HandleError> {
        let entries = self.entries.read();
        let object = entries.get(&handle).ok_or(HandleError::NotFound(handle))?;
        Ok(f(object))
    }
}

impl<T: Clone> HandleTable<T> {
    /// Resolves `handle` to a clone of the object it names.
    pub fn get(&self, handle: Handle) -> Result<T, HandleError> {
        self.with(handle, T::clone)
    }
}

impl<T> Default for HandleTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> core::fmt::Debug for HandleTable<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HandleTable")
            .field("next", &self.next.load(Ordering::Relaxed))
            .field("len", &self.len())
            .finish()
    }
}

/// Error returned by [`HandleTable`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HandleError {
    /// The handle was never issued or has been removed.
    #[error("handle {0} not found")]
    NotFound(Handle),
    /// The handle names an object of a different kind than the caller expected.
    #[error("handle {handle} is a {found}, expected a {expected}")]
    TypeMismatch {
        /// The offending handle.
        handle: Handle,
        /// Kind the caller asked for.
        expected: &'static str,
        /// Kind actually stored.
        found: &'static str,
    },
    /// Every handle value has been issued.
    #[error("handle space exhausted")]
    Exhausted,
}

impl HandleError {
    /// Returns the result code reported to the guest.
    pub fn result_code(&self) -> nx_hle_rc::ResultCode {
        nx_hle_rc::codes::KERNEL_INVALID_HANDLE
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, sync::Arc, thread};

    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_insert_then_get() {
        let table = HandleTable::new();

        let handle = table.insert("display").unwrap();

        assert!(handle.is_valid());
        assert_eq!(table.get(handle), Ok("display"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_insert_with_sees_own_handle() {
        let table = HandleTable::new();

        let handle = table.insert_with(|handle| handle.to_raw() * 2).unwrap();

        assert_eq!(table.get(handle), Ok(handle.to_raw() * 2));
    }

    #[test]
    fn test_get_unknown_handle() {
        let table = HandleTable::<u32>::new();

        let handle = Handle::from_raw(42);

        assert_eq!(table.get(handle), Err(HandleError::NotFound(handle)));
    }

    #[test]
    fn test_remove_invalidates_and_never_reissues() {
        let table = HandleTable::new();
        let first = table.insert(1u8).unwrap();

        assert_eq!(table.remove(first), Ok(1));
        assert_eq!(table.get(first), Err(HandleError::NotFound(first)));
        assert_eq!(table.remove(first), Err(HandleError::NotFound(first)));

        let second = table.insert(2u8).unwrap();
        assert_ne!(first, second);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_first_handle_skips_invalid() {
        let table = HandleTable::with_first_handle(0);
        assert_eq!(table.insert(()).unwrap().to_raw(), 1);

        let table = HandleTable::with_first_handle(0x200);
        assert_eq!(table.insert(()).unwrap().to_raw(), 0x200);
    }

    #[test]
    fn test_exhausted() {
        let table = HandleTable::with_first_handle(u32::MAX - 1);

        assert_eq!(table.insert(()).unwrap().to_raw(), u32::MAX - 1);
        assert_eq!(table.insert(()).unwrap().to_raw(), u32::MAX);
        assert_eq!(table.insert(()), Err(HandleError::Exhausted));
        assert_eq!(table.insert(()), Err(HandleError::Exhausted));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_concurrent_inserts_are_distinct() {
        let table = Arc::new(HandleTable::new());

        let workers: Vec<_> = (0..8)
            .map(|worker| {
                let table = Arc::clone(&table);
                thread::spawn(move || {
                    (0..256)
                        .map(|i| table.insert(worker * 1000 + i).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for worker in workers {
            for handle in worker.join().unwrap() {
                assert!(seen.insert(handle), "duplicate {handle}");
            }
        }
        assert_eq!(table.len(), 8 * 256);
    }

    proptest! {
        #[test]
        fn handles_are_pairwise_distinct(objects in proptest::collection::vec(any::<u64>(), 0..128)) {
            let table = HandleTable::new();
            let mut seen = HashSet::new();
            for object in objects {
                let handle = table.insert(object).unwrap();
                prop_assert!(seen.insert(handle));
            }
        }

        #[test]
        fn resolve_returns_inserted_object(objects in proptest::collection::vec(any::<i64>(), 1..64)) {
            let table = HandleTable::new();
            let handles: Vec<_> = objects.iter().map(|o| table.insert(*o).unwrap()).collect();
            for (handle, object) in handles.into_iter().zip(objects) {
                prop_assert_eq!(table.get(handle), Ok(object));
            }
        }
    }
}
