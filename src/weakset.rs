use std::rc::{Rc, Weak};

use log::debug;

use crate::utils::MyHash;

const DEFAULT_CAPACITY: usize = 1024;

/// A set that holds at most one representative per structural value,
/// without owning any of them.
///
/// Entries are weak, so a value whose last strong reference goes away
/// becomes reclaimable regardless of the set. Stale slots are skipped by
/// every read and dropped lazily while probing, or eagerly by [`purge`].
///
/// [`purge`]: WeakSet::purge
pub struct WeakSet<T> {
    buckets: Vec<Vec<Weak<T>>>,
    bitmask: u64,
    /// Slots currently stored across all buckets, stale ones included.
    occupied: usize,
    /// Distinct values ever interned.
    insertions: u64,
}

impl<T> WeakSet<T>
where
    T: MyHash + Eq,
{
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a set with at least `capacity` buckets (rounded up to a
    /// power of two).
    pub fn with_capacity(capacity: usize) -> Self {
        let size = capacity.next_power_of_two();
        Self {
            buckets: vec![Vec::new(); size],
            bitmask: (size - 1) as u64,
            occupied: 0,
            insertions: 0,
        }
    }

    fn bucket_index(&self, value: &T) -> usize {
        (MyHash::hash(value) & self.bitmask) as usize
    }

    /// Interns `candidate`.
    ///
    /// Returns the pre-existing structural equal if the set already holds
    /// a live one, otherwise stores a weak slot for the candidate and
    /// returns it. The flag is true when the candidate became canonical.
    pub fn insert(&mut self, candidate: Rc<T>) -> (bool, Rc<T>) {
        if self.occupied >= self.buckets.len() {
            self.grow();
        }

        let index = self.bucket_index(&candidate);
        let bucket = &mut self.buckets[index];

        let mut i = 0;
        while i < bucket.len() {
            match bucket[i].upgrade() {
                Some(existing) => {
                    if *existing == *candidate {
                        return (false, existing);
                    }
                    i += 1;
                }
                None => {
                    // Stale slot, drop it in passing.
                    bucket.swap_remove(i);
                    self.occupied -= 1;
                }
            }
        }

        bucket.push(Rc::downgrade(&candidate));
        self.occupied += 1;
        self.insertions += 1;
        (true, candidate)
    }

    /// True if a live structural equal of `value` is interned.
    pub fn contains(&self, value: &T) -> bool {
        let index = self.bucket_index(value);
        self.buckets[index]
            .iter()
            .filter_map(Weak::upgrade)
            .any(|existing| *existing == *value)
    }

    /// Number of live entries. Scans the whole table.
    pub fn len(&self) -> usize {
        self.buckets
            .iter()
            .flatten()
            .filter(|slot| slot.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Distinct values ever interned, reclaimed ones included.
    pub fn insertions(&self) -> u64 {
        self.insertions
    }

    /// Drops every stale slot. Reads already skip stale slots, so this
    /// only compacts the table's own storage.
    pub fn purge(&mut self) {
        for bucket in self.buckets.iter_mut() {
            bucket.retain(|slot| slot.strong_count() > 0);
        }
        let occupied: usize = self.buckets.iter().map(Vec::len).sum();
        debug!("weak set purge: {} -> {} slots", self.occupied, occupied);
        self.occupied = occupied;
    }

    fn grow(&mut self) {
        let size = self.buckets.len() * 2;
        debug!("weak set grow: {} -> {} buckets", self.buckets.len(), size);

        let bitmask = (size - 1) as u64;
        let mut buckets: Vec<Vec<Weak<T>>> = vec![Vec::new(); size];
        let mut occupied = 0;

        for slot in self.buckets.drain(..).flatten() {
            if let Some(value) = slot.upgrade() {
                let index = (MyHash::hash(&*value) & bitmask) as usize;
                buckets[index].push(slot);
                occupied += 1;
            }
        }

        self.buckets = buckets;
        self.bitmask = bitmask;
        self.occupied = occupied;
    }
}

impl<T> Default for WeakSet<T>
where
    T: MyHash + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}
