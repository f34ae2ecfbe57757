//! Memoization caches for the set-algebra operations.
//!
//! Each binary operation keeps its own cache, keyed by the identity of the
//! operand pair. Entries hold strong handles, so a cached result (and every
//! node below it) stays live until [`clear`] runs. That also keeps keys
//! valid: a node id is never reused while a cache entry mentions it.
//!
//! [`clear`]: OpCache::clear

use std::collections::HashMap;
use std::hash::Hash;

use crate::node::Zdd;

/// Cache key for a commutative operation.
///
/// Orders the pair by node id, so `op(f, g)` and `op(g, f)` share one entry.
pub(crate) fn commutative_key<K>(f: &Zdd<K>, g: &Zdd<K>) -> (Zdd<K>, Zdd<K>) {
    if f.id() <= g.id() {
        (f.clone(), g.clone())
    } else {
        (g.clone(), f.clone())
    }
}

/// Cache key for a non-commutative operation. Keeps operand order.
pub(crate) fn ordered_key<K>(f: &Zdd<K>, g: &Zdd<K>) -> (Zdd<K>, Zdd<K>) {
    (f.clone(), g.clone())
}

/// A memo table for one binary operation.
pub struct OpCache<K> {
    map: HashMap<(Zdd<K>, Zdd<K>), Zdd<K>>,
    hits: usize,
    misses: usize,
}

impl<K> OpCache<K> {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Creates a cache with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Returns the number of entries in the cache.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the number of cache hits.
    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Returns the number of cache misses.
    pub fn misses(&self) -> usize {
        self.misses
    }

    /// Drops all entries. Hit and miss counters survive.
    pub fn clear(&mut self) {
        self.map.clear();
    }
}

impl<K> OpCache<K>
where
    K: Hash + Eq,
{
    /// Looks up a result for the operand pair.
    #[inline]
    pub fn get(&mut self, key: &(Zdd<K>, Zdd<K>)) -> Option<&Zdd<K>> {
        match self.map.get(key) {
            Some(res) => {
                self.hits += 1;
                Some(res)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Records a result for the operand pair.
    #[inline]
    pub fn insert(&mut self, key: (Zdd<K>, Zdd<K>), result: Zdd<K>) {
        self.map.insert(key, result);
    }
}

impl<K> Default for OpCache<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::Factory;

    #[test]
    fn test_cache_basic() {
        let factory: Factory<u32> = Factory::default();
        let f = factory.singleton([1]);
        let g = factory.singleton([2]);

        let mut cache: OpCache<u32> = OpCache::new();
        cache.insert(commutative_key(&f, &g), factory.one());

        assert_eq!(cache.get(&commutative_key(&f, &g)), Some(&factory.one()));
        assert_eq!(cache.get(&commutative_key(&g, &f)), Some(&factory.one()));
        assert_eq!(cache.get(&commutative_key(&f, &f)), None);

        assert_eq!(cache.hits(), 2);
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_ordered_key_distinguishes_operand_order() {
        let factory: Factory<u32> = Factory::default();
        let f = factory.singleton([1]);
        let g = factory.singleton([2]);

        let mut cache: OpCache<u32> = OpCache::new();
        cache.insert(ordered_key(&f, &g), factory.zero());

        assert!(cache.get(&ordered_key(&f, &g)).is_some());
        assert!(cache.get(&ordered_key(&g, &f)).is_none());
    }

    #[test]
    fn test_cache_clear_keeps_counters() {
        let factory: Factory<u32> = Factory::default();
        let f = factory.singleton([1]);

        let mut cache: OpCache<u32> = OpCache::new();
        cache.insert(ordered_key(&f, &f), f.clone());
        assert!(cache.get(&ordered_key(&f, &f)).is_some());

        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get(&ordered_key(&f, &f)).is_none());
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
    }
}
