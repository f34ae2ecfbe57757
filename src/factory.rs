use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

use log::debug;
use num_bigint::BigUint;

use crate::cache::OpCache;
use crate::node::{Node, Zdd};
use crate::weakset::WeakSet;

/// Hit and miss counters for one operation cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub entries: usize,
}

/// A point-in-time snapshot of a factory's tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactoryStats {
    /// Interned nodes currently alive, terminals included.
    pub live_nodes: usize,
    /// Decision nodes ever made canonical.
    pub created_nodes: u64,
    pub union: CacheStats,
    pub intersection: CacheStats,
    pub symmetric_difference: CacheStats,
    pub subtraction: CacheStats,
}

/// The construction authority for a universe of families of sets.
///
/// Every node comes out of [`make_node`], which canonicalizes through a weak
/// interning table: structurally equal nodes are the same allocation, so
/// handle equality ([`Zdd`] `==`) is family equality. The factory owns the
/// two terminals and the per-operation memo caches; nodes themselves are
/// owned by whoever holds a handle, and the table lets go of them when the
/// last handle drops.
///
/// A factory only understands handles it produced itself. Mixing handles
/// from two factories is not detected and gives meaningless results. The
/// same goes for a key type whose `Ord` disagrees with its `Eq`: the key
/// order is fixed for the factory's lifetime and everything here assumes
/// it is a total order consistent with equality.
///
/// [`make_node`]: Factory::make_node
pub struct Factory<K> {
    zero: Zdd<K>,
    one: Zdd<K>,
    table: RefCell<WeakSet<Node<K>>>,
    pub(crate) union_cache: RefCell<OpCache<K>>,
    pub(crate) intersection_cache: RefCell<OpCache<K>>,
    pub(crate) symmetric_difference_cache: RefCell<OpCache<K>>,
    pub(crate) subtraction_cache: RefCell<OpCache<K>>,
    pub(crate) count_cache: RefCell<HashMap<Zdd<K>, BigUint>>,
    next_id: Cell<u64>,
}

impl<K> Factory<K>
where
    K: Ord + Hash + Clone,
{
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    /// Creates a factory whose interning table starts with at least
    /// `capacity` buckets. Both terminals are interned up front.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut table = WeakSet::with_capacity(capacity);
        let (_, zero) = table.insert(Rc::new(Node::terminal(false, 0)));
        let (_, one) = table.insert(Rc::new(Node::terminal(true, 1)));

        Self {
            zero: Zdd::from_rc(zero),
            one: Zdd::from_rc(one),
            table: RefCell::new(table),
            union_cache: RefCell::new(OpCache::new()),
            intersection_cache: RefCell::new(OpCache::new()),
            symmetric_difference_cache: RefCell::new(OpCache::new()),
            subtraction_cache: RefCell::new(OpCache::new()),
            count_cache: RefCell::new(HashMap::new()),
            next_id: Cell::new(2),
        }
    }

    /// The empty family, containing no set at all.
    pub fn zero(&self) -> Zdd<K> {
        self.zero.clone()
    }

    /// The unit family, containing exactly the empty set.
    pub fn one(&self) -> Zdd<K> {
        self.one.clone()
    }

    /// Returns the canonical node for `(key, take, skip)`.
    ///
    /// An empty take branch means no set through this node contains `key`,
    /// so the node is suppressed and `skip` is returned unchanged. Otherwise
    /// the node is interned, reusing the existing allocation when one is
    /// already live.
    ///
    /// # Panics
    ///
    /// Panics if either branch root carries a key that is not strictly
    /// greater than `key`. Terminals come after every key.
    pub fn make_node(&self, key: K, take: &Zdd<K>, skip: &Zdd<K>) -> Zdd<K> {
        if take.is_zero() {
            return skip.clone();
        }

        assert!(
            take.key().map_or(true, |k| key < *k),
            "invalid branch ordering: take key must be greater than the node key"
        );
        assert!(
            skip.key().map_or(true, |k| key < *k),
            "invalid branch ordering: skip key must be greater than the node key"
        );

        let candidate = Rc::new(Node::decision(
            key,
            take.clone(),
            skip.clone(),
            self.next_id.get(),
        ));
        let (is_new, canonical) = self.table.borrow_mut().insert(candidate);
        if is_new {
            self.next_id.set(self.next_id.get() + 1);
        }
        Zdd::from_rc(canonical)
    }

    /// Builds the family containing exactly one set, the set of `keys`.
    ///
    /// Keys may arrive in any order and may repeat. Duplicates collapse, so
    /// `[2, 1, 1, 3]` and `[1, 2, 3]` build the same family.
    pub fn singleton<I>(&self, keys: I) -> Zdd<K>
    where
        I: IntoIterator<Item = K>,
    {
        let mut keys: Vec<K> = keys.into_iter().collect();
        keys.sort();
        keys.dedup();

        let mut current = self.one();
        for key in keys.into_iter().rev() {
            current = self.make_node(key, &current, &self.zero);
        }
        current
    }

    /// Builds the family containing each of the given sets.
    pub fn family<I, S>(&self, sets: I) -> Zdd<K>
    where
        I: IntoIterator<Item = S>,
        S: IntoIterator<Item = K>,
    {
        let mut result = self.zero();
        for set in sets {
            let singleton = self.singleton(set);
            result = self.union(&result, &singleton);
        }
        result
    }

    /// Drops every memoized operation result. Counters survive.
    ///
    /// Cached results hold nodes alive, so this must run before
    /// [`collect_garbage`] can reclaim anything they reference.
    ///
    /// [`collect_garbage`]: Factory::collect_garbage
    pub fn clear_caches(&self) {
        debug!(
            "clearing caches: union={}, intersection={}, symmetric_difference={}, subtraction={}, count={}",
            self.union_cache.borrow().len(),
            self.intersection_cache.borrow().len(),
            self.symmetric_difference_cache.borrow().len(),
            self.subtraction_cache.borrow().len(),
            self.count_cache.borrow().len(),
        );
        self.union_cache.borrow_mut().clear();
        self.intersection_cache.borrow_mut().clear();
        self.symmetric_difference_cache.borrow_mut().clear();
        self.subtraction_cache.borrow_mut().clear();
        self.count_cache.borrow_mut().clear();
    }

    /// Clears the caches and compacts the interning table.
    ///
    /// Nodes are reclaimed by reference counting the moment their last
    /// handle drops; this only evicts the stale table slots they leave
    /// behind, plus the cache entries that were keeping nodes alive.
    pub fn collect_garbage(&self) {
        self.clear_caches();
        let mut table = self.table.borrow_mut();
        table.purge();
        debug!("garbage collected: {} live nodes", table.len());
    }

    /// Interned nodes currently alive, terminals included.
    pub fn live_nodes(&self) -> usize {
        self.table.borrow().len()
    }

    /// Decision nodes ever made canonical. Never decreases.
    pub fn created_nodes(&self) -> u64 {
        self.next_id.get() - 2
    }

    pub fn stats(&self) -> FactoryStats {
        FactoryStats {
            live_nodes: self.live_nodes(),
            created_nodes: self.created_nodes(),
            union: Self::cache_stats(&self.union_cache),
            intersection: Self::cache_stats(&self.intersection_cache),
            symmetric_difference: Self::cache_stats(&self.symmetric_difference_cache),
            subtraction: Self::cache_stats(&self.subtraction_cache),
        }
    }

    fn cache_stats(cache: &RefCell<OpCache<K>>) -> CacheStats {
        let cache = cache.borrow();
        CacheStats {
            hits: cache.hits(),
            misses: cache.misses(),
            entries: cache.len(),
        }
    }
}

impl<K> Default for Factory<K>
where
    K: Ord + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Debug for Factory<K>
where
    K: Ord + Hash + Clone,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let table = self.table.borrow();
        f.debug_struct("Factory")
            .field("capacity", &table.capacity())
            .field("live_nodes", &table.len())
            .field("created_nodes", &self.created_nodes())
            .finish()
    }
}
