//! Set algebra over families.
//!
//! All four binary operations follow one scheme: handle the terminal and
//! identical-operand cases, probe the operation's memo cache, then recurse
//! by aligning the two root keys. A root whose key is smaller is resolved
//! first; terminals align after every key. Results go through
//! [`make_node`], so they are canonical by construction.
//!
//! [`make_node`]: Factory::make_node

use std::cmp::Ordering;
use std::hash::Hash;

use log::debug;
use num_bigint::BigUint;

use crate::cache::{commutative_key, ordered_key};
use crate::factory::Factory;
use crate::node::Zdd;

impl<K> Factory<K>
where
    K: Ord + Hash + Clone,
{
    /// Computes the family of sets present in `f`, in `g`, or in both.
    pub fn union(&self, f: &Zdd<K>, g: &Zdd<K>) -> Zdd<K> {
        debug!("union({}, {})", f, g);

        if f == g {
            return f.clone();
        }
        if f.is_zero() {
            return g.clone();
        }
        if g.is_zero() {
            return f.clone();
        }

        let key = commutative_key(f, g);
        if let Some(res) = self.union_cache.borrow_mut().get(&key).cloned() {
            return res;
        }

        let res = match (f.decision(), g.decision()) {
            (Some((fk, ft, fs)), Some((gk, gt, gs))) => match fk.cmp(gk) {
                Ordering::Less => {
                    let skip = self.union(fs, g);
                    self.make_node(fk.clone(), ft, &skip)
                }
                Ordering::Greater => {
                    let skip = self.union(f, gs);
                    self.make_node(gk.clone(), gt, &skip)
                }
                Ordering::Equal => {
                    let take = self.union(ft, gt);
                    let skip = self.union(fs, gs);
                    self.make_node(fk.clone(), &take, &skip)
                }
            },
            (Some((fk, ft, fs)), None) => {
                let skip = self.union(fs, g);
                self.make_node(fk.clone(), ft, &skip)
            }
            (None, Some((gk, gt, gs))) => {
                let skip = self.union(f, gs);
                self.make_node(gk.clone(), gt, &skip)
            }
            (None, None) => f.clone(),
        };

        self.union_cache.borrow_mut().insert(key, res.clone());
        res
    }

    /// Computes the family of sets present in both `f` and `g`.
    pub fn intersection(&self, f: &Zdd<K>, g: &Zdd<K>) -> Zdd<K> {
        debug!("intersection({}, {})", f, g);

        if f == g {
            return f.clone();
        }
        if f.is_zero() || g.is_zero() {
            return self.zero();
        }

        let key = commutative_key(f, g);
        if let Some(res) = self.intersection_cache.borrow_mut().get(&key).cloned() {
            return res;
        }

        let res = match (f.decision(), g.decision()) {
            (Some((fk, ft, fs)), Some((gk, gt, gs))) => match fk.cmp(gk) {
                Ordering::Less => self.intersection(fs, g),
                Ordering::Greater => self.intersection(f, gs),
                Ordering::Equal => {
                    let take = self.intersection(ft, gt);
                    let skip = self.intersection(fs, gs);
                    self.make_node(fk.clone(), &take, &skip)
                }
            },
            (Some((_, _, fs)), None) => self.intersection(fs, g),
            (None, Some((_, _, gs))) => self.intersection(f, gs),
            (None, None) => f.clone(),
        };

        self.intersection_cache.borrow_mut().insert(key, res.clone());
        res
    }

    /// Computes the family of sets present in exactly one of `f` and `g`.
    pub fn symmetric_difference(&self, f: &Zdd<K>, g: &Zdd<K>) -> Zdd<K> {
        debug!("symmetric_difference({}, {})", f, g);

        if f == g {
            return self.zero();
        }
        if f.is_zero() {
            return g.clone();
        }
        if g.is_zero() {
            return f.clone();
        }

        let key = commutative_key(f, g);
        if let Some(res) = self
            .symmetric_difference_cache
            .borrow_mut()
            .get(&key)
            .cloned()
        {
            return res;
        }

        let res = match (f.decision(), g.decision()) {
            (Some((fk, ft, fs)), Some((gk, gt, gs))) => match fk.cmp(gk) {
                Ordering::Less => {
                    let skip = self.symmetric_difference(fs, g);
                    self.make_node(fk.clone(), ft, &skip)
                }
                Ordering::Greater => {
                    let skip = self.symmetric_difference(f, gs);
                    self.make_node(gk.clone(), gt, &skip)
                }
                Ordering::Equal => {
                    let take = self.symmetric_difference(ft, gt);
                    let skip = self.symmetric_difference(fs, gs);
                    self.make_node(fk.clone(), &take, &skip)
                }
            },
            (Some((fk, ft, fs)), None) => {
                let skip = self.symmetric_difference(fs, g);
                self.make_node(fk.clone(), ft, &skip)
            }
            (None, Some((gk, gt, gs))) => {
                let skip = self.symmetric_difference(f, gs);
                self.make_node(gk.clone(), gt, &skip)
            }
            (None, None) => self.zero(),
        };

        self.symmetric_difference_cache
            .borrow_mut()
            .insert(key, res.clone());
        res
    }

    /// Computes the family of sets present in `f` but not in `g`.
    ///
    /// Not commutative; the cache keeps operand order.
    pub fn subtraction(&self, f: &Zdd<K>, g: &Zdd<K>) -> Zdd<K> {
        debug!("subtraction({}, {})", f, g);

        if f == g || f.is_zero() {
            return self.zero();
        }
        if g.is_zero() {
            return f.clone();
        }

        let key = ordered_key(f, g);
        if let Some(res) = self.subtraction_cache.borrow_mut().get(&key).cloned() {
            return res;
        }

        let res = match (f.decision(), g.decision()) {
            (Some((fk, ft, fs)), Some((gk, gt, gs))) => match fk.cmp(gk) {
                Ordering::Less => {
                    // No set in g contains fk, so the take branch survives whole.
                    let skip = self.subtraction(fs, g);
                    self.make_node(fk.clone(), ft, &skip)
                }
                Ordering::Greater => self.subtraction(f, gs),
                Ordering::Equal => {
                    let take = self.subtraction(ft, gt);
                    let skip = self.subtraction(fs, gs);
                    self.make_node(fk.clone(), &take, &skip)
                }
            },
            (Some((fk, ft, fs)), None) => {
                let skip = self.subtraction(fs, g);
                self.make_node(fk.clone(), ft, &skip)
            }
            (None, Some((_, _, gs))) => self.subtraction(f, gs),
            (None, None) => self.zero(),
        };

        self.subtraction_cache.borrow_mut().insert(key, res.clone());
        res
    }

    /// Number of sets in the family, computed without enumeration.
    pub fn count(&self, f: &Zdd<K>) -> BigUint {
        debug!("count({})", f);

        let (take, skip) = match f.decision() {
            Some((_, take, skip)) => (take, skip),
            None => {
                return if f.is_one() {
                    BigUint::from(1u32)
                } else {
                    BigUint::ZERO
                };
            }
        };

        if let Some(res) = self.count_cache.borrow().get(f).cloned() {
            return res;
        }

        let res = self.count(take) + self.count(skip);
        self.count_cache.borrow_mut().insert(f.clone(), res.clone());
        res
    }
}
