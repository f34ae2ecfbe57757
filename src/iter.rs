//! Enumeration of and membership queries on a family's sets.
//!
//! Everything here walks the node graph through handles alone, without
//! consulting the owning factory.

use std::cmp::Ordering;
use std::fmt::Display;

use crate::node::Zdd;

impl<K> Zdd<K> {
    /// True if the family contains the empty set.
    ///
    /// Follows skip branches only, so this runs in depth many steps.
    pub fn contains_empty(&self) -> bool {
        let mut node = self.clone();
        loop {
            let next = match node.decision() {
                Some((_, _, skip)) => skip.clone(),
                None => return node.is_one(),
            };
            node = next;
        }
    }
}

impl<K> Zdd<K>
where
    K: Clone,
{
    /// Iterates over every set in the family, as ascending key vectors.
    ///
    /// Traversal is depth-first with take branches before skip branches.
    pub fn sets(&self) -> Sets<K> {
        Sets {
            stack: vec![(self.clone(), vec![])],
        }
    }
}

impl<K> Zdd<K>
where
    K: Ord + Clone,
{
    /// True if the family contains exactly the given set.
    ///
    /// Keys may arrive in any order and may repeat.
    pub fn contains(&self, keys: &[K]) -> bool {
        let mut keys = keys.to_vec();
        keys.sort();
        keys.dedup();
        self.contains_sorted(&keys)
    }

    fn contains_sorted(&self, keys: &[K]) -> bool {
        match self.decision() {
            Some((key, take, skip)) => match keys.first() {
                Some(first) => match key.cmp(first) {
                    Ordering::Less => skip.contains_sorted(keys),
                    // The wanted key sorts before every key below this node.
                    Ordering::Greater => false,
                    Ordering::Equal => take.contains_sorted(&keys[1..]),
                },
                None => skip.contains_sorted(keys),
            },
            None => self.is_one() && keys.is_empty(),
        }
    }
}

impl<K> Zdd<K>
where
    K: Ord + Clone + Display,
{
    /// Renders the whole family as text, e.g. `{{1, 3}, {2}}`.
    ///
    /// Sets are ordered by size and then lexicographically, so the output
    /// is stable for a given family. Meant for tests and small families;
    /// this enumerates everything.
    pub fn to_set_string(&self) -> String {
        let mut sets: Vec<Vec<K>> = self.sets().collect();
        sets.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));

        let mut out = String::from("{");
        for (i, set) in sets.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push('{');
            for (j, key) in set.iter().enumerate() {
                if j > 0 {
                    out.push_str(", ");
                }
                out.push_str(&key.to_string());
            }
            out.push('}');
        }
        out.push('}');
        out
    }
}

pub struct Sets<K> {
    stack: Vec<(Zdd<K>, Vec<K>)>,
}

impl<K> Iterator for Sets<K>
where
    K: Clone,
{
    type Item = Vec<K>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, prefix)) = self.stack.pop() {
            match node.decision() {
                Some((key, take, skip)) => {
                    self.stack.push((skip.clone(), prefix.clone()));

                    let mut prefix = prefix;
                    prefix.push(key.clone());
                    self.stack.push((take.clone(), prefix));
                }
                None if node.is_one() => return Some(prefix),
                None => {}
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use test_log::test;

    use super::*;
    use crate::factory::Factory;

    #[test]
    fn test_sets_terminals() {
        let factory: Factory<u32> = Factory::default();

        assert_eq!(factory.zero().sets().count(), 0);
        assert_eq!(factory.one().sets().collect::<Vec<_>>(), vec![Vec::<u32>::new()]);
    }

    #[test]
    fn test_sets_enumeration_order() {
        let factory: Factory<u32> = Factory::default();

        let f = factory.family([vec![1, 2], vec![3]]);
        assert_eq!(f.sets().collect::<Vec<_>>(), vec![vec![1, 2], vec![3]]);
    }

    #[test]
    fn test_contains_empty() {
        let factory: Factory<u32> = Factory::default();

        assert!(factory.one().contains_empty());
        assert!(!factory.zero().contains_empty());

        let without = factory.family([vec![1], vec![2, 3]]);
        assert!(!without.contains_empty());

        let with = factory.union(&without, &factory.one());
        assert!(with.contains_empty());
    }

    #[test]
    fn test_contains() {
        let factory: Factory<u32> = Factory::default();
        let f = factory.family([vec![1], vec![2, 3]]);

        assert!(f.contains(&[1]));
        assert!(f.contains(&[2, 3]));
        assert!(f.contains(&[3, 2]));
        assert!(f.contains(&[2, 2, 3]));

        assert!(!f.contains(&[]));
        assert!(!f.contains(&[2]));
        assert!(!f.contains(&[1, 2]));
        assert!(!f.contains(&[4]));

        assert!(factory.one().contains(&[]));
        assert!(!factory.one().contains(&[1]));
        assert!(!factory.zero().contains(&[]));
    }

    #[test]
    fn test_contains_matches_enumeration() {
        let factory: Factory<u32> = Factory::default();
        let f = factory.family([vec![1], vec![1, 3], vec![2, 4], vec![], vec![1, 2, 3, 4]]);

        let enumerated: HashSet<Vec<u32>> = f.sets().collect();

        // Every subset of {1, 2, 3, 4}, tested both ways.
        for mask in 0u32..16 {
            let candidate: Vec<u32> = (0..4).filter(|b| mask >> b & 1 == 1).map(|b| b + 1).collect();
            assert_eq!(
                f.contains(&candidate),
                enumerated.contains(&candidate),
                "membership disagrees for {candidate:?}"
            );
        }
    }

    #[test]
    fn test_to_set_string() {
        let factory: Factory<u32> = Factory::default();

        assert_eq!(factory.zero().to_set_string(), "{}");
        assert_eq!(factory.one().to_set_string(), "{{}}");
        assert_eq!(factory.singleton([1]).to_set_string(), "{{1}}");

        let f = factory.family([vec![1, 3], vec![2]]);
        assert_eq!(f.to_set_string(), "{{2}, {1, 3}}");
    }
}
