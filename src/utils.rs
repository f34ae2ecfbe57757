use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Hashes a value with the std [`DefaultHasher`].
///
/// `DefaultHasher::new()` starts from fixed keys, so the result is stable
/// for the lifetime of the process, which is all the interning table needs.
pub fn default_hash<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

pub trait MyHash {
    /// Structural hash, stable for the value's lifetime.
    fn hash(&self) -> u64;
}

impl MyHash for u64 {
    fn hash(&self) -> u64 {
        *self
    }
}
