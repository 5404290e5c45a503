//! A map split into independently locked shards.
//!
//! Used while scoring in parallel: workers touching keys on different shards
//! never wait on each other, where a single map behind one lock would make
//! every update from every plus word take turns.

use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};
use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

/// Shard count used by the parallel scorer.
pub const DEFAULT_SHARD_COUNT: usize = 150;

pub struct ConcurrentMap<K, V> {
    shards: Vec<Mutex<BTreeMap<K, V>>>,
}

/// Exclusive access to one slot. The owning shard stays locked until this is
/// dropped, so keep it short-lived.
pub type Access<'a, V> = MappedMutexGuard<'a, V>;

impl<K, V> ConcurrentMap<K, V>
where
    K: Ord + Hash,
    V: Default,
{
    /// A `shard_count` of zero is treated as one.
    pub fn new(shard_count: usize) -> Self {
        let shards = (0..shard_count.max(1)).map(|_| Mutex::new(BTreeMap::new())).collect();
        Self { shards }
    }

    pub fn shard_count(&self) -> usize { self.shards.len() }

    fn shard(&self, key: &K) -> &Mutex<BTreeMap<K, V>> {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        let index = (hasher.finish() % self.shards.len() as u64) as usize;
        &self.shards[index]
    }

    /// Lock the key's shard and return its slot, inserting `V::default()` if
    /// the key was absent.
    pub fn access(&self, key: K) -> Access<'_, V> {
        let guard = self.shard(&key).lock();
        MutexGuard::map(guard, |shard| shard.entry(key).or_default())
    }

    pub fn erase(&self, key: &K) -> Option<V> {
        self.shard(key).lock().remove(key)
    }

    /// Merge every shard into one ordered map. Takes `self` by value: no
    /// writer can still be holding a reference once this runs.
    pub fn into_ordinary_map(self) -> BTreeMap<K, V> {
        let mut merged = BTreeMap::new();
        for shard in self.shards {
            merged.append(&mut shard.into_inner());
        }
        merged
    }
}

impl<K, V> Default for ConcurrentMap<K, V>
where
    K: Ord + Hash,
    V: Default,
{
    fn default() -> Self { Self::new(DEFAULT_SHARD_COUNT) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rayon::prelude::*;

    #[test]
    fn access_creates_default_slot() {
        let map: ConcurrentMap<i32, f64> = ConcurrentMap::new(4);
        *map.access(7) += 1.5;
        *map.access(7) += 1.0;
        let merged = map.into_ordinary_map();
        assert_eq!(merged.get(&7), Some(&2.5));
    }

    #[test]
    fn erase_removes_slot() {
        let map: ConcurrentMap<i32, i32> = ConcurrentMap::new(3);
        *map.access(1) = 10;
        *map.access(2) = 20;
        assert_eq!(map.erase(&1), Some(10));
        assert_eq!(map.erase(&1), None);
        let merged = map.into_ordinary_map();
        assert_eq!(merged.into_iter().collect::<Vec<_>>(), vec![(2, 20)]);
    }

    #[test]
    fn zero_shards_is_clamped() {
        let map: ConcurrentMap<i32, i32> = ConcurrentMap::new(0);
        assert_eq!(map.shard_count(), 1);
        *map.access(5) += 1;
        assert_eq!(map.into_ordinary_map().len(), 1);
    }

    #[test]
    fn drain_is_key_ordered() {
        let map: ConcurrentMap<i32, i32> = ConcurrentMap::new(7);
        for key in (0..100).rev() {
            *map.access(key) = key * 2;
        }
        let keys: Vec<i32> = map.into_ordinary_map().into_keys().collect();
        assert_eq!(keys, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn parallel_updates_are_not_lost() {
        let map: ConcurrentMap<i32, u64> = ConcurrentMap::new(8);
        (0..10_000).into_par_iter().for_each(|i| {
            *map.access(i % 37) += 1;
        });
        let merged = map.into_ordinary_map();
        assert_eq!(merged.len(), 37);
        assert_eq!(merged.values().sum::<u64>(), 10_000);
    }
}
