//! Memoized sort permutations.
//!
//! Repetitive declaration bodies (generated bindings, API clients) sort to
//! the same permutation over and over. The cache keys on a fingerprint of
//! the member texts plus the policy, so identical bodies across files hit.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use xxhash_rust::xxh3::Xxh3;

use crate::member::Body;
use crate::policy::{SortOrder, SortPolicy};

/// Default number of memoized bodies
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Fingerprint of a body's member texts under a policy.
///
/// Member texts are UTF-8, so the 0xFF delimiter cannot collide with text
/// bytes. Separators and surrounding trivia are excluded; the permutation
/// does not depend on them.
pub fn fingerprint(source: &str, body: &Body, policy: &SortPolicy) -> u64 {
    let mut hasher = Xxh3::new();
    for member in &body.members {
        hasher.update(member.span.slice(source).as_bytes());
        hasher.update(&[0xFF]);
    }
    let order = match policy.order {
        SortOrder::Ascending => 0u8,
        SortOrder::Descending => 1u8,
    };
    hasher.update(&[
        order,
        policy.case_sensitive as u8,
        policy.natural as u8,
        policy.required_first as u8,
    ]);
    hasher.digest()
}

/// Bounded fingerprint-to-permutation map with first-in-first-out eviction.
pub struct PermutationCache {
    capacity: usize,
    entries: HashMap<u64, Vec<usize>>,
    arrival: VecDeque<u64>,
}

impl PermutationCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::new(),
            arrival: VecDeque::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: u64) -> Option<&[usize]> {
        self.entries.get(&key).map(Vec::as_slice)
    }

    /// Insert a permutation, evicting the oldest entry when full. A key
    /// already present keeps its original arrival position.
    pub fn insert(&mut self, key: u64, permutation: Vec<usize>) {
        if self.capacity == 0 || self.entries.contains_key(&key) {
            return;
        }
        if self.entries.len() == self.capacity {
            if let Some(oldest) = self.arrival.pop_front() {
                self.entries.remove(&oldest);
            }
        }
        self.arrival.push_back(key);
        self.entries.insert(key, permutation);
    }
}

impl Default for PermutationCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache shared across worker threads. A poisoned lock degrades to cache
/// misses rather than failing the check.
pub struct SharedPermutationCache {
    inner: Mutex<PermutationCache>,
}

impl SharedPermutationCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(PermutationCache::with_capacity(capacity)),
        }
    }

    pub fn lookup(&self, key: u64) -> Option<Vec<usize>> {
        if let Ok(cache) = self.inner.lock() {
            cache.get(key).map(<[usize]>::to_vec)
        } else {
            None
        }
    }

    pub fn store(&self, key: u64, permutation: &[usize]) {
        if let Ok(mut cache) = self.inner.lock() {
            cache.insert(key, permutation.to_vec());
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().map(|cache| cache.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SharedPermutationCache {
    fn default() -> Self {
        Self::new()
    }
}
