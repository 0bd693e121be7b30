//! Blackboard: open-chaining slot table with free-list reuse and a version
//! counter guarding detached cursors.

use crate::group::{Mode, ValueGroup};
use crate::primes;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use std::collections::hash_map::RandomState;

/// Sentinel for "no slot": empty bucket, end of chain, end of free list,
/// and the hash of an unoccupied slot.
const NIL: i32 = -1;

/// One arena cell. `next` is the bucket-chain link while the slot is
/// occupied and the free-list link while it is free; `hash >= 0` is the
/// discriminator between the two uses.
#[derive(Debug)]
struct Slot<K, V> {
    hash: i32, // lower 31 bits of the key hash, NIL when free
    next: i32,
    key: Option<K>,
    values: ValueGroup<V>,
}

impl<K, V> Slot<K, V> {
    fn free(mode: Mode) -> Self {
        Self {
            hash: NIL,
            next: NIL,
            key: None,
            values: ValueGroup::new(mode),
        }
    }
}

/// A single-threaded multimap: each key owns an ordered group of values,
/// drained FIFO or LIFO per the mode fixed at construction.
///
/// Storage is an arena of slots addressed by index, chained per bucket and
/// recycled through an intrusive free list. Bucket counts are primes; the
/// table grows by doubling through the prime table only when no free slot
/// remains.
pub struct Blackboard<K, V, S = RandomState> {
    buckets: Vec<i32>,
    slots: Vec<Slot<K, V>>,
    mode: Mode,
    count: usize, // slots ever allocated, including currently free ones
    free_list: i32,
    free_count: usize,
    version: u64,
    hasher: S,
}

impl<K, V> Blackboard<K, V>
where
    K: Eq + Hash,
{
    pub fn new(mode: Mode) -> Self {
        Self::with_capacity(mode, 0)
    }

    pub fn with_capacity(mode: Mode, capacity: usize) -> Self {
        Self::with_capacity_and_hasher(mode, capacity, RandomState::new())
    }
}

impl<K, V, S> Blackboard<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(mode: Mode, hasher: S) -> Self {
        Self::with_capacity_and_hasher(mode, 0, hasher)
    }

    pub fn with_capacity_and_hasher(mode: Mode, capacity: usize, hasher: S) -> Self {
        let size = primes::get_prime(capacity);
        Self {
            buckets: vec![NIL; size],
            slots: (0..size).map(|_| Slot::free(mode)).collect(),
            mode,
            count: 0,
            free_list: NIL,
            free_count: 0,
            version: 0,
            hasher,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Number of keys currently holding at least one value.
    pub fn len(&self) -> usize {
        self.count - self.free_count
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current slot-array length. Always a prime from the growth table
    /// until the table outgrows it.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn hash31<Q>(&self, key: &Q) -> i32
    where
        Q: ?Sized + Hash,
    {
        // Mask the sign bit so NIL stays reserved for "free".
        (self.hasher.hash_one(key) & 0x7FFF_FFFF) as i32
    }

    /// Index of the occupied slot matching `key`, or NIL. The stored hash
    /// is compared before `Eq` runs; collisions must fall through to full
    /// key equality.
    fn find_slot<Q>(&self, key: &Q) -> i32
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.hash31(key);
        let mut i = self.buckets[(hash as usize) % self.buckets.len()];
        while i >= 0 {
            let slot = &self.slots[i as usize];
            if slot.hash == hash && slot.key.as_ref().map(|k| k.borrow() == key).unwrap_or(false) {
                return i;
            }
            i = slot.next;
        }
        NIL
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find_slot(key) >= 0
    }

    /// Inserts `value` under `key`, appending to the key's group if the key
    /// is already present. Invalidates outstanding cursors.
    pub fn pin(&mut self, key: K, value: V) {
        let hash = self.hash31(&key);
        let mut bucket = (hash as usize) % self.buckets.len();

        let mut i = self.buckets[bucket];
        while i >= 0 {
            let slot = &self.slots[i as usize];
            if slot.hash == hash && slot.key.as_ref() == Some(&key) {
                self.slots[i as usize].values.put(value);
                self.version = self.version.wrapping_add(1);
                return;
            }
            i = slot.next;
        }

        let index = if self.free_count > 0 {
            let index = self.free_list;
            self.free_list = self.slots[index as usize].next;
            self.free_count -= 1;
            index
        } else {
            if self.count == self.slots.len() {
                self.grow();
                bucket = (hash as usize) % self.buckets.len();
            }
            let index = self.count as i32;
            self.count += 1;
            index
        };

        let slot = &mut self.slots[index as usize];
        slot.hash = hash;
        slot.next = self.buckets[bucket];
        slot.key = Some(key);
        slot.values.put(value);
        self.buckets[bucket] = index;
        self.version = self.version.wrapping_add(1);
    }

    /// Borrows the value the next [`detach`](Self::detach) of `key` would
    /// remove. Pure: no state or version change.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.values(key).and_then(|group| group.try_peek())
    }

    /// Borrows the whole value group for `key`.
    pub fn values<Q>(&self, key: &Q) -> Option<&ValueGroup<V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let i = self.find_slot(key);
        if i >= 0 {
            Some(&self.slots[i as usize].values)
        } else {
            None
        }
    }

    /// Removes and returns the next value for `key` per the mode. Frees the
    /// slot when this empties the group. Returns `None` for an unknown key;
    /// the version moves only when a value actually comes out.
    pub fn detach<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.hash31(key);
        let bucket = (hash as usize) % self.buckets.len();
        let mut prev = NIL;
        let mut i = self.buckets[bucket];
        while i >= 0 {
            let idx = i as usize;
            let found = {
                let slot = &self.slots[idx];
                slot.hash == hash
                    && slot.key.as_ref().map(|k| k.borrow() == key).unwrap_or(false)
            };
            if found {
                let (value, chain_next) = {
                    let slot = &mut self.slots[idx];
                    // Occupied slots never hold an empty group.
                    let value = slot
                        .values
                        .try_take()
                        .expect("occupied slot with empty group");
                    if slot.values.is_empty() {
                        let chain_next = slot.next;
                        slot.hash = NIL;
                        slot.key = None;
                        (value, Some(chain_next))
                    } else {
                        (value, None)
                    }
                };
                if let Some(chain_next) = chain_next {
                    // Head removal rewrites the bucket; interior removal
                    // rewrites the predecessor's link.
                    if prev < 0 {
                        self.buckets[bucket] = chain_next;
                    } else {
                        self.slots[prev as usize].next = chain_next;
                    }
                    self.slots[idx].next = self.free_list;
                    self.free_list = i;
                    self.free_count += 1;
                }
                self.version = self.version.wrapping_add(1);
                return Some(value);
            }
            prev = i;
            i = self.slots[idx].next;
        }
        None
    }

    /// Empties the table without shrinking the backing arrays.
    pub fn clear(&mut self) {
        if self.count == 0 {
            return;
        }
        for bucket in &mut self.buckets {
            *bucket = NIL;
        }
        for slot in &mut self.slots[..self.count] {
            slot.hash = NIL;
            slot.next = NIL;
            slot.key = None;
            slot.values.clear();
        }
        self.count = 0;
        self.free_count = 0;
        self.free_list = NIL;
        self.version = self.version.wrapping_add(1);
    }

    fn grow(&mut self) {
        self.resize(primes::expand_prime(self.count));
    }

    /// Extends the slot arena to `new_size` and rebuilds every bucket chain
    /// from the stored hashes. Slot payloads are moved, never rehashed.
    fn resize(&mut self, new_size: usize) {
        let mode = self.mode;
        self.slots.resize_with(new_size, || Slot::free(mode));
        let mut buckets = vec![NIL; new_size];
        for i in 0..self.count {
            if self.slots[i].hash >= 0 {
                let bucket = (self.slots[i].hash as usize) % new_size;
                self.slots[i].next = buckets[bucket];
                buckets[bucket] = i as i32;
            }
        }
        self.buckets = buckets;
    }

    /// Borrowing iterator over `(key, group)` for every occupied slot.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: self.slots[..self.count].iter(),
        }
    }

    /// Detached enumerator. Holds no borrow; every advance re-presents the
    /// blackboard and fails once the table has been mutated since creation.
    pub fn cursor(&self) -> Cursor {
        Cursor {
            index: 0,
            version: self.version,
        }
    }
}

impl<K, V, S> Clone for Blackboard<K, V, S>
where
    K: Clone + Eq + Hash,
    V: Clone,
    S: BuildHasher + Clone,
{
    /// Deep copy: replays every value through `pin` in insertion order, so
    /// the clone shares no storage with the source and drains identically.
    fn clone(&self) -> Self {
        let mut out =
            Self::with_capacity_and_hasher(self.mode, self.slots.len(), self.hasher.clone());
        for (key, group) in self.iter() {
            for value in group {
                out.pin(key.clone(), value.clone());
            }
        }
        out
    }
}

impl<K, V, S> Extend<(K, V)> for Blackboard<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.pin(key, value);
        }
    }
}

/// Iterator over occupied slots of a [`Blackboard`].
pub struct Iter<'a, K, V> {
    slots: core::slice::Iter<'a, Slot<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a ValueGroup<V>);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if slot.hash >= 0 {
                if let Some(key) = slot.key.as_ref() {
                    return Some((key, &slot.values));
                }
            }
        }
        None
    }
}

impl<'a, K, V, S> IntoIterator for &'a Blackboard<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    type Item = (&'a K, &'a ValueGroup<V>);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug)]
pub enum CursorError {
    /// The blackboard was mutated after this cursor was created.
    Invalidated,
}

impl core::fmt::Display for CursorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CursorError::Invalidated => f.write_str("blackboard mutated during cursor traversal"),
        }
    }
}

impl std::error::Error for CursorError {}

/// Detached single-pass enumerator over a [`Blackboard`].
///
/// A cursor captures the version at creation and stays valid only while the
/// blackboard is unmutated. Once [`next`](Cursor::next) reports
/// [`CursorError::Invalidated`] the cursor is permanently dead; obtain a
/// fresh one to iterate again.
#[derive(Clone, Debug)]
pub struct Cursor {
    index: usize,
    version: u64,
}

impl Cursor {
    /// Advances to the next occupied slot, yielding `Ok(None)` at the end.
    #[allow(clippy::should_implement_trait)]
    pub fn next<'a, K, V, S>(
        &mut self,
        board: &'a Blackboard<K, V, S>,
    ) -> Result<Option<(&'a K, &'a ValueGroup<V>)>, CursorError> {
        if self.version != board.version {
            return Err(CursorError::Invalidated);
        }
        while self.index < board.count {
            let slot = &board.slots[self.index];
            self.index += 1;
            if slot.hash >= 0 {
                if let Some(key) = slot.key.as_ref() {
                    return Ok(Some((key, &slot.values)));
                }
            }
        }
        Ok(None)
    }
}
