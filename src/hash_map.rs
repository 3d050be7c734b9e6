use alloc::vec;
use core::borrow::Borrow;
use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::ops::Index;
use core::slice;

use crate::DefaultHashBuilder;
use crate::error::Error;
use crate::hash_table::HashTable;

/// Unwraps a table result, panicking on a broken invariant.
#[track_caller]
fn consistent<T>(result: Result<T, Error>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("hop-map: {err}"),
    }
}

/// Like [`consistent`], but maps [`Error::NotFound`] to `None`.
#[track_caller]
fn found<T>(result: Result<T, Error>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(Error::NotFound) => None,
        Err(err) => panic!("hop-map: {err}"),
    }
}

/// A hash map implemented with hopscotch hashing over dense entry arrays.
///
/// `HashMap<K, V, S>` stores key-value pairs where keys implement `Hash + Eq`
/// and uses a configurable hasher builder `S` to hash keys. Entries are kept
/// in insertion order; removing an entry moves the most recently inserted
/// one into its place.
///
/// # Performance Characteristics
///
/// - **Lookups**: touch at most one neighborhood (8 to 64 slots) regardless
///   of load.
/// - **Memory**: one `usize` plus one neighborhood bitmap (1 to 8 bytes) per
///   slot, plus the size of `(K, V)` and a `u64` hash per entry.
/// - **Load factor**: the slot table grows before it is 80% full.
///
/// # Examples
///
/// ```rust
/// use hop_map::HashMap;
///
/// let mut map = HashMap::new();
/// map.insert("a", 1);
/// map.insert("b", 2);
///
/// assert_eq!(map.get("a"), Some(&1));
/// assert_eq!(map.keys().copied().collect::<Vec<_>>(), ["a", "b"]);
/// ```
#[derive(Clone)]
pub struct HashMap<K, V, S = DefaultHashBuilder> {
    table: HashTable<K, V>,
    hash_builder: S,
}

impl<K, V, S> Debug for HashMap<K, V, S>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> PartialEq for HashMap<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter()
            .all(|(key, value)| other.get(key).is_some_and(|v| v == value))
    }
}

impl<K, V, S> Eq for HashMap<K, V, S>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, V, S> HashMap<K, V, S> {
    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hop_map::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// assert_eq!(map.len(), 0);
    /// map.insert(1, "a");
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map contains no elements.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of slots in the underlying slot table.
    ///
    /// This is always a power of two and at least 8, and the map keeps
    /// `len() < 0.8 * capacity()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hop_map::HashMap;
    ///
    /// let map: HashMap<i32, i32> = HashMap::new();
    /// assert_eq!(map.capacity(), 8);
    /// ```
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns the neighborhood width: the maximum distance, in slots,
    /// between an entry and its home bucket.
    pub fn neighborhood_width(&self) -> usize {
        self.table.neighborhood_width()
    }

    /// Returns a reference to the map's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Removes all elements and releases the slot table, returning the map
    /// to its freshly created size.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hop_map::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// for i in 0..100 {
    ///     map.insert(i, i);
    /// }
    /// map.clear();
    /// assert!(map.is_empty());
    /// assert_eq!(map.capacity(), 8);
    /// ```
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Returns an iterator over the key-value pairs in array order.
    ///
    /// Array order is insertion order until the first removal; each removal
    /// moves the last entry into the removed entry's position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hop_map::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// map.insert("x", 1);
    /// map.insert("y", 2);
    ///
    /// let pairs: Vec<_> = map.iter().collect();
    /// assert_eq!(pairs, [(&"x", &1), (&"y", &2)]);
    ///
    /// let reversed: Vec<_> = map.iter().rev().collect();
    /// assert_eq!(reversed, [(&"y", &2), (&"x", &1)]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            keys: self.table.keys().iter(),
            values: self.table.values().iter(),
        }
    }

    /// Returns an iterator over the entries with mutable references to the
    /// values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let (keys, values) = self.table.entries_mut();
        IterMut {
            keys: keys.iter(),
            values: values.iter_mut(),
        }
    }

    /// Returns an iterator over the keys in array order.
    pub fn keys(&self) -> Keys<'_, K> {
        Keys {
            inner: self.table.keys().iter(),
        }
    }

    /// Returns an iterator over the values in array order.
    pub fn values(&self) -> Values<'_, V> {
        Values {
            inner: self.table.values().iter(),
        }
    }

    /// Returns an iterator over mutable references to the values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hop_map::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// map.insert("a", 1);
    /// map.insert("b", 2);
    /// for value in map.values_mut() {
    ///     *value *= 10;
    /// }
    /// assert_eq!(map["b"], 20);
    /// ```
    pub fn values_mut(&mut self) -> ValuesMut<'_, V> {
        ValuesMut {
            inner: self.table.values_mut().iter_mut(),
        }
    }

    /// Removes every entry, returning them in array order.
    ///
    /// The map is empty as soon as this returns, even if the iterator is
    /// dropped early.
    pub fn drain(&mut self) -> Drain<'_, K, V> {
        let (keys, values) = self.table.take_entries();
        Drain {
            inner: IntoIter {
                keys: keys.into_iter(),
                values: values.into_iter(),
            },
            _marker: PhantomData,
        }
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Creates a new hash map with the given hasher builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::collections::hash_map::RandomState;
    ///
    /// use hop_map::HashMap;
    ///
    /// let map: HashMap<i32, String, _> = HashMap::with_hasher(RandomState::new());
    /// assert!(map.is_empty());
    /// ```
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(0, hash_builder)
    }

    /// Creates a new hash map that holds at least `capacity` entries before
    /// its slot table grows.
    ///
    /// # Panics
    ///
    /// Panics if the required slot count overflows `usize`.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            table: HashTable::with_capacity(capacity),
            hash_builder,
        }
    }

    /// Grows the slot table, if needed, so that `additional` more entries fit
    /// without another growth.
    ///
    /// # Panics
    ///
    /// Panics if the required slot count overflows `usize`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hop_map::HashMap;
    ///
    /// let mut map: HashMap<u32, u32> = HashMap::new();
    /// map.reserve(1000);
    /// assert!(map.capacity() * 4 > 1000 * 5);
    /// ```
    pub fn reserve(&mut self, additional: usize) {
        consistent(self.table.reserve(additional));
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, both the stored key and value
    /// are replaced and the old value is returned.
    ///
    /// # Panics
    ///
    /// Panics if the table's internal invariants are found broken, or if the
    /// slot table cannot grow any further. Use [`HashMap::set`] to receive
    /// those conditions as errors.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hop_map::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.insert(37, "b"), Some("a"));
    /// assert_eq!(map.get(&37), Some(&"b"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        consistent(self.set(key, value))
    }

    /// Inserts a key-value pair, reporting failures instead of panicking.
    ///
    /// Returns the previous value for the key, if any. An
    /// [`Error::InternalConsistency`] or [`Error::InvalidArgument`] means the
    /// map can no longer be trusted.
    pub fn set(&mut self, key: K, value: V) -> Result<Option<V>, Error> {
        let hash = self.hash_builder.hash_one(&key);
        match self.table.find(hash, |k| k == &key)? {
            Some(found) => {
                let (_, old_value) = self.table.replace_at(found.index, key, value);
                Ok(Some(old_value))
            }
            None => {
                self.table.insert_new(hash, key, value)?;
                Ok(None)
            }
        }
    }

    fn find_index<Q>(&self, key: &Q) -> Result<usize, Error>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_builder.hash_one(key);
        self.table
            .find(hash, |k| k.borrow() == key)?
            .map(|found| found.index)
            .ok_or(Error::NotFound)
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hop_map::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = found(self.find_index(key))?;
        Some(self.table.entry_at(index).1)
    }

    /// Returns the stored key and value corresponding to the key.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = found(self.find_index(key))?;
        Some(self.table.entry_at(index))
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = found(self.find_index(key))?;
        Some(self.table.entry_at_mut(index).1)
    }

    /// Returns `true` if the map contains a value for the specified key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        found(self.find_index(key)).is_some()
    }

    /// Removes a key from the map, returning its value if it was present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hop_map::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        found(self.delete_entry(key)).map(|(_, value)| value)
    }

    /// Removes a key from the map, returning the stored key and value if the
    /// key was present.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        found(self.delete_entry(key))
    }

    /// Removes a key from the map, failing with [`Error::NotFound`] if it is
    /// absent.
    ///
    /// Unlike [`HashMap::remove`], broken invariants are returned as errors
    /// rather than panics.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hop_map::Error;
    /// use hop_map::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// map.insert("k", 5);
    /// assert_eq!(map.delete("k"), Ok(5));
    /// assert_eq!(map.delete("k"), Err(Error::NotFound));
    /// ```
    pub fn delete<Q>(&mut self, key: &Q) -> Result<V, Error>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.delete_entry(key).map(|(_, value)| value)
    }

    fn delete_entry<Q>(&mut self, key: &Q) -> Result<(K, V), Error>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_builder.hash_one(key);
        let found = self
            .table
            .find(hash, |k| k.borrow() == key)?
            .ok_or(Error::NotFound)?;
        self.table.remove_at(found)
    }

    /// Removes a key from the map, returning its value or `default` if the
    /// key was absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hop_map::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// map.insert("a", 1);
    /// assert_eq!(map.pop("a", 0), 1);
    /// assert_eq!(map.pop("a", 0), 0);
    /// ```
    pub fn pop<Q>(&mut self, key: &Q, default: V) -> V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove(key).unwrap_or(default)
    }

    /// Removes and returns the entry at the end of the map's array order,
    /// which is the most recently inserted entry if nothing was removed since.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hop_map::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// map.insert("a", 1);
    /// map.insert("b", 2);
    /// assert_eq!(map.pop_item(), Some(("b", 2)));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn pop_item(&mut self) -> Option<(K, V)> {
        consistent(self.table.pop_last())
    }

    /// Returns the value for `key`, inserting `default` first if the key is
    /// absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hop_map::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// *map.get_or_insert("hits", 0) += 1;
    /// *map.get_or_insert("hits", 0) += 1;
    /// assert_eq!(map["hits"], 2);
    /// ```
    pub fn get_or_insert(&mut self, key: K, default: V) -> &mut V {
        self.get_or_insert_with(key, || default)
    }

    /// Returns the value for `key`, inserting the result of `default` first
    /// if the key is absent.
    pub fn get_or_insert_with(&mut self, key: K, default: impl FnOnce() -> V) -> &mut V {
        let hash = self.hash_builder.hash_one(&key);
        let index = match consistent(self.table.find(hash, |k| k == &key)) {
            Some(found) => found.index,
            None => consistent(self.table.insert_new(hash, key, default())),
        };
        self.table.entry_at_mut(index).1
    }

    /// Retains only the entries for which `keep` returns `true`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hop_map::HashMap;
    ///
    /// let mut map: HashMap<i32, i32> = (0..8).map(|x| (x, x * 10)).collect();
    /// map.retain(|&k, _| k % 2 == 0);
    /// assert_eq!(map.len(), 4);
    /// ```
    pub fn retain(&mut self, keep: impl FnMut(&K, &mut V) -> bool) {
        consistent(self.table.retain(keep));
    }

    /// Verifies the map's structural invariants.
    ///
    /// Checks that every entry sits inside its home neighborhood and is
    /// flagged in the home bitmap, that every slot and array index refer to
    /// each other exactly once, and that the table is below its maximum
    /// density.
    #[cfg(any(test, feature = "stats"))]
    pub fn check_invariants(&self) -> Result<(), Error> {
        self.table.check_invariants()
    }

    /// Returns how many entries sit at each distance from their home bucket,
    /// one bin per neighborhood offset.
    #[cfg(any(test, feature = "stats"))]
    pub fn probe_histogram(&self) -> alloc::vec::Vec<usize> {
        self.table.probe_histogram()
    }

    /// Returns detailed utilization statistics for debugging.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> crate::DebugStats {
        self.table.debug_stats()
    }
}

impl<K, V> HashMap<K, V, DefaultHashBuilder>
where
    K: Hash + Eq,
{
    /// Creates a new hash map using the default hasher builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hop_map::HashMap;
    ///
    /// let map: HashMap<i32, String> = HashMap::new();
    /// assert!(map.is_empty());
    /// assert_eq!(map.capacity(), 8);
    /// assert_eq!(map.neighborhood_width(), 8);
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }

    /// Creates a new hash map that holds at least `capacity` entries before
    /// its slot table grows, using the default hasher builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hop_map::HashMap;
    ///
    /// let map: HashMap<i32, String> = HashMap::with_capacity(100);
    /// assert_eq!(map.capacity(), 128);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, DefaultHashBuilder::default())
    }
}

impl<K, V, S> Default for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, Q, V, S> Index<&Q> for HashMap<K, V, S>
where
    K: Hash + Eq + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
    S: BuildHasher,
{
    type Output = V;

    /// Returns a reference to the value for `key`.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("key not found in HashMap")
    }
}

impl<K, V, S> FromIterator<(K, V)> for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::with_hasher(S::default());
        map.extend(iter);
        map
    }
}

impl<K, V, S, const N: usize> From<[(K, V); N]> for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<K, V, S> Extend<(K, V)> for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K, V, S> Extend<(&'a K, &'a V)> for HashMap<K, V, S>
where
    K: Hash + Eq + Copy,
    V: Copy,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: I) {
        for (&key, &value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a HashMap<K, V, S> {
    type IntoIter = Iter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut HashMap<K, V, S> {
    type IntoIter = IterMut<'a, K, V>;
    type Item = (&'a K, &'a mut V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, V, S> IntoIterator for HashMap<K, V, S> {
    type IntoIter = IntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(mut self) -> Self::IntoIter {
        let (keys, values) = self.table.take_entries();
        IntoIter {
            keys: keys.into_iter(),
            values: values.into_iter(),
        }
    }
}

/// Implements the iterator traits for a pair of lockstep slice iterators.
macro_rules! pair_iterator {
    ($name:ident<$($lt:lifetime,)? $($param:ident),+>, $item:ty) => {
        impl<$($lt,)? $($param),+> Iterator for $name<$($lt,)? $($param),+> {
            type Item = $item;

            #[inline]
            fn next(&mut self) -> Option<Self::Item> {
                Some((self.keys.next()?, self.values.next()?))
            }

            #[inline]
            fn size_hint(&self) -> (usize, Option<usize>) {
                self.keys.size_hint()
            }
        }

        impl<$($lt,)? $($param),+> DoubleEndedIterator for $name<$($lt,)? $($param),+> {
            #[inline]
            fn next_back(&mut self) -> Option<Self::Item> {
                Some((self.keys.next_back()?, self.values.next_back()?))
            }
        }

        impl<$($lt,)? $($param),+> ExactSizeIterator for $name<$($lt,)? $($param),+> {}
        impl<$($lt,)? $($param),+> FusedIterator for $name<$($lt,)? $($param),+> {}
    };
}

/// Implements the iterator traits for a wrapper around one slice iterator.
macro_rules! single_iterator {
    ($name:ident<$lt:lifetime, $param:ident>, $item:ty) => {
        impl<$lt, $param> Iterator for $name<$lt, $param> {
            type Item = $item;

            #[inline]
            fn next(&mut self) -> Option<Self::Item> {
                self.inner.next()
            }

            #[inline]
            fn size_hint(&self) -> (usize, Option<usize>) {
                self.inner.size_hint()
            }
        }

        impl<$lt, $param> DoubleEndedIterator for $name<$lt, $param> {
            #[inline]
            fn next_back(&mut self) -> Option<Self::Item> {
                self.inner.next_back()
            }
        }

        impl<$lt, $param> ExactSizeIterator for $name<$lt, $param> {}
        impl<$lt, $param> FusedIterator for $name<$lt, $param> {}
    };
}

/// An iterator over the key-value pairs of a `HashMap`.
pub struct Iter<'a, K, V> {
    keys: slice::Iter<'a, K>,
    values: slice::Iter<'a, V>,
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            keys: self.keys.clone(),
            values: self.values.clone(),
        }
    }
}

pair_iterator!(Iter<'a, K, V>, (&'a K, &'a V));

/// An iterator over the key-value pairs of a `HashMap`, with mutable
/// references to the values.
pub struct IterMut<'a, K, V> {
    keys: slice::Iter<'a, K>,
    values: slice::IterMut<'a, V>,
}

pair_iterator!(IterMut<'a, K, V>, (&'a K, &'a mut V));

/// An owning iterator over the key-value pairs of a `HashMap`.
pub struct IntoIter<K, V> {
    keys: vec::IntoIter<K>,
    values: vec::IntoIter<V>,
}

pair_iterator!(IntoIter<K, V>, (K, V));

/// An iterator over the keys of a `HashMap`.
#[derive(Clone)]
pub struct Keys<'a, K> {
    inner: slice::Iter<'a, K>,
}

single_iterator!(Keys<'a, K>, &'a K);

/// An iterator over the values of a `HashMap`.
#[derive(Clone)]
pub struct Values<'a, V> {
    inner: slice::Iter<'a, V>,
}

single_iterator!(Values<'a, V>, &'a V);

/// An iterator over mutable references to the values of a `HashMap`.
pub struct ValuesMut<'a, V> {
    inner: slice::IterMut<'a, V>,
}

single_iterator!(ValuesMut<'a, V>, &'a mut V);

/// A draining iterator over the key-value pairs of a `HashMap`.
pub struct Drain<'a, K, V> {
    inner: IntoIter<K, V>,
    _marker: PhantomData<&'a mut HashTable<K, V>>,
}

impl<K, V> Iterator for Drain<'_, K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Drain<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for Drain<'_, K, V> {}
impl<K, V> FusedIterator for Drain<'_, K, V> {}
