use std::fmt;
use std::hash::Hash;

use ahash::RandomState;
use hashbrown::HashMap;

use crate::list::{EntryList, Iter};
use crate::metrics::CacheMetrics;
use crate::traits::ByteSize;

/// Handler invoked with ownership of each evicted `(key, value)` pair.
pub type EvictionHandler<K, V> = Box<dyn FnMut(K, V)>;

/// Bounded-memory LRU cache.
///
/// Entries are charged `key.byte_size() + value.byte_size()` against a fixed
/// byte capacity. When an insert pushes the running total over the capacity,
/// least-recently-used entries are evicted until the cache fits again — or
/// until it is empty, if the inserted entry alone exceeds the budget. A
/// capacity of zero is legal and retains nothing.
///
/// The cache performs no internal locking and is meant for exclusive access
/// by a single owner; all mutating operations take `&mut self`. Callers that
/// need sharing must wrap the cache in their own mutual exclusion.
///
/// # Recency
///
/// Any touch — a new insert, an update of an existing key, or a [`get`] —
/// promotes the entry to most-recently-used. [`peek`], [`contains`],
/// [`peek_oldest`], and [`iter`] never change recency order, so diagnostics
/// do not distort eviction behavior.
///
/// # Eviction handler
///
/// An optional handler (configured via [`CacheBuilder::on_evicted`]) is
/// invoked synchronously with each evicted pair. It runs strictly after the
/// entry has left the index, the recency list, and the byte accounting, so
/// any state it observes is consistent.
///
/// # Example
///
/// ```
/// use byte_lru::Cache;
///
/// let mut cache: Cache<String, String> = Cache::new(64);
/// cache.insert("user:1".to_string(), "alice".to_string());
///
/// assert_eq!(cache.get(&"user:1".to_string()).map(String::as_str), Some("alice"));
/// assert_eq!(cache.used_bytes(), 6 + 5);
/// ```
///
/// [`get`]: Cache::get
/// [`peek`]: Cache::peek
/// [`contains`]: Cache::contains
/// [`peek_oldest`]: Cache::peek_oldest
/// [`iter`]: Cache::iter
/// [`CacheBuilder::on_evicted`]: crate::CacheBuilder::on_evicted
pub struct Cache<K, V> {
	/// Byte budget. Fixed for the lifetime of the cache.
	capacity: usize,
	/// Running total of resident entry costs, maintained incrementally.
	used: usize,
	/// Recency order: front = most recent, back = next eviction candidate.
	list: EntryList<K, V>,
	/// Key -> slot index into the recency list.
	index: HashMap<K, usize, RandomState>,
	/// Invoked with each evicted pair, after removal completes.
	on_evicted: Option<EvictionHandler<K, V>>,
	counters: Counters,
}

/// Operation counters feeding [`CacheMetrics`].
#[derive(Default)]
struct Counters {
	hits: u64,
	misses: u64,
	inserts: u64,
	updates: u64,
	evictions: u64,
}

impl<K, V> Cache<K, V>
where
	K: Hash + Eq + Clone + ByteSize,
	V: ByteSize,
{
	/// Create a cache with the given byte capacity and no eviction handler.
	///
	/// Always succeeds; any capacity, including zero, is valid.
	pub fn new(capacity_bytes: usize) -> Self {
		Self::with_handler(capacity_bytes, None)
	}

	pub(crate) fn with_handler(
		capacity_bytes: usize,
		on_evicted: Option<EvictionHandler<K, V>>,
	) -> Self {
		Self {
			capacity: capacity_bytes,
			used: 0,
			list: EntryList::new(),
			index: HashMap::with_hasher(RandomState::new()),
			on_evicted,
			counters: Counters::default(),
		}
	}

	/// Insert a key-value pair, evicting least-recently-used entries as
	/// needed to restore the byte budget.
	///
	/// If the key is already resident its value is replaced, the entry is
	/// promoted to most-recently-used, and only the value's cost delta is
	/// charged — the key's own cost is counted once per resident key.
	///
	/// Eviction is a loop, not a single step: one oversized insert can push
	/// out several entries, including — if its cost alone exceeds the
	/// capacity — the entry just inserted. The eviction handler fires once
	/// per evicted pair, in eviction order.
	///
	/// # Runtime Complexity
	///
	/// O(1) amortized, plus O(1) per entry evicted.
	pub fn insert(&mut self, key: K, value: V) {
		if let Some(idx) = self.index.get(&key).copied() {
			let new_cost = value.byte_size();
			let old = self.list.replace_value(idx, value);
			self.used -= old.byte_size();
			self.used += new_cost;
			self.list.move_to_front(idx);
			self.counters.updates += 1;
		} else {
			let cost = key.byte_size() + value.byte_size();
			let idx = self.list.push_front(key.clone(), value);
			self.index.insert(key, idx);
			self.used += cost;
			self.counters.inserts += 1;
		}

		while self.used > self.capacity && !self.list.is_empty() {
			self.evict_back();
		}
	}

	/// Look up a key, promoting it to most-recently-used on a hit.
	///
	/// Lookup never evicts and never changes the byte accounting.
	///
	/// # Runtime Complexity
	///
	/// O(1) amortized.
	pub fn get(&mut self, key: &K) -> Option<&V> {
		match self.index.get(key).copied() {
			Some(idx) => {
				self.list.move_to_front(idx);
				self.counters.hits += 1;
				self.list.value(idx)
			}
			None => {
				self.counters.misses += 1;
				None
			}
		}
	}

	/// Evict the least-recently-used entry, invoking the eviction handler.
	///
	/// No-op on an empty cache.
	pub fn remove_oldest(&mut self) {
		self.evict_back();
	}

	/// Look up a key without promoting it.
	pub fn peek(&self, key: &K) -> Option<&V> {
		self.index.get(key).and_then(|&idx| self.list.value(idx))
	}

	/// Borrow the next eviction candidate without removing or promoting it.
	pub fn peek_oldest(&self) -> Option<(&K, &V)> {
		self.list.back()
	}

	/// Whether the key is resident. Does not promote.
	pub fn contains(&self, key: &K) -> bool {
		self.index.contains_key(key)
	}

	/// Bytes currently charged against the capacity.
	pub fn used_bytes(&self) -> usize {
		self.used
	}

	/// The configured byte budget.
	pub fn capacity_bytes(&self) -> usize {
		self.capacity
	}

	/// Number of resident entries.
	pub fn len(&self) -> usize {
		self.index.len()
	}

	/// Whether the cache holds no entries.
	pub fn is_empty(&self) -> bool {
		self.index.is_empty()
	}

	/// Iterate resident entries from most-recently-used to
	/// least-recently-used. Does not promote.
	pub fn iter(&self) -> Iter<'_, K, V> {
		self.list.iter()
	}

	/// Drop every entry and reset the metrics counters.
	///
	/// Clearing is not capacity pressure: the eviction handler does not
	/// fire for the dropped entries.
	pub fn clear(&mut self) {
		self.list.clear();
		self.index.clear();
		self.used = 0;
		self.counters = Counters::default();
	}

	/// Snapshot of the cache's performance metrics.
	///
	/// # Example
	///
	/// ```
	/// use byte_lru::Cache;
	///
	/// let mut cache: Cache<String, String> = Cache::new(1024);
	/// cache.insert("a".to_string(), "1".to_string());
	/// cache.get(&"a".to_string());
	///
	/// let metrics = cache.metrics();
	/// assert_eq!(metrics.hits, 1);
	/// assert!(metrics.utilization() > 0.0);
	/// ```
	pub fn metrics(&self) -> CacheMetrics {
		CacheMetrics {
			hits: self.counters.hits,
			misses: self.counters.misses,
			inserts: self.counters.inserts,
			updates: self.counters.updates,
			evictions: self.counters.evictions,
			used_bytes: self.used,
			capacity_bytes: self.capacity,
			entry_count: self.index.len(),
		}
	}

	/// Remove the back entry and hand it to the eviction handler.
	///
	/// The handler runs only after the entry has left the index, the list,
	/// and the byte accounting, so re-entrant observers see consistent
	/// state.
	fn evict_back(&mut self) {
		let Some((key, value)) = self.list.pop_back() else {
			return;
		};
		self.index.remove(&key);
		self.used -= key.byte_size() + value.byte_size();
		self.counters.evictions += 1;

		if let Some(handler) = self.on_evicted.as_mut() {
			handler(key, value);
		}
	}
}

impl<K, V> fmt::Debug for Cache<K, V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Cache")
			.field("capacity_bytes", &self.capacity)
			.field("used_bytes", &self.used)
			.field("len", &self.index.len())
			.finish()
	}
}
