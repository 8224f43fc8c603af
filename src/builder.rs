use std::hash::Hash;

use crate::cache::{Cache, EvictionHandler};
use crate::traits::ByteSize;

/// Builder for configuring a [`Cache`].
///
/// # Example
///
/// ```
/// use byte_lru::CacheBuilder;
///
/// let mut cache = CacheBuilder::new(1024 * 1024) // 1 MB
///     .on_evicted(|key: String, _value: Vec<u8>| eprintln!("dropped {key}"))
///     .build();
///
/// cache.insert("blob".to_string(), vec![0u8; 128]);
/// ```
pub struct CacheBuilder<K, V> {
	capacity: usize,
	on_evicted: Option<EvictionHandler<K, V>>,
}

impl<K, V> CacheBuilder<K, V>
where
	K: Hash + Eq + Clone + ByteSize,
	V: ByteSize,
{
	/// Create a new builder with the given byte capacity.
	///
	/// Any capacity is valid; zero means the cache retains nothing past the
	/// insert that triggers the size check.
	pub fn new(capacity_bytes: usize) -> Self {
		Self {
			capacity: capacity_bytes,
			on_evicted: None,
		}
	}

	/// Register a handler invoked with each evicted `(key, value)` pair.
	///
	/// The handler runs synchronously during `insert`/`remove_oldest`,
	/// after the entry has fully left the cache's internal structures.
	pub fn on_evicted<F>(mut self, handler: F) -> Self
	where
		F: FnMut(K, V) + 'static,
	{
		self.on_evicted = Some(Box::new(handler));
		self
	}

	/// Build the cache with the configured settings.
	pub fn build(self) -> Cache<K, V> {
		Cache::with_handler(self.capacity, self.on_evicted)
	}
}

impl<K, V> Default for CacheBuilder<K, V>
where
	K: Hash + Eq + Clone + ByteSize,
	V: ByteSize,
{
	/// Create a builder with no handler and 1GB capacity.
	fn default() -> Self {
		Self::new(1024 * 1024 * 1024) // 1 GB
	}
}
