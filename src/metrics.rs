//! Cache performance metrics.

/// Snapshot of cache performance metrics.
///
/// Provides insight into cache behavior: hit rates, eviction counts, and
/// budget utilization.
///
/// # Example
///
/// ```
/// use byte_lru::Cache;
///
/// let cache: Cache<String, String> = Cache::new(1024);
/// // ... perform cache operations ...
///
/// let metrics = cache.metrics();
/// println!("Hit rate: {:.2}%", metrics.hit_rate() * 100.0);
/// println!("Utilization: {:.2}%", metrics.utilization() * 100.0);
/// println!("Evictions: {}", metrics.evictions);
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
pub struct CacheMetrics {
	/// Number of successful lookups.
	pub hits: u64,
	/// Number of failed lookups (key not found).
	pub misses: u64,
	/// Number of new entries inserted.
	pub inserts: u64,
	/// Number of existing entries updated (key already resident).
	pub updates: u64,
	/// Number of entries evicted, whether by capacity pressure or an
	/// explicit `remove_oldest` call.
	pub evictions: u64,
	/// Bytes currently charged against the capacity.
	pub used_bytes: usize,
	/// The configured byte budget.
	pub capacity_bytes: usize,
	/// Current number of resident entries.
	pub entry_count: usize,
}

impl CacheMetrics {
	/// Cache hit rate as a ratio between 0.0 and 1.0.
	///
	/// Returns 0.0 if there have been no lookups.
	pub fn hit_rate(&self) -> f64 {
		let total = self.hits + self.misses;
		if total == 0 {
			0.0
		} else {
			self.hits as f64 / total as f64
		}
	}

	/// Budget utilization as a ratio between 0.0 and 1.0.
	///
	/// Returns 0.0 for a zero-capacity cache.
	pub fn utilization(&self) -> f64 {
		if self.capacity_bytes == 0 {
			0.0
		} else {
			self.used_bytes as f64 / self.capacity_bytes as f64
		}
	}

	/// Total number of lookups (hits + misses).
	pub fn total_accesses(&self) -> u64 {
		self.hits + self.misses
	}

	/// Total number of write operations (inserts + updates).
	pub fn total_writes(&self) -> u64 {
		self.inserts + self.updates
	}
}
