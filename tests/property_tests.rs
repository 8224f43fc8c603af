use byte_lru::{ByteSize, Cache};
use proptest::prelude::*;

/// A cache operation for model-based testing.
#[derive(Debug, Clone)]
enum Op {
	Insert(u8, usize),
	Get(u8),
	RemoveOldest,
}

fn op_strategy() -> impl Strategy<Value = Op> {
	prop_oneof![
		(0u8..30, 0usize..40).prop_map(|(k, len)| Op::Insert(k, len)),
		(0u8..30).prop_map(Op::Get),
		Just(Op::RemoveOldest),
	]
}

fn key(id: u8) -> String {
	format!("key-{id:02}")
}

/// Straight-line LRU reference: a Vec ordered MRU-first.
struct Model {
	capacity: usize,
	entries: Vec<(String, String)>,
}

impl Model {
	fn new(capacity: usize) -> Self {
		Self {
			capacity,
			entries: Vec::new(),
		}
	}

	fn used(&self) -> usize {
		self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
	}

	fn insert(&mut self, key: String, value: String) {
		if let Some(pos) = self.entries.iter().position(|(k, _)| *k == key) {
			self.entries.remove(pos);
		}
		self.entries.insert(0, (key, value));
		while self.used() > self.capacity && !self.entries.is_empty() {
			self.entries.pop();
		}
	}

	fn get(&mut self, key: &str) -> bool {
		if let Some(pos) = self.entries.iter().position(|(k, _)| k == key) {
			let entry = self.entries.remove(pos);
			self.entries.insert(0, entry);
			true
		} else {
			false
		}
	}

	fn remove_oldest(&mut self) {
		self.entries.pop();
	}
}

proptest! {
	#[test]
	fn test_matches_reference_model(
		capacity in 0usize..200,
		ops in prop::collection::vec(op_strategy(), 1..120),
	) {
		let mut cache: Cache<String, String> = Cache::new(capacity);
		let mut model = Model::new(capacity);

		for op in ops {
			match op {
				Op::Insert(id, len) => {
					let k = key(id);
					let v = "x".repeat(len);
					cache.insert(k.clone(), v.clone());
					model.insert(k, v);
				}
				Op::Get(id) => {
					let k = key(id);
					let hit = cache.get(&k).is_some();
					prop_assert_eq!(hit, model.get(&k));
				}
				Op::RemoveOldest => {
					cache.remove_oldest();
					model.remove_oldest();
				}
			}

			// Same residents in the same recency order.
			let cache_order: Vec<(&String, &String)> = cache.iter().collect();
			let model_order: Vec<(&String, &String)> =
				model.entries.iter().map(|(k, v)| (k, v)).collect();
			prop_assert_eq!(cache_order, model_order);

			// Incremental accounting agrees with recomputation.
			prop_assert_eq!(cache.used_bytes(), model.used());
		}
	}

	#[test]
	fn test_budget_invariant_after_inserts(
		capacity in 0usize..500,
		inserts in prop::collection::vec((0u8..50, 0usize..60), 1..80),
	) {
		let mut cache: Cache<String, String> = Cache::new(capacity);

		for (id, len) in inserts {
			cache.insert(key(id), "x".repeat(len));
			prop_assert!(
				cache.used_bytes() <= capacity || cache.is_empty(),
				"used {} exceeds capacity {} with {} residents",
				cache.used_bytes(),
				capacity,
				cache.len()
			);
		}
	}

	#[test]
	fn test_insert_get_consistency(keys in prop::collection::vec(0u8..100, 1..50)) {
		// Large enough that nothing is evicted during the test.
		let mut cache: Cache<String, String> = Cache::new(1024 * 1024);

		for id in &keys {
			cache.insert(key(*id), format!("value-{id}"));
		}

		for id in &keys {
			let got = cache.get(&key(*id)).cloned();
			prop_assert_eq!(got, Some(format!("value-{id}")));
		}
	}

	#[test]
	fn test_size_accounting_recomputes(
		inserts in prop::collection::vec((0u8..40, 0usize..50), 1..60),
	) {
		let mut cache: Cache<String, String> = Cache::new(400);

		for (id, len) in inserts {
			cache.insert(key(id), "x".repeat(len));
		}

		let recomputed: usize = cache
			.iter()
			.map(|(k, v)| k.byte_size() + v.byte_size())
			.sum();
		prop_assert_eq!(cache.used_bytes(), recomputed);
	}

	#[test]
	fn test_entry_count_matches_iteration(
		ops in prop::collection::vec(op_strategy(), 1..80),
	) {
		let mut cache: Cache<String, String> = Cache::new(300);

		for op in ops {
			match op {
				Op::Insert(id, len) => cache.insert(key(id), "x".repeat(len)),
				Op::Get(id) => {
					let _ = cache.get(&key(id));
				}
				Op::RemoveOldest => cache.remove_oldest(),
			}
		}

		prop_assert_eq!(cache.len(), cache.iter().count());
		prop_assert_eq!(cache.is_empty(), cache.len() == 0);
	}
}

#[test]
fn test_no_panics_on_empty_operations() {
	let mut cache: Cache<String, String> = Cache::new(1024);

	assert!(cache.get(&"missing".to_string()).is_none());
	assert!(cache.peek(&"missing".to_string()).is_none());
	assert!(!cache.contains(&"missing".to_string()));
	assert!(cache.peek_oldest().is_none());
	cache.remove_oldest();
	assert_eq!(cache.len(), 0);
	assert_eq!(cache.used_bytes(), 0);

	cache.clear();
}

#[test]
fn test_duplicate_insertions_keep_one_entry() {
	let mut cache: Cache<String, String> = Cache::new(10240);

	for _ in 0..100 {
		cache.insert("dup".to_string(), "value".to_string());
	}

	assert_eq!(cache.len(), 1);
	assert_eq!(cache.used_bytes(), 3 + 5);
}
