//! Arena-backed recency list.
//!
//! Recency order is kept in a doubly-linked list whose links are plain
//! `usize` indices into a `Vec` of nodes, so there is no `unsafe` and no
//! pointer aliasing. Vacated slots are chained into a free list and reused
//! by later insertions, which keeps the arena bounded under steady-state
//! eviction churn.
//!
//! The front of the list is the most-recently-used entry; the back is the
//! next eviction candidate. Push-front, move-to-front, pop-back, and removal
//! by slot index are all O(1).

/// Sentinel index for absent links.
const NIL: usize = usize::MAX;

struct Node<K, V> {
	/// `None` while the slot sits on the free list.
	slot: Option<(K, V)>,
	prev: usize,
	next: usize,
}

/// Doubly-linked recency list over an arena of slots.
///
/// The list hands out stable slot indices; the cache's key index maps each
/// key to the index of its node. A slot index stays valid until the entry
/// is popped or removed.
pub(crate) struct EntryList<K, V> {
	arena: Vec<Node<K, V>>,
	head: usize,
	tail: usize,
	free: usize,
	len: usize,
}

impl<K, V> EntryList<K, V> {
	pub(crate) fn new() -> Self {
		Self {
			arena: Vec::new(),
			head: NIL,
			tail: NIL,
			free: NIL,
			len: 0,
		}
	}

	#[cfg(test)]
	pub(crate) fn len(&self) -> usize {
		self.len
	}

	pub(crate) fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// Insert an entry at the front (most-recently-used) and return its slot.
	pub(crate) fn push_front(&mut self, key: K, value: V) -> usize {
		let idx = self.alloc(key, value);
		self.link_front(idx);
		self.len += 1;
		idx
	}

	/// Promote the entry at `idx` to the front.
	pub(crate) fn move_to_front(&mut self, idx: usize) {
		if self.head == idx {
			return;
		}
		self.unlink(idx);
		self.link_front(idx);
	}

	/// Remove and return the back (least-recently-used) entry.
	pub(crate) fn pop_back(&mut self) -> Option<(K, V)> {
		let idx = self.tail;
		if idx == NIL {
			return None;
		}
		Some(self.remove(idx))
	}

	/// Remove the entry at `idx`, returning ownership of the pair.
	pub(crate) fn remove(&mut self, idx: usize) -> (K, V) {
		self.unlink(idx);
		let entry = self.arena[idx].slot.take().expect("live slot holds an entry");
		self.arena[idx].next = self.free;
		self.free = idx;
		self.len -= 1;
		entry
	}

	/// Borrow the value stored at `idx`.
	pub(crate) fn value(&self, idx: usize) -> Option<&V> {
		self.arena[idx].slot.as_ref().map(|(_, v)| v)
	}

	/// Replace the value at `idx`, returning the previous one.
	pub(crate) fn replace_value(&mut self, idx: usize, value: V) -> V {
		let slot = self.arena[idx].slot.as_mut().expect("live slot holds an entry");
		std::mem::replace(&mut slot.1, value)
	}

	/// Borrow the back (least-recently-used) entry without removing it.
	pub(crate) fn back(&self) -> Option<(&K, &V)> {
		if self.tail == NIL {
			return None;
		}
		self.arena[self.tail].slot.as_ref().map(|(k, v)| (k, v))
	}

	pub(crate) fn clear(&mut self) {
		self.arena.clear();
		self.head = NIL;
		self.tail = NIL;
		self.free = NIL;
		self.len = 0;
	}

	/// Iterate entries from most-recently-used to least-recently-used.
	pub(crate) fn iter(&self) -> Iter<'_, K, V> {
		Iter {
			arena: &self.arena,
			cursor: self.head,
			remaining: self.len,
		}
	}

	/// Take a slot from the free list, or grow the arena.
	fn alloc(&mut self, key: K, value: V) -> usize {
		if self.free != NIL {
			let idx = self.free;
			self.free = self.arena[idx].next;
			self.arena[idx].slot = Some((key, value));
			self.arena[idx].prev = NIL;
			self.arena[idx].next = NIL;
			idx
		} else {
			self.arena.push(Node {
				slot: Some((key, value)),
				prev: NIL,
				next: NIL,
			});
			self.arena.len() - 1
		}
	}

	/// Splice the node at `idx` out of the list, leaving its slot intact.
	fn unlink(&mut self, idx: usize) {
		let prev = self.arena[idx].prev;
		let next = self.arena[idx].next;

		if prev != NIL {
			self.arena[prev].next = next;
		} else {
			self.head = next;
		}
		if next != NIL {
			self.arena[next].prev = prev;
		} else {
			self.tail = prev;
		}

		self.arena[idx].prev = NIL;
		self.arena[idx].next = NIL;
	}

	/// Attach an unlinked node at the front.
	fn link_front(&mut self, idx: usize) {
		self.arena[idx].prev = NIL;
		self.arena[idx].next = self.head;
		if self.head != NIL {
			self.arena[self.head].prev = idx;
		}
		self.head = idx;
		if self.tail == NIL {
			self.tail = idx;
		}
	}
}

/// Iterator over entries from most-recently-used to least-recently-used.
pub struct Iter<'a, K, V> {
	arena: &'a [Node<K, V>],
	cursor: usize,
	remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
	type Item = (&'a K, &'a V);

	fn next(&mut self) -> Option<Self::Item> {
		if self.cursor == NIL || self.remaining == 0 {
			return None;
		}
		let node = &self.arena[self.cursor];
		self.cursor = node.next;
		self.remaining -= 1;
		node.slot.as_ref().map(|(k, v)| (k, v))
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		(self.remaining, Some(self.remaining))
	}
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
