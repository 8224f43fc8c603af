use std::borrow::Cow;
use std::mem::size_of;
use std::rc::Rc;
use std::sync::Arc;

/// Capability for types that can report how many bytes they occupy.
///
/// The cache charges every entry `key.byte_size() + value.byte_size()`
/// against its capacity. The reported size is a budgeting figure, not a
/// precise allocator measurement: for strings and byte buffers it is the
/// payload length, for fixed-size scalars it is `size_of::<Self>()`.
///
/// # Example
///
/// ```
/// use byte_lru::ByteSize;
///
/// struct Row {
///     id: u64,
///     name: String,
/// }
///
/// impl ByteSize for Row {
///     fn byte_size(&self) -> usize {
///         self.id.byte_size() + self.name.byte_size()
///     }
/// }
///
/// let row = Row { id: 7, name: "alice".to_string() };
/// assert_eq!(row.byte_size(), 8 + 5);
/// ```
pub trait ByteSize {
	/// Number of bytes this value counts against the cache budget.
	fn byte_size(&self) -> usize;
}

/// Implement `ByteSize` as `size_of::<Self>()` for fixed-size types.
macro_rules! fixed_byte_size {
	($($ty:ty),* $(,)?) => {
		$(
			impl ByteSize for $ty {
				fn byte_size(&self) -> usize {
					size_of::<$ty>()
				}
			}
		)*
	};
}

fixed_byte_size!(
	u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64, bool, char, ()
);

impl ByteSize for str {
	fn byte_size(&self) -> usize {
		self.len()
	}
}

impl ByteSize for String {
	fn byte_size(&self) -> usize {
		self.len()
	}
}

impl ByteSize for [u8] {
	fn byte_size(&self) -> usize {
		self.len()
	}
}

impl ByteSize for Vec<u8> {
	fn byte_size(&self) -> usize {
		self.len()
	}
}

impl<T: ByteSize + ?Sized> ByteSize for &T {
	fn byte_size(&self) -> usize {
		(**self).byte_size()
	}
}

impl<T: ByteSize + ?Sized> ByteSize for Box<T> {
	fn byte_size(&self) -> usize {
		(**self).byte_size()
	}
}

impl<T: ByteSize + ?Sized> ByteSize for Rc<T> {
	fn byte_size(&self) -> usize {
		(**self).byte_size()
	}
}

impl<T: ByteSize + ?Sized> ByteSize for Arc<T> {
	fn byte_size(&self) -> usize {
		(**self).byte_size()
	}
}

impl<T: ByteSize> ByteSize for Option<T> {
	fn byte_size(&self) -> usize {
		self.as_ref().map_or(0, ByteSize::byte_size)
	}
}

impl<T: ByteSize + ToOwned + ?Sized> ByteSize for Cow<'_, T> {
	fn byte_size(&self) -> usize {
		(**self).byte_size()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_string_is_payload_length() {
		assert_eq!("v1".byte_size(), 2);
		assert_eq!("v1".to_string().byte_size(), 2);
		assert_eq!("".byte_size(), 0);
	}

	#[test]
	fn test_byte_buffers() {
		assert_eq!(vec![0u8; 17].byte_size(), 17);
		let boxed: Box<[u8]> = vec![0u8; 5].into_boxed_slice();
		assert_eq!(boxed.byte_size(), 5);
	}

	#[test]
	fn test_scalars_use_size_of() {
		assert_eq!(0u64.byte_size(), 8);
		assert_eq!(0u8.byte_size(), 1);
		assert_eq!(true.byte_size(), 1);
		assert_eq!(().byte_size(), 0);
	}

	#[test]
	fn test_forwarding_impls() {
		let arc = Arc::new("abc".to_string());
		assert_eq!(arc.byte_size(), 3);
		assert_eq!(Some(4u32).byte_size(), 4);
		assert_eq!(None::<u32>.byte_size(), 0);
		let cow: Cow<'_, str> = Cow::Borrowed("abcd");
		assert_eq!(cow.byte_size(), 4);
	}
}
