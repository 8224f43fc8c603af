#![doc = include_str!("../README.md")]

mod builder;
mod cache;
mod list;
mod metrics;
mod traits;

pub use builder::CacheBuilder;
pub use cache::{Cache, EvictionHandler};
pub use list::Iter;
pub use metrics::CacheMetrics;
pub use traits::ByteSize;
