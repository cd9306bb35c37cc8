//! Concurrency primitives used by the sinks

pub mod object_pool;
pub mod thread_pool;

pub use object_pool::{ObjectPool, Pooled};
pub use thread_pool::{Job, ThreadPool};
