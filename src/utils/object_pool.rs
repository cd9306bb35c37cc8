//! Pool of reusable objects that grows on demand and never blocks

use parking_lot::Mutex;
use std::fmt;
use std::ops::{Deref, DerefMut};

struct PoolState<T> {
    available: Vec<T>,
    capacity: usize,
}

/// Objects checked out with [`ObjectPool::get`] return to the pool when
/// their guard drops. The guard borrows the pool, so a pool cannot go away
/// while any of its objects is in use.
///
/// ```
/// use slogpp::utils::ObjectPool;
///
/// let pool: ObjectPool<String> = ObjectPool::new();
/// {
///     let mut buffer = pool.get();
///     buffer.push_str("reused");
/// }
/// assert_eq!(pool.available(), 1);
/// assert_eq!(pool.get().as_str(), "reused");
/// ```
pub struct ObjectPool<T> {
    state: Mutex<PoolState<T>>,
}

impl<T: Default> ObjectPool<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(PoolState {
                available: Vec::new(),
                capacity: 0,
            }),
        }
    }

    /// Make sure at least `capacity` objects exist.
    pub fn reserve(&self, capacity: usize) {
        let mut state = self.state.lock();
        while state.capacity < capacity {
            state.available.push(T::default());
            state.capacity += 1;
        }
    }

    /// Check out an object, creating one when none is available.
    pub fn get(&self) -> Pooled<'_, T> {
        let reused = self.state.lock().available.pop();
        let value = match reused {
            Some(value) => value,
            None => {
                let value = T::default();
                self.state.lock().capacity += 1;
                value
            }
        };
        Pooled {
            pool: self,
            value: Some(value),
        }
    }
}

impl<T> ObjectPool<T> {
    /// Objects currently idle in the pool.
    pub fn available(&self) -> usize {
        self.state.lock().available.len()
    }

    /// Objects ever created by the pool.
    pub fn capacity(&self) -> usize {
        self.state.lock().capacity
    }

    fn give_back(&self, value: T) {
        self.state.lock().available.push(value);
    }
}

impl<T: Default> Default for ObjectPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ObjectPool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ObjectPool")
            .field("available", &state.available.len())
            .field("capacity", &state.capacity)
            .finish()
    }
}

/// An object checked out of an [`ObjectPool`].
pub struct Pooled<'a, T> {
    pool: &'a ObjectPool<T>,
    value: Option<T>,
}

impl<T> Deref for Pooled<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // Only taken in drop.
        match &self.value {
            Some(value) => value,
            None => unreachable!("pooled object used after release"),
        }
    }
}

impl<T> DerefMut for Pooled<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        match &mut self.value {
            Some(value) => value,
            None => unreachable!("pooled object used after release"),
        }
    }
}

impl<T> Drop for Pooled<'_, T> {
    fn drop(&mut self) {
        if let Some(value) = self.value.take() {
            self.pool.give_back(value);
        }
    }
}
