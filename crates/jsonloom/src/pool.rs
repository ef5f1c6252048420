//! The shared scratch-buffer pool.
//!
//! Array-like decoders and the async façade rent growable buffers here
//! instead of allocating per operation. Buffers are kept in per-type
//! free lists keyed by `TypeId`; a [`Scratch`] lease returns its buffer on
//! drop, so every exit path — including a child formatter failing mid-array —
//! restores the pool to its pre-operation state.

use std::any::{Any, TypeId};
use std::mem;
use std::sync::OnceLock;

use dashmap::DashMap;

/// Retained buffers per free list. Beyond this the returned buffer is simply
/// dropped.
const MAX_RETAINED: usize = 32;

#[derive(Default)]
struct Slot {
    free: Vec<Box<dyn Any + Send + Sync>>,
    outstanding: isize,
}

fn table() -> &'static DashMap<TypeId, Slot> {
    static POOL: OnceLock<DashMap<TypeId, Slot>> = OnceLock::new();
    POOL.get_or_init(DashMap::new)
}

fn acquire<T: Send + Sync + 'static>(min_capacity: usize) -> Vec<T> {
    let mut buf: Vec<T> = {
        let mut slot = table().entry(TypeId::of::<Vec<T>>()).or_default();
        slot.free
            .pop()
            .and_then(|boxed| boxed.downcast::<Vec<T>>().ok())
            .map_or_else(Vec::new, |boxed| *boxed)
    };
    if buf.capacity() < min_capacity {
        buf.reserve(min_capacity);
    }
    buf
}

fn restock<T: Send + Sync + 'static>(mut buf: Vec<T>) {
    buf.clear();
    if buf.capacity() == 0 {
        return;
    }
    let mut slot = table().entry(TypeId::of::<Vec<T>>()).or_default();
    if slot.free.len() < MAX_RETAINED {
        slot.free.push(Box::new(buf));
    }
}

/// Rent a buffer with at least `min_capacity` slots. The pool may hand back
/// a larger buffer; the extra capacity is simply available to the lease.
pub(crate) fn rent<T: Send + Sync + 'static>(min_capacity: usize) -> Scratch<T> {
    {
        let mut slot = table().entry(TypeId::of::<Vec<T>>()).or_default();
        slot.outstanding += 1;
    }
    Scratch {
        buf: acquire(min_capacity),
    }
}

/// Leases currently out of the pool for element type `T`. Test probe for
/// pool hygiene.
pub(crate) fn outstanding<T: Send + Sync + 'static>() -> isize {
    table()
        .get(&TypeId::of::<Vec<T>>())
        .map_or(0, |slot| slot.outstanding)
}

/// An exclusive lease on a pooled buffer. Returns the buffer on drop.
#[derive(Debug)]
pub(crate) struct Scratch<T: Send + Sync + 'static> {
    buf: Vec<T>,
}

impl<T: Send + Sync + 'static> Scratch<T> {
    pub(crate) fn is_full(&self) -> bool {
        self.buf.len() == self.buf.capacity()
    }

    pub(crate) fn push(&mut self, value: T) {
        self.buf.push(value);
    }

    /// Double the capacity through the pool: rent a bigger buffer, move the
    /// elements over, hand the old allocation back.
    pub(crate) fn grow(&mut self) {
        let mut next = acquire::<T>(self.buf.capacity().max(2) * 2);
        next.extend(self.buf.drain(..));
        restock(mem::replace(&mut self.buf, next));
    }

    /// Move the elements into a fresh, exactly-sized vector.
    pub(crate) fn take_all(&mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.buf.len());
        out.extend(self.buf.drain(..));
        out
    }

    /// Direct access for the façade's chunked-fill paths.
    pub(crate) fn vec_mut(&mut self) -> &mut Vec<T> {
        &mut self.buf
    }

    pub(crate) fn as_slice(&self) -> &[T] {
        &self.buf
    }
}

impl<T: Send + Sync + 'static> Drop for Scratch<T> {
    fn drop(&mut self) {
        {
            let mut slot = table().entry(TypeId::of::<Vec<T>>()).or_default();
            slot.outstanding -= 1;
        }
        restock(mem::take(&mut self.buf));
    }
}

#[cfg(test)]
mod tests {
    use super::{outstanding, rent};

    // Local element type so parallel tests cannot disturb the counters.
    #[derive(Debug, PartialEq)]
    struct Marker(u64);

    #[test]
    fn leases_return_on_drop_and_reuse_capacity() {
        let baseline = outstanding::<Marker>();
        {
            let mut lease = rent::<Marker>(4);
            assert!(outstanding::<Marker>() > baseline);
            lease.push(Marker(1));
            lease.push(Marker(2));
            assert_eq!(lease.take_all(), vec![Marker(1), Marker(2)]);
        }
        assert_eq!(outstanding::<Marker>(), baseline);

        let lease = rent::<Marker>(1);
        assert!(lease.as_slice().is_empty());
        assert!(lease.buf.capacity() >= 1);
    }

    #[test]
    fn growth_doubles_and_keeps_elements() {
        let mut lease = rent::<u64>(4);
        while !lease.is_full() {
            lease.push(7);
        }
        let before = lease.buf.capacity();
        lease.grow();
        assert!(lease.buf.capacity() >= before * 2);
        assert!(lease.as_slice().iter().all(|&v| v == 7));
    }
}
