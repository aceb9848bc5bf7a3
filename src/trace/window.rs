//! Bounded sliding window of (x, y) pairs backing the live trace.

use crate::{Error, Result};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A fixed-capacity, oldest-first-evicting buffer of (x, y) pairs.
///
/// `append` and `snapshot` are mutually exclusive, so a renderer running on
/// a different schedule from the tick source always reads a consistent
/// sequence.
///
/// # Examples
///
/// ```
/// use lissajous::SlidingWindowBuffer;
///
/// let window = SlidingWindowBuffer::new(3).unwrap();
/// for i in 1..=4 {
///     window.append(i as f64, i as f64);
/// }
/// assert_eq!(window.snapshot(), vec![(2.0, 2.0), (3.0, 3.0), (4.0, 4.0)]);
/// ```
#[derive(Debug)]
pub struct SlidingWindowBuffer {
    points: Mutex<VecDeque<(f64, f64)>>,
    capacity: usize,
}

impl SlidingWindowBuffer {
    /// Creates an empty window holding at most `capacity` pairs.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidArgument(
                "live trace capacity must be positive".into(),
            ));
        }
        Ok(Self {
            // One spare slot: the push happens before the eviction.
            points: Mutex::new(VecDeque::with_capacity(capacity + 1)),
            capacity,
        })
    }

    /// Appends a pair, evicting the single oldest one if the window overflows.
    pub fn append(&self, x: f64, y: f64) {
        let mut points = self.lock();
        points.push_back((x, y));
        if points.len() > self.capacity {
            points.pop_front();
        }
    }

    /// Ordered copy of the window, oldest first.
    pub fn snapshot(&self) -> Vec<(f64, f64)> {
        self.lock().iter().copied().collect()
    }

    /// Most recently appended pair.
    pub fn latest(&self) -> Option<(f64, f64)> {
        self.lock().back().copied()
    }

    /// Maximum number of pairs retained.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of pairs currently held.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if nothing has been appended since creation or the last
    /// clear.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drops every pair.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<(f64, f64)>> {
        self.points.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            SlidingWindowBuffer::new(0),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_fills_up_to_capacity() {
        let window = SlidingWindowBuffer::new(4).unwrap();
        assert!(window.is_empty());
        assert_eq!(window.latest(), None);

        window.append(1.0, -1.0);
        window.append(2.0, -2.0);
        assert_eq!(window.len(), 2);
        assert_eq!(window.snapshot(), vec![(1.0, -1.0), (2.0, -2.0)]);
        assert_eq!(window.latest(), Some((2.0, -2.0)));
    }

    #[test]
    fn test_capacity_one() {
        let window = SlidingWindowBuffer::new(1).unwrap();
        window.append(1.0, 1.0);
        window.append(2.0, 3.0);
        assert_eq!(window.snapshot(), vec![(2.0, 3.0)]);
    }

    #[test]
    fn test_keeps_last_capacity_pairs() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let capacity = rng.gen_range(1..40);
            let count = rng.gen_range(capacity + 1..200);
            let window = SlidingWindowBuffer::new(capacity).unwrap();

            let appended: Vec<(f64, f64)> = (0..count)
                .map(|_| (rng.gen_range(-100.0..100.0), rng.gen_range(-100.0..100.0)))
                .collect();
            for &(x, y) in &appended {
                window.append(x, y);
                assert!(window.len() <= capacity);
            }

            assert_eq!(window.len(), capacity);
            assert_eq!(window.snapshot(), appended[count - capacity..].to_vec());
        }
    }

    #[test]
    fn test_clear() {
        let window = SlidingWindowBuffer::new(2).unwrap();
        window.append(1.0, 1.0);
        window.clear();
        assert!(window.is_empty());
        window.append(5.0, 6.0);
        assert_eq!(window.snapshot(), vec![(5.0, 6.0)]);
        assert_eq!(window.capacity(), 2);
    }

    #[test]
    fn test_concurrent_snapshots_are_consistent() {
        let window = Arc::new(SlidingWindowBuffer::new(16).unwrap());
        let writer = {
            let window = window.clone();
            thread::spawn(move || {
                for i in 0..10_000 {
                    window.append(i as f64, -(i as f64));
                }
            })
        };

        for _ in 0..1_000 {
            let snapshot = window.snapshot();
            assert!(snapshot.len() <= 16);
            for pair in snapshot.windows(2) {
                assert_eq!(pair[1].0, pair[0].0 + 1.0);
            }
            for (x, y) in snapshot {
                assert_eq!(y, -x);
            }
        }
        writer.join().unwrap();
        assert_eq!(window.latest(), Some((9_999.0, -9_999.0)));
    }
}
