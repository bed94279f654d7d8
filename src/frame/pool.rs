//! Bounded pool of frame slots.
//!
//! At most `capacity` frames may be recorded or executing on the GPU at
//! once. Free slot indices travel through a bounded channel that acts as a
//! counting semaphore; a [`FrameSlot`] lease returns its index when it is
//! released or dropped, which may happen on whatever thread runs the GPU
//! completion callback.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError};
use std::sync::Arc;

/// Pool of `capacity` frame slots indexed `0..capacity`.
#[derive(Debug)]
pub struct FramePool {
    free_tx: SyncSender<usize>,
    free_rx: Receiver<usize>,
    outstanding: Arc<AtomicUsize>,
    capacity: usize,
}

impl FramePool {
    /// Create a pool with every slot free. A capacity of zero is raised to
    /// one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (free_tx, free_rx) = mpsc::sync_channel(capacity);
        for index in 0..capacity {
            // Channel holds exactly `capacity` entries, so this cannot block.
            let _ = free_tx.try_send(index);
        }
        Self {
            free_tx,
            free_rx,
            outstanding: Arc::new(AtomicUsize::new(0)),
            capacity,
        }
    }

    /// Number of slots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slots currently leased out.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.outstanding.load(Ordering::Acquire)
    }

    /// Take a free slot without waiting.
    #[must_use]
    pub fn try_acquire(&self) -> Option<FrameSlot> {
        match self.free_rx.try_recv() {
            Ok(index) => {
                let _ = self.outstanding.fetch_add(1, Ordering::AcqRel);
                Some(FrameSlot {
                    index,
                    free_tx: self.free_tx.clone(),
                    outstanding: Arc::clone(&self.outstanding),
                    released: false,
                })
            }
            // The pool owns a sender, so the channel never disconnects.
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Take a free slot, calling `pump` between attempts until one is
    /// released. Waits indefinitely.
    ///
    /// `pump` is what drives releases forward; for GPU frames it polls the
    /// device so completion callbacks get a chance to run.
    pub fn acquire_with(&self, mut pump: impl FnMut()) -> FrameSlot {
        loop {
            if let Some(slot) = self.try_acquire() {
                return slot;
            }
            pump();
        }
    }
}

/// Lease on one frame slot.
///
/// `Send`, so it can move into a GPU completion callback. Released exactly
/// once, either explicitly or on drop.
#[derive(Debug)]
pub struct FrameSlot {
    index: usize,
    free_tx: SyncSender<usize>,
    outstanding: Arc<AtomicUsize>,
    released: bool,
}

impl FrameSlot {
    /// Slot index in `0..capacity`.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Return the slot to the pool.
    pub fn release(mut self) {
        self.give_back();
    }

    fn give_back(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        // Decrement before the index becomes visible to acquirers so the
        // counter never exceeds capacity.
        let _ = self.outstanding.fetch_sub(1, Ordering::AcqRel);
        // Full is impossible (one entry per slot); disconnected means the
        // pool is gone and nobody is waiting.
        let _ = self.free_tx.try_send(self.index);
    }
}

impl Drop for FrameSlot {
    fn drop(&mut self) {
        self.give_back();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;
    use std::thread;
    use std::time::Duration;

    use super::*;

    #[test]
    fn slots_rotate_in_order() {
        let pool = FramePool::new(3);
        let order: Vec<_> = (0..4)
            .map(|_| {
                let slot = pool.try_acquire().unwrap();
                let index = slot.index();
                slot.release();
                index
            })
            .collect();
        assert_eq!(order, vec![0, 1, 2, 0]);
        assert_eq!(pool.in_flight(), 0);
    }

    #[test]
    fn exhausted_pool_refuses_until_release() {
        let pool = FramePool::new(3);
        let slots: Vec<_> =
            (0..3).map(|_| pool.try_acquire().unwrap()).collect();
        assert_eq!(pool.in_flight(), 3);
        assert!(pool.try_acquire().is_none());

        drop(slots);
        assert_eq!(pool.in_flight(), 0);
        assert!(pool.try_acquire().is_some());
    }

    #[test]
    fn acquire_with_pumps_until_release() {
        let pool = FramePool::new(1);
        let held = pool.try_acquire().unwrap();
        let mut held = Some(held);
        let mut pumps = 0;
        let slot = pool.acquire_with(|| {
            pumps += 1;
            if pumps == 3 {
                drop(held.take());
            }
        });
        assert_eq!(pumps, 3);
        assert_eq!(slot.index(), 0);
        assert_eq!(pool.in_flight(), 1);
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let pool = FramePool::new(0);
        assert_eq!(pool.capacity(), 1);
        assert!(pool.try_acquire().is_some());
    }

    #[test]
    fn releases_from_other_threads_bound_outstanding_frames() {
        const FRAMES: usize = 200;
        let pool = FramePool::new(3);
        let busy: Arc<Vec<AtomicBool>> =
            Arc::new((0..3).map(|_| AtomicBool::new(false)).collect());
        let peak = Arc::new(AtomicUsize::new(0));
        let mut workers = Vec::with_capacity(FRAMES);

        for frame in 0..FRAMES {
            let slot = pool.acquire_with(thread::yield_now);
            let in_flight = pool.in_flight();
            assert!(in_flight <= 3, "{in_flight} frames in flight");
            let _ = peak.fetch_max(in_flight, Ordering::Relaxed);
            // No two outstanding frames may share a slot.
            assert!(!busy[slot.index()].swap(true, Ordering::AcqRel));

            let busy = Arc::clone(&busy);
            workers.push(thread::spawn(move || {
                thread::sleep(Duration::from_micros((frame % 7) as u64 * 50));
                busy[slot.index()].store(false, Ordering::Release);
                slot.release();
            }));
        }

        for worker in workers {
            worker.join().unwrap();
        }
        assert_eq!(pool.in_flight(), 0);
        assert!(peak.load(Ordering::Relaxed) <= 3);
    }
}
