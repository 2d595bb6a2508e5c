//! Injectable randomness for speaker selection.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Source of uniform choices.
///
/// Implementations must return an index below `len`; `len` is never zero.
pub trait RandomSource: Send + Sync {
    /// Pick an index in `0..len`.
    fn pick_index(&self, len: usize) -> usize;
}

/// Thread-local entropy.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick_index(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Reproducible choices from a fixed seed.
///
/// # Examples
///
/// ```
/// use writers_room_narrative::{RandomSource, SeededRandom};
///
/// let a = SeededRandom::new(7);
/// let b = SeededRandom::new(7);
/// let first: Vec<usize> = (0..5).map(|_| a.pick_index(10)).collect();
/// let second: Vec<usize> = (0..5).map(|_| b.pick_index(10)).collect();
/// assert_eq!(first, second);
/// ```
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    /// Seed a new source.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick_index(&self, len: usize) -> usize {
        self.rng.lock().gen_range(0..len)
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
///
/// Each draw is reduced modulo `len`. An empty list always yields 0.
///
/// # Examples
///
/// ```
/// use writers_room_narrative::{RandomSource, SequenceRandom};
///
/// let source = SequenceRandom::new([1, 0]);
/// assert_eq!(source.pick_index(3), 1);
/// assert_eq!(source.pick_index(3), 0);
/// assert_eq!(source.pick_index(3), 1);
/// ```
#[derive(Debug)]
pub struct SequenceRandom {
    draws: Mutex<VecDeque<usize>>,
}

impl SequenceRandom {
    /// Replay `draws` in order.
    pub fn new(draws: impl IntoIterator<Item = usize>) -> Self {
        Self {
            draws: Mutex::new(draws.into_iter().collect()),
        }
    }
}

impl RandomSource for SequenceRandom {
    fn pick_index(&self, len: usize) -> usize {
        let mut draws = self.draws.lock();
        match draws.pop_front() {
            Some(draw) => {
                draws.push_back(draw);
                draw % len
            }
            None => 0,
        }
    }
}
