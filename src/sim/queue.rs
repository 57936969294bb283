//! Lookahead queue of upcoming ball values

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{MAX_SPAWN_VALUE, QUEUE_DEPTH};

/// FIFO of pending ball values, topped up with uniform draws from 1..=max_value
#[derive(Debug, Clone)]
pub struct LookaheadQueue {
    values: VecDeque<u32>,
    depth: usize,
    max_value: u32,
    rng: Pcg32,
}

impl LookaheadQueue {
    /// Empty queue with the default depth and range
    pub fn new(seed: u64) -> Self {
        Self::with_params(seed, QUEUE_DEPTH, MAX_SPAWN_VALUE)
    }

    pub fn with_params(seed: u64, depth: usize, max_value: u32) -> Self {
        Self {
            values: VecDeque::with_capacity(depth),
            depth,
            max_value: max_value.max(1),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Append random values until the queue holds at least `depth` entries
    pub fn refill(&mut self) {
        while self.values.len() < self.depth {
            let value = self.rng.random_range(1..=self.max_value);
            self.values.push_back(value);
        }
    }

    /// Take the front value, topping up before and after so the preview
    /// never shrinks
    pub fn take_next(&mut self) -> u32 {
        self.refill();
        // refill() guarantees at least one entry
        let value = self.values.pop_front().unwrap_or(1);
        self.refill();
        value
    }

    /// Upcoming values, front first
    pub fn iter(&self) -> impl ExactSizeIterator<Item = u32> + '_ {
        self.values.iter().copied()
    }

    pub fn front(&self) -> Option<u32> {
        self.values.front().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_refill_from_empty() {
        let mut queue = LookaheadQueue::new(7);
        assert!(queue.is_empty());
        queue.refill();
        assert_eq!(queue.len(), 4);
        assert!(queue.iter().all(|v| (1..=4).contains(&v)));
    }

    #[test]
    fn test_refill_is_idempotent_when_full() {
        let mut queue = LookaheadQueue::new(7);
        queue.refill();
        let before: Vec<u32> = queue.iter().collect();
        queue.refill();
        let after: Vec<u32> = queue.iter().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = LookaheadQueue::new(42);
        let mut b = LookaheadQueue::new(42);
        for _ in 0..20 {
            assert_eq!(a.take_next(), b.take_next());
        }
    }

    proptest! {
        #[test]
        fn prop_refill_keeps_depth_and_range(seed in any::<u64>(), takes in 0usize..50) {
            let mut queue = LookaheadQueue::new(seed);
            for _ in 0..takes {
                queue.take_next();
                prop_assert!(queue.len() >= 4);
            }
            queue.refill();
            prop_assert!(queue.len() >= 4);
            prop_assert!(queue.iter().all(|v| (1..=4).contains(&v)));
        }

        #[test]
        fn prop_take_next_is_fifo(seed in any::<u64>(), takes in 1usize..30) {
            let mut queue = LookaheadQueue::new(seed);
            queue.refill();
            for _ in 0..takes {
                let expected: Vec<u32> = queue.iter().collect();
                let taken = queue.take_next();
                prop_assert_eq!(taken, expected[0]);
                // Remaining entries shift forward unchanged
                let now: Vec<u32> = queue.iter().collect();
                prop_assert_eq!(&now[..expected.len() - 1], &expected[1..]);
            }
        }
    }
}
