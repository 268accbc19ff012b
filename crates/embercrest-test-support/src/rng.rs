//! Test RNG — deterministic `DeterministicRng` implementations for tests.

use embercrest_core::rng::DeterministicRng;

/// An RNG that always returns `min` for `next_u32_range` and `0.0` for
/// `next_f64`. Every percentage roll made through it succeeds and every
/// yield roll produces its minimum.
#[derive(Debug)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_u32_range(&mut self, min: u32, _max: u32) -> u32 {
        min
    }

    fn next_f64(&mut self) -> f64 {
        0.0
    }
}

/// An RNG that always returns `max` for `next_u32_range` and the largest
/// `f64` below `1.0` for `next_f64`. Every percentage roll below 100% made
/// through it fails and every yield roll produces its maximum.
#[derive(Debug)]
pub struct MaxRng;

impl DeterministicRng for MaxRng {
    fn next_u32_range(&mut self, _min: u32, max: u32) -> u32 {
        max
    }

    fn next_f64(&mut self) -> f64 {
        1.0 - f64::EPSILON
    }
}

/// An RNG that returns values from a predetermined sequence. Panics if the
/// sequence is exhausted. Used in tests that need specific, repeatable random
/// outcomes (e.g., an exact essence yield).
#[derive(Debug)]
pub struct SequenceRng {
    values: Vec<u32>,
    index: usize,
}

impl SequenceRng {
    /// Create a new `SequenceRng` with the given values.
    #[must_use]
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, index: 0 }
    }

    /// Number of values consumed so far.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.index
    }
}

impl DeterministicRng for SequenceRng {
    fn next_u32_range(&mut self, _min: u32, _max: u32) -> u32 {
        let val = self.values[self.index];
        self.index += 1;
        val
    }

    fn next_f64(&mut self) -> f64 {
        0.0
    }
}
