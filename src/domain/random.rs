//! Random source used by randomized bucking.
//!
//! The domain only sees this trait; the rand-backed implementation lives in
//! the infrastructure layer.

/// Source of uniformly distributed integers.
pub trait RandomSource {
    /// Next integer in the inclusive range `[min, max]`.
    fn next_in_range(&mut self, min: u32, max: u32) -> u32;
}

/// Replays a fixed sequence, clamped into the requested range.
///
/// Cycles when exhausted. An empty sequence always yields `min`.
#[derive(Debug, Clone, Default)]
pub struct SequenceRandom {
    values: Vec<u32>,
    cursor: usize,
}

impl SequenceRandom {
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, cursor: 0 }
    }
}

impl RandomSource for SequenceRandom {
    fn next_in_range(&mut self, min: u32, max: u32) -> u32 {
        if self.values.is_empty() {
            return min;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value.clamp(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_sequence_when_exhausted_then_cycles_and_clamps() {
        let mut rng = SequenceRandom::new(vec![42, 99]);
        assert_eq!(rng.next_in_range(40, 50), 42);
        assert_eq!(rng.next_in_range(40, 50), 50);
        assert_eq!(rng.next_in_range(40, 50), 42);
    }

    #[test]
    fn given_empty_sequence_when_drawing_then_returns_min() {
        let mut rng = SequenceRandom::default();
        assert_eq!(rng.next_in_range(40, 50), 40);
    }
}
