//! Merged, per-length-class sorted log stock.

use std::collections::VecDeque;

use itertools::Itertools;

use crate::domain::entities::{LengthClass, Log};

/// All available logs split by length class, thickest first.
///
/// Sorting is stable, so existing logs (merged first) win ties against
/// newly cut logs of the same diameter.
#[derive(Debug, Clone, Default)]
pub struct LogPool {
    long: VecDeque<Log>,
    short: VecDeque<Log>,
}

impl LogPool {
    pub fn new<'a>(existing: &'a [Log], new: impl IntoIterator<Item = &'a Log>) -> Self {
        let (long, short): (Vec<Log>, Vec<Log>) = existing
            .iter()
            .chain(new)
            .copied()
            .partition(Log::is_long);

        Self {
            long: sorted_desc(long),
            short: sorted_desc(short),
        }
    }

    pub fn remaining(&self, class: LengthClass) -> usize {
        match class {
            LengthClass::Long => self.long.len(),
            LengthClass::Short => self.short.len(),
        }
    }

    /// Remove and return the two thickest logs of `class`, if there are two.
    pub fn take_pair(&mut self, class: LengthClass) -> Option<[Log; 2]> {
        let queue = match class {
            LengthClass::Long => &mut self.long,
            LengthClass::Short => &mut self.short,
        };
        if queue.len() < 2 {
            return None;
        }
        let first = queue.pop_front()?;
        let second = queue.pop_front()?;
        Some([first, second])
    }
}

fn sorted_desc(logs: Vec<Log>) -> VecDeque<Log> {
    logs.into_iter()
        .sorted_by(|a, b| b.diameter.cmp(&a.diameter))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_mixed_logs_when_pooling_then_partitions_and_sorts_descending() {
        let existing = [Log::long(250), Log::short(280), Log::long(270)];
        let new = [Log::short(300), Log::long(260)];
        let mut pool = LogPool::new(&existing, &new);

        assert_eq!(pool.remaining(LengthClass::Long), 3);
        assert_eq!(pool.remaining(LengthClass::Short), 2);
        assert_eq!(
            pool.take_pair(LengthClass::Long),
            Some([Log::long(270), Log::long(260)])
        );
        assert_eq!(
            pool.take_pair(LengthClass::Short),
            Some([Log::short(300), Log::short(280)])
        );
        assert_eq!(pool.take_pair(LengthClass::Long), None);
        assert_eq!(pool.remaining(LengthClass::Long), 1);
    }

    #[test]
    fn given_empty_sources_when_pooling_then_nothing_to_take() {
        let mut pool = LogPool::new(&[], std::iter::empty());
        assert_eq!(pool.take_pair(LengthClass::Short), None);
    }
}
