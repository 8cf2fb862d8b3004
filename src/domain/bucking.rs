//! Bucking: dividing each felled tree into two logs.

use crate::domain::entities::{LengthClass, Log, Tree};
use crate::domain::params::{BuckingMode, ReductionRange, WallParameters};
use crate::domain::random::RandomSource;
use crate::domain::taper::{mm_to_m, TaperModel};

/// Length classes of the (root, top) logs cut from a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuckingPattern {
    ShortShort,
    LongLong,
    ShortLong,
    LongShort,
}

impl BuckingPattern {
    /// Pattern for the `index`-th tree; cycles every four trees.
    pub fn for_tree(index: usize) -> Self {
        match index % 4 {
            0 => Self::ShortShort,
            1 => Self::LongLong,
            2 => Self::ShortLong,
            _ => Self::LongShort,
        }
    }

    pub fn classes(&self) -> (LengthClass, LengthClass) {
        use LengthClass::{Long, Short};
        match self {
            Self::ShortShort => (Short, Short),
            Self::LongLong => (Long, Long),
            Self::ShortLong => (Short, Long),
            Self::LongShort => (Long, Short),
        }
    }
}

/// Cuts trees according to the configured bucking mode.
#[derive(Debug, Clone)]
pub struct TreeCutter<'a> {
    diameters: &'a [u32],
    long_length_mm: u32,
    short_length_mm: u32,
    taper: TaperModel,
    mode: BuckingMode,
    reduction: ReductionRange,
}

impl<'a> TreeCutter<'a> {
    /// `params` must have been validated (non-empty catalog).
    pub fn new(params: &'a WallParameters) -> Self {
        Self {
            diameters: &params.diameters,
            long_length_mm: params.long_length_mm,
            short_length_mm: params.short_length_mm,
            taper: TaperModel::new(params.reduction_per_meter),
            mode: params.bucking,
            reduction: params.random_reduction,
        }
    }

    fn length_of(&self, class: LengthClass) -> u32 {
        match class {
            LengthClass::Long => self.long_length_mm,
            LengthClass::Short => self.short_length_mm,
        }
    }

    fn catalog_entry(&self, index: usize) -> u32 {
        self.diameters[index % self.diameters.len()]
    }

    /// Cut the `index`-th (0-based) tree.
    ///
    /// The random source is only consulted in fixed-root mode.
    pub fn cut(&self, index: usize, rng: &mut dyn RandomSource) -> Tree {
        let (first, second) = BuckingPattern::for_tree(index).classes();
        let entry = self.catalog_entry(index);

        match self.mode {
            BuckingMode::FixedRoot => {
                let reduction = rng.next_in_range(self.reduction.min, self.reduction.max);
                Tree {
                    logs: [
                        Log::new(first, entry),
                        Log::new(second, entry.saturating_sub(reduction)),
                    ],
                    root_diameter: entry,
                }
            }
            BuckingMode::TargetMidpoint => {
                let first_len = self.length_of(first);
                let first_mid = mm_to_m(first_len) / 2.0;
                let second_mid = mm_to_m(first_len) + mm_to_m(self.length_of(second)) / 2.0;

                let root = self
                    .taper
                    .required_root_diameter(f64::from(entry), first_mid);
                Tree {
                    logs: [
                        Log::new(first, entry),
                        Log::new(second, self.taper.diameter_at(root, second_mid)),
                    ],
                    root_diameter: root.trunc() as u32,
                }
            }
        }
    }

    /// Cut trees `0..count` in order.
    pub fn cut_many(&self, count: usize, rng: &mut dyn RandomSource) -> Vec<Tree> {
        (0..count).map(|i| self.cut(i, rng)).collect()
    }
}

/// Number of trees to fell so that existing plus new logs cover `required`.
pub fn trees_needed(required_logs: usize, existing_logs: usize) -> usize {
    required_logs.saturating_sub(existing_logs).div_ceil(2)
}
