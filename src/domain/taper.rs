//! Linear stem taper: diameter shrinks a fixed amount per meter from the root.

/// Converts a nominal length in millimeters to meters.
pub fn mm_to_m(length_mm: u32) -> f64 {
    f64::from(length_mm) / 1000.0
}

/// Linear diameter-over-height model of a standing tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaperModel {
    /// Diameter loss in millimeters per meter of stem
    reduction_per_meter: f64,
}

impl TaperModel {
    pub fn new(reduction_per_meter: f64) -> Self {
        Self {
            reduction_per_meter,
        }
    }

    /// Diameter `distance_m` meters above the root, truncated toward zero.
    ///
    /// Truncation (not rounding) is part of the output contract. Negative
    /// results clamp to zero.
    pub fn diameter_at(&self, root_diameter: f64, distance_m: f64) -> u32 {
        let d = root_diameter - distance_m * self.reduction_per_meter;
        if d <= 0.0 {
            0
        } else {
            d.trunc() as u32
        }
    }

    /// Root diameter needed to measure `target_diameter` at `distance_m` meters.
    pub fn required_root_diameter(&self, target_diameter: f64, distance_m: f64) -> f64 {
        target_diameter + distance_m * self.reduction_per_meter
    }
}
