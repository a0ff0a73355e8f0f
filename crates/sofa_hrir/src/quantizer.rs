//! Coordinate quantization.
//!
//! Measured coordinates carry floating point noise: the same nominal direction may be
//! stored as `89.999999` in one dataset and `90.000001` in another.  Every coordinate is
//! therefore rounded onto a fixed tolerance grid before it is used as a lookup key, so
//! that near-equal values collapse to one canonical bucket.

/// Rounds coordinates onto a grid of `epsilon`-spaced buckets.
///
/// Rounding is half-away-from-zero: shift by half a tolerance toward the value's sign,
/// then truncate in units of `epsilon`.  The integer tick count from that truncation
/// ([Quantizer::key]) is what goes into hash maps; the dequantized bucket value is only
/// materialized for reporting.  Keys compare exactly, so two coordinates land in the same
/// map slot iff they quantize to the same bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantizer {
    epsilon: f64,
}

impl Default for Quantizer {
    fn default() -> Self {
        Self { epsilon: 0.1 }
    }
}

impl Quantizer {
    /// A quantizer with the given tolerance.
    ///
    /// # Panics
    ///
    /// Panics unless `epsilon` is positive; a zero or negative tolerance cannot define a
    /// bucket grid.
    pub fn new(epsilon: f64) -> Self {
        assert!(epsilon > 0.0, "tolerance must be positive");
        Self { epsilon }
    }

    /// The bucket `x` falls into, as a signed count of `epsilon`-sized ticks from zero.
    pub fn key(&self, x: f64) -> i64 {
        let shifted = if x > 0.0 {
            x + self.epsilon / 2.0
        } else {
            x - self.epsilon / 2.0
        };
        (shifted / self.epsilon) as i64
    }

    /// The canonical bucket value for `x`: the nearest multiple of `epsilon`.
    pub fn bucket(&self, x: f64) -> f64 {
        self.value_of(self.key(x))
    }

    /// Dequantize a tick count back to its bucket value.
    pub fn value_of(&self, key: i64) -> f64 {
        key as f64 * self.epsilon
    }

    /// Azimuth key normalized into `(-180, 180]`.
    ///
    /// The convention stores azimuths in `[0, 360)`; anything past the half turn wraps to
    /// the negative side.  Normalization happens after quantization, in exact tick
    /// arithmetic, so the build and query paths can never disagree about which side of
    /// the seam a value sits on.
    pub fn azimuth_key(&self, theta: f64) -> i64 {
        let half_turn = self.key(180.0);
        let key = self.key(theta);
        if key > half_turn {
            key - 2 * half_turn
        } else {
            key
        }
    }
}
