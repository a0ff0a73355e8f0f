//! Earliest impulse onset across the whole dataset.

use crate::error::{Error, Result};

/// Find the minimum peak location over every stored impulse response.
///
/// Each of the `measurements * receivers` windows of `samples` values is scanned for the
/// window-relative index of its largest-magnitude sample (first occurrence wins a tie);
/// the result is the smallest such index anywhere in the dataset.  Callers use it as a
/// truncation hint; nothing here truncates.  An all-zero window peaks at index 0, which
/// is as conservative as a hint can be.
pub(crate) fn min_onset_delay(
    impulse_responses: &[f64],
    measurements: usize,
    receivers: usize,
    samples: usize,
) -> Result<usize> {
    if measurements == 0 {
        return Err(Error::EmptyMeasurementSet);
    }
    debug_assert!(samples > 0);
    debug_assert_eq!(impulse_responses.len(), measurements * receivers * samples);

    let mut min_delay = samples;
    for window in impulse_responses.chunks_exact(samples) {
        let mut peak = 0.0f64;
        let mut location = 0;
        for (i, &sample) in window.iter().enumerate() {
            if sample.abs() > peak {
                peak = sample.abs();
                location = i;
            }
        }
        min_delay = min_delay.min(location);
    }

    Ok(min_delay)
}

#[cfg(test)]
mod tests {
    use super::*;

    // One measurement, one receiver, peak at index 3.
    #[test]
    fn finds_the_peak() {
        let ir = [0.0, 0.1, -0.2, 0.9, 0.3, 0.0];
        assert_eq!(min_onset_delay(&ir, 1, 1, 6).unwrap(), 3);
    }

    #[test]
    fn negative_peaks_count() {
        let ir = [0.0, 0.1, -0.9, 0.3];
        assert_eq!(min_onset_delay(&ir, 1, 1, 4).unwrap(), 2);
    }

    #[test]
    fn minimum_is_taken_across_measurements() {
        // m0 peaks at 3, m1 peaks at 1.
        let ir = [0.0, 0.1, 0.2, 0.9, 0.0, 0.8, 0.1, 0.2];
        assert_eq!(min_onset_delay(&ir, 2, 1, 4).unwrap(), 1);
    }

    #[test]
    fn every_receiver_channel_is_scanned() {
        // m0r0 peaks at 3, m0r1 peaks at 0.
        let ir = [0.0, 0.1, 0.2, 0.9, 0.7, 0.1, 0.2, 0.3];
        assert_eq!(min_onset_delay(&ir, 1, 2, 4).unwrap(), 0);
    }

    #[test]
    fn ties_keep_the_first_occurrence() {
        let ir = [0.0, 0.5, 0.5, 0.0];
        assert_eq!(min_onset_delay(&ir, 1, 1, 4).unwrap(), 1);
    }

    #[test]
    fn silence_reports_zero() {
        let ir = [0.0; 8];
        assert_eq!(min_onset_delay(&ir, 2, 1, 4).unwrap(), 0);
    }

    #[test]
    fn no_measurements_is_an_error() {
        assert!(matches!(
            min_onset_delay(&[], 0, 2, 4),
            Err(Error::EmptyMeasurementSet)
        ));
    }
}
