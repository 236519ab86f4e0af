use std::{fmt, str::FromStr};

use tracing::{debug, warn};

use crate::{error::ParseThresholdError, types::Mask};

/// Cutoff separating foreground from background.
///
/// Integer literals are percentages (`0..=100`), float literals are
/// probabilities (`0.0..=1.0`). Either is converted to the value range the
/// mask is actually encoded in before it is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Threshold {
    Percent(i32),
    Probability(f32),
}

impl Threshold {
    /// Cutoff expressed in the mask's own value range.
    pub fn cutoff_for(self, percentage_mask: bool) -> f32 {
        match (self, percentage_mask) {
            (Threshold::Percent(p), true) => p as f32,
            (Threshold::Percent(p), false) => p as f32 / 100.0,
            (Threshold::Probability(q), true) => q * 100.0,
            (Threshold::Probability(q), false) => q,
        }
    }
}

impl FromStr for Threshold {
    type Err = ParseThresholdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let literal = s.trim();
        let parsed = if literal.contains(['.', 'e', 'E']) {
            literal.parse::<f32>().ok().filter(|q| q.is_finite()).map(Threshold::Probability)
        } else {
            literal.parse::<i32>().ok().map(Threshold::Percent)
        };
        parsed.ok_or_else(|| ParseThresholdError(s.to_string()))
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Threshold::Percent(p) => write!(f, "{p}%"),
            Threshold::Probability(q) => write!(f, "{q}"),
        }
    }
}

/// Binarize the mask in place: cells below `cutoff` become 0, the others 1.
///
/// NaN cells become 0. A mask that has already been binarized is left
/// untouched, so repeated application yields the same binary map; a
/// different cutoff on a binarized mask is ignored with a warning.
pub fn apply_threshold(mask: &mut Mask, cutoff: f32) {
    if let Some(previous) = mask.binarization_cutoff() {
        if previous == cutoff {
            debug!("mask already binarized, skipping threshold {cutoff}");
        } else {
            warn!(previous, ignored = cutoff, "mask already binarized with another cutoff");
        }
        return;
    }
    for pixel in mask.grid_mut().pixels_mut() {
        let value = pixel.0[0];
        pixel.0[0] = if !value.is_nan() && value >= cutoff { 1.0 } else { 0.0 };
    }
    mask.mark_binarized(cutoff);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_of(values: Vec<f32>, percentage: bool) -> Mask {
        Mask::from_values(2, 2, values, percentage).expect("2x2 mask")
    }

    #[test]
    fn test_cells_at_cutoff_are_foreground() {
        let mut mask = mask_of(vec![10.0, 49.9, 50.0, 100.0], true);
        apply_threshold(&mut mask, 50.0);
        let values: Vec<f32> = mask.grid().pixels().map(|p| p.0[0]).collect();
        assert_eq!(values, vec![0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_nan_becomes_background() {
        let mut mask = mask_of(vec![f32::NAN, 0.9, 0.1, f32::NAN], false);
        apply_threshold(&mut mask, -1.0);
        let values: Vec<f32> = mask.grid().pixels().map(|p| p.0[0]).collect();
        assert_eq!(values, vec![0.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_threshold_is_idempotent() {
        for cutoff in [-1.0, 0.0, 0.5, 50.0, 100.0] {
            let mut once = mask_of(vec![0.0, 25.0, 50.0, 100.0], true);
            apply_threshold(&mut once, cutoff);
            let mut twice = once.clone();
            apply_threshold(&mut twice, cutoff);
            assert_eq!(once.grid(), twice.grid(), "cutoff {cutoff}");
        }
    }

    #[test]
    fn test_first_cutoff_wins() {
        let mut mask = mask_of(vec![0.0, 25.0, 50.0, 100.0], true);
        apply_threshold(&mut mask, 50.0);
        apply_threshold(&mut mask, 10.0);
        assert_eq!(mask.binarization_cutoff(), Some(50.0));
        let values: Vec<f32> = mask.grid().pixels().map(|p| p.0[0]).collect();
        assert_eq!(values, vec![0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_parse_threshold_literals() {
        assert_eq!("50".parse::<Threshold>(), Ok(Threshold::Percent(50)));
        assert_eq!("-1".parse::<Threshold>(), Ok(Threshold::Percent(-1)));
        assert_eq!("0.35".parse::<Threshold>(), Ok(Threshold::Probability(0.35)));
        assert!("half".parse::<Threshold>().is_err());
        assert!("NaN.".parse::<Threshold>().is_err());
    }

    #[test]
    fn test_cutoff_follows_mask_encoding() {
        assert_eq!(Threshold::Percent(40).cutoff_for(true), 40.0);
        assert!((Threshold::Percent(40).cutoff_for(false) - 0.4).abs() < 1e-6);
        assert!((Threshold::Probability(0.4).cutoff_for(true) - 40.0).abs() < 1e-4);
        assert_eq!(Threshold::Probability(0.4).cutoff_for(false), 0.4);
    }
}
