// src/ticks.rs

use log::warn;

use crate::axes::{Axes, AxisKind};
use crate::error::{PlotError, Result};

/// Upper bound on ticks generated for one axis; more than this is almost
/// always a step that does not match the data range.
pub const MAX_TICKS: usize = 1000;

const AUTO_TARGET_TICKS: f64 = 8.0;
const NICE_MANTISSAS: [f64; 5] = [1.0, 2.0, 2.5, 5.0, 10.0];
const STEP_TOLERANCE: f64 = 1e-10;
/// Largest tick index still exactly representable as an `f64` (2^53).
const MAX_TICK_INDEX: f64 = 9_007_199_254_740_992.0;

/// Where major ticks go.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MajorLocator {
    /// 1/2/2.5/5 x 10^k steps chosen from the view interval.
    Auto,
    /// Every integer multiple of the step.
    Multiple(f64),
}

/// Where minor ticks go, relative to the major step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MinorLocator {
    /// 5 subdivisions for 1/5/10 steps, 4 otherwise.
    Auto,
    /// Split each major interval into this many parts.
    Divisions(usize),
    Null,
}

impl MajorLocator {
    pub fn multiple(step: f64) -> Result<Self> {
        if !(step.is_finite() && step > 0.0) {
            return Err(PlotError::InvalidArgument(format!(
                "major tick step must be positive, got {step}"
            )));
        }
        Ok(MajorLocator::Multiple(step))
    }

    pub fn step(&self, vmin: f64, vmax: f64) -> f64 {
        match *self {
            MajorLocator::Multiple(step) => step,
            MajorLocator::Auto => nice_step((vmax - vmin).abs()),
        }
    }

    pub fn ticks(&self, vmin: f64, vmax: f64) -> Vec<f64> {
        let (lo, hi) = ordered(vmin, vmax);
        let step = self.step(lo, hi);
        multiples_within(step, lo, hi)
    }
}

impl MinorLocator {
    pub fn divisions(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(PlotError::InvalidArgument(
                "minor tick divisions must be at least 1".into(),
            ));
        }
        Ok(MinorLocator::Divisions(n))
    }

    fn resolve_divisions(&self, major_step: f64) -> Option<usize> {
        match *self {
            MinorLocator::Null => None,
            MinorLocator::Divisions(n) => Some(n),
            MinorLocator::Auto => {
                let exponent = major_step.log10().floor();
                let mantissa = major_step / 10f64.powf(exponent);
                let is_one_or_five = [1.0, 5.0, 10.0]
                    .iter()
                    .any(|m| (mantissa - m).abs() < 1e-9);
                Some(if is_one_or_five { 5 } else { 4 })
            }
        }
    }

    /// Minor ticks in `[vmin, vmax]`, never coinciding with a major tick.
    pub fn ticks(&self, major_step: f64, vmin: f64, vmax: f64) -> Vec<f64> {
        let Some(n) = self.resolve_divisions(major_step) else {
            return Vec::new();
        };
        if n < 2 || !(major_step.is_finite() && major_step > 0.0) {
            return Vec::new();
        }
        let (lo, hi) = ordered(vmin, vmax);
        let minor_step = major_step / n as f64;
        let Some((first, last)) = index_span(minor_step, lo, hi, MAX_TICKS.saturating_mul(n)) else {
            return Vec::new();
        };
        (first..=last)
            .filter(|k| k.rem_euclid(n as i64) != 0)
            .map(|k| k as f64 * minor_step)
            .collect()
    }
}

/// How tick values are turned into labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickFormatter {
    /// Shortest representation after rounding to 12 significant digits.
    Auto,
    /// Fixed number of decimals.
    Decimals(usize),
}

impl TickFormatter {
    pub fn format(&self, value: f64) -> String {
        let text = match *self {
            TickFormatter::Decimals(n) => format!("{value:.n$}"),
            TickFormatter::Auto => {
                let rounded: f64 = format!("{value:.11e}").parse().unwrap_or(value);
                format!("{rounded}")
            }
        };
        strip_negative_zero(text)
    }
}

fn strip_negative_zero(text: String) -> String {
    match text.strip_prefix('-') {
        Some(rest) if rest.parse::<f64>().map(|v| v == 0.0).unwrap_or(false) => rest.to_string(),
        _ => text,
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Picks a 1/2/2.5/5 x 10^k step giving roughly `AUTO_TARGET_TICKS` ticks.
pub fn nice_step(span: f64) -> f64 {
    if !(span.is_finite() && span > 0.0) {
        return 1.0;
    }
    let raw = span / AUTO_TARGET_TICKS;
    let magnitude = 10f64.powf(raw.log10().floor());
    NICE_MANTISSAS
        .iter()
        .map(|m| m * magnitude)
        .find(|step| *step >= raw * (1.0 - STEP_TOLERANCE))
        .unwrap_or(10.0 * magnitude)
}

fn multiples_within(step: f64, lo: f64, hi: f64) -> Vec<f64> {
    if !(step.is_finite() && step > 0.0 && lo.is_finite() && hi.is_finite()) {
        return Vec::new();
    }
    match index_span(step, lo, hi, MAX_TICKS) {
        Some((first, last)) => (first..=last).map(|k| k as f64 * step).collect(),
        None => Vec::new(),
    }
}

/// Indices `first..=last` of the multiples of `step` inside `[lo, hi]`.
///
/// Counted in `f64` before any cast: `None` when there are no multiples, more
/// than `limit` of them, or the indices are too large to be exact.
fn index_span(step: f64, lo: f64, hi: f64, limit: usize) -> Option<(i64, i64)> {
    let first = ((lo / step) - STEP_TOLERANCE).ceil();
    let last = ((hi / step) + STEP_TOLERANCE).floor();
    if !(first.is_finite() && last.is_finite()) || last < first {
        return None;
    }
    if first.abs() > MAX_TICK_INDEX || last.abs() > MAX_TICK_INDEX {
        warn!("Tick step {step} is too fine for [{lo}, {hi}]; skipping ticks");
        return None;
    }
    if last - first >= limit as f64 {
        warn!(
            "Tick step {step} would place {} ticks on [{lo}, {hi}]; skipping ticks",
            last - first + 1.0
        );
        return None;
    }
    Some((first as i64, last as i64))
}

/// Installs `MultipleLocator`-style majors and `AutoMinorLocator`-style minors on both axes.
pub fn fix_ticks(
    axes: &mut Axes,
    minor_x: usize,
    minor_y: usize,
    mult_x: f64,
    mult_y: f64,
) -> Result<()> {
    axes.set_major_locator(AxisKind::X, MajorLocator::multiple(mult_x)?);
    axes.set_minor_locator(AxisKind::X, MinorLocator::divisions(minor_x)?);
    axes.set_major_locator(AxisKind::Y, MajorLocator::multiple(mult_y)?);
    axes.set_minor_locator(AxisKind::Y, MinorLocator::divisions(minor_y)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::fix_plot;

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "{actual:?} vs {expected:?}");
        }
    }

    #[test]
    fn test_multiple_locator_inclusive_bounds() {
        let ticks = MajorLocator::Multiple(3.0).ticks(-10.0, 10.0);
        assert_close(&ticks, &[-9.0, -6.0, -3.0, 0.0, 3.0, 6.0, 9.0]);

        let ticks = MajorLocator::Multiple(0.2).ticks(-0.4, 0.4);
        assert_close(&ticks, &[-0.4, -0.2, 0.0, 0.2, 0.4]);
    }

    #[test]
    fn test_multiple_locator_rejects_bad_step() {
        assert!(MajorLocator::multiple(0.0).is_err());
        assert!(MajorLocator::multiple(-1.0).is_err());
        assert!(MajorLocator::multiple(f64::NAN).is_err());
    }

    #[test]
    fn test_minor_divisions_skip_majors() {
        let minors = MinorLocator::Divisions(5).ticks(1.0, 0.0, 1.0);
        assert_close(&minors, &[0.2, 0.4, 0.6, 0.8]);

        let minors = MinorLocator::Divisions(2).ticks(2.5, -2.5, 2.5);
        assert_close(&minors, &[-1.25, 1.25]);
    }

    #[test]
    fn test_minor_auto_divisions() {
        assert_eq!(MinorLocator::Auto.resolve_divisions(0.5), Some(5));
        assert_eq!(MinorLocator::Auto.resolve_divisions(2.0), Some(4));
        assert_eq!(MinorLocator::Auto.resolve_divisions(2.5), Some(4));
        assert_eq!(MinorLocator::Null.resolve_divisions(1.0), None);
        assert!(MinorLocator::divisions(0).is_err());
    }

    #[test]
    fn test_too_many_ticks_are_dropped() {
        assert!(MajorLocator::Multiple(1e-6).ticks(0.0, 1.0).is_empty());
    }

    #[test]
    fn test_huge_range_does_not_overflow() {
        assert!(MajorLocator::Multiple(1.0).ticks(-1e19, 1e19).is_empty());
        assert!(MajorLocator::Multiple(1.0).ticks(1e19, 2e19).is_empty());
        assert!(MinorLocator::Divisions(5).ticks(1.0, -1e19, 1e19).is_empty());
        assert!(MinorLocator::Divisions(5).ticks(1.0, 1e19, 2e19).is_empty());
    }

    #[test]
    fn test_large_magnitude_ticks_stay_in_view() {
        let ticks = MajorLocator::Multiple(1e18).ticks(1e19, 2e19);
        assert_eq!(ticks.len(), 11);
        assert!(ticks.iter().all(|t| (1e19..=2e19).contains(t)), "{ticks:?}");
        let ticks = MajorLocator::Auto.ticks(-2e19, 2e19);
        assert!(!ticks.is_empty());
        assert!(ticks.iter().all(|t| (-2e19..=2e19).contains(t)), "{ticks:?}");
    }

    #[test]
    fn test_nice_step() {
        assert!((nice_step(20.0) - 2.5).abs() < 1e-12);
        assert!((nice_step(40.0) - 5.0).abs() < 1e-12);
        assert!((nice_step(1.0) - 0.2).abs() < 1e-12);
        assert!((nice_step(16.0) - 2.0).abs() < 1e-12);
        assert_eq!(nice_step(0.0), 1.0);
    }

    #[test]
    fn test_decimal_formatter() {
        assert_eq!(TickFormatter::Decimals(2).format(0.5), "0.50");
        assert_eq!(TickFormatter::Decimals(0).format(2.6), "3");
        assert_eq!(TickFormatter::Decimals(1).format(-1e-17), "0.0");
    }

    #[test]
    fn test_auto_formatter_hides_rounding_noise() {
        assert_eq!(TickFormatter::Auto.format(3.0 * 0.1), "0.3");
        assert_eq!(TickFormatter::Auto.format(3.0), "3");
        assert_eq!(TickFormatter::Auto.format(-0.0), "0");
        assert_eq!(TickFormatter::Auto.format(-2.5), "-2.5");
    }

    #[test]
    fn test_fix_ticks_installs_locators() {
        let style = fix_plot(8.0, 8.0);
        let mut axes = Axes::new([0.1, 0.1, 0.8, 0.8], &style);
        fix_ticks(&mut axes, 5, 4, 3.0, 0.2).unwrap();
        assert_eq!(axes.axis(AxisKind::X).major, MajorLocator::Multiple(3.0));
        assert_eq!(axes.axis(AxisKind::X).minor, MinorLocator::Divisions(5));
        assert_eq!(axes.axis(AxisKind::Y).major, MajorLocator::Multiple(0.2));
        assert_eq!(axes.axis(AxisKind::Y).minor, MinorLocator::Divisions(4));

        assert!(fix_ticks(&mut axes, 0, 5, 1.0, 1.0).is_err());
    }
}
