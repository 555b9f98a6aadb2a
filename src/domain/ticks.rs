//! Axis ranges with "nice" tick positions

/// A linear axis: covered range plus tick positions inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisScale {
    pub lo: f64,
    pub hi: f64,
    pub step: f64,
    pub ticks: Vec<f64>,
}

impl AxisScale {
    /// Axis covering `min..=max` with about `desired` ticks at 1/2/5 × 10^k.
    ///
    /// With `integer`, the step is never below 1 and every tick is a whole number.
    pub fn nice(min: f64, max: f64, desired: usize, integer: bool) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let (min, max) = if max - min <= f64::EPSILON * max.abs().max(1.0) {
            (min, min + 1.0)
        } else {
            (min, max)
        };

        let rough = (max - min) / desired.max(2).saturating_sub(1) as f64;
        let mut step = nice_step(rough);
        if integer {
            step = step.max(1.0).round();
        }

        let lo = (min / step).floor() * step;
        let hi = (max / step).ceil() * step;
        let count = ((hi - lo) / step).round() as usize + 1;
        let ticks = (0..count).map(|i| lo + step * i as f64).collect();

        Self { lo, hi, step, ticks }
    }

    /// Axis for bar magnitudes: always includes zero.
    pub fn for_bars(values: impl IntoIterator<Item = f64>, desired: usize) -> Self {
        let (lo, hi) = values
            .into_iter()
            .fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Self::nice(lo, hi, desired, true)
    }

    /// Position of `value` as a fraction of the axis span.
    pub fn fraction(&self, value: f64) -> f64 {
        let span = self.hi - self.lo;
        if span == 0.0 {
            0.0
        } else {
            (value - self.lo) / span
        }
    }

    /// Tick label with as many decimals as the step needs.
    pub fn format_tick(&self, value: f64) -> String {
        let decimals = if self.step >= 1.0 {
            0
        } else {
            (-self.step.log10().floor()) as usize
        };
        let text = format!("{value:.decimals$}");
        // avoid "-0"
        if text.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
            text.trim_start_matches('-').to_string()
        } else {
            text
        }
    }
}

fn nice_step(rough: f64) -> f64 {
    if rough <= 0.0 || !rough.is_finite() {
        return 1.0;
    }
    let mag = 10f64.powf(rough.log10().floor());
    let norm = rough / mag;
    let nice = if norm <= 1.0 {
        1.0
    } else if norm <= 2.0 {
        2.0
    } else if norm <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * mag
}
