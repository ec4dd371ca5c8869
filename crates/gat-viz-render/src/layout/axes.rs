/// Axis configuration with tick generation and data→pixel mapping.
#[derive(Debug, Clone)]
pub struct Axis {
    pub min: f64,
    pub max: f64,
    pub label: String,
    pub tick_positions: Vec<f64>,
    pub tick_labels: Vec<String>,
}

/// Upper bound on the ticks of one axis, whatever its limits.
const MAX_TICKS: usize = 64;

impl Axis {
    /// Axis over exactly `[min, max]` with "nice number" ticks inside the limits.
    ///
    /// Reversed limits are swapped; a zero-width range is widened so that the
    /// mapping stays defined. A non-finite limit falls back to `[0, 1]`.
    pub fn fixed(min: f64, max: f64, target_ticks: usize) -> Self {
        let (min, max) = if min.is_finite() && max.is_finite() {
            padded_limits(min, max)
        } else {
            (0.0, 1.0)
        };
        let n = target_ticks.clamp(2, MAX_TICKS);
        let span = max - min;
        // Spans past f64::MAX step by the larger magnitude instead.
        let rough =
            if span.is_finite() { span / (n - 1) as f64 } else { min.abs().max(max.abs()) };
        let step = nice_step(rough);
        let mut ticks = Vec::new();
        let mut labels = Vec::new();
        if step.is_finite() && step > 0.0 {
            let first = (min / step - 1e-9).ceil();
            for k in 0..MAX_TICKS {
                let v = (first + k as f64) * step;
                if v > max + step * 1e-9 {
                    break;
                }
                ticks.push(v);
                labels.push(format_tick(v, step));
            }
        }
        Self { min, max, label: String::new(), tick_positions: ticks, tick_labels: labels }
    }

    /// Axis spanning the finite extent of `values`.
    pub fn spanning(values: &[f64], target_ticks: usize) -> Self {
        let (lo, hi) = values
            .iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        if lo.is_finite() { Self::fixed(lo, hi, target_ticks) } else { Self::fixed(0.0, 1.0, target_ticks) }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Map a data value to pixel coordinate.
    pub fn data_to_pixel(&self, value: f64, px_min: f64, px_max: f64) -> f64 {
        let frac = (value / 2.0 - self.min / 2.0) / (self.max / 2.0 - self.min / 2.0);
        px_min + frac * (px_max - px_min)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Order the limits and widen a degenerate range.
pub fn padded_limits(a: f64, b: f64) -> (f64, f64) {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    if (hi - lo).abs() > 1e-12 {
        return (lo, hi);
    }
    let pad = if lo.abs() > 1e-12 { lo.abs() * 0.05 } else { 0.5 };
    (lo - pad, hi + pad)
}

fn nice_step(rough: f64) -> f64 {
    let exp = rough.abs().log10().floor();
    let frac = rough / 10.0_f64.powf(exp);
    let nice_frac = if frac <= 1.5 {
        1.0
    } else if frac <= 3.5 {
        2.0
    } else if frac <= 7.5 {
        5.0
    } else {
        10.0
    };
    nice_frac * 10.0_f64.powf(exp)
}

fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step >= 1.0 { 0 } else { (-step.log10().floor()) as usize };
    // Avoid "-0"
    let v = if value.abs() < step * 0.01 { 0.0 } else { value };
    if v.abs() >= 1e15 {
        format!("{v:e}")
    } else if decimals == 0 {
        format!("{}", v.round() as i64)
    } else {
        format!("{:.prec$}", v, prec = decimals)
    }
}
