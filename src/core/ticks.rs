use smallvec::SmallVec;

/// Tick values for one axis; most axes stay well under a dozen ticks.
pub type TickValues = SmallVec<[f64; 12]>;

const E10: f64 = 7.071_067_811_865_476; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Integer tick span `[i1, i2]` with signed increment.
///
/// A negative increment means "divide by `-inc`", which keeps sub-unit steps
/// exact (`0.1` is represented as `i / 10` rather than `i * 0.1`).
fn tick_spec(start: f64, stop: f64, count: f64) -> Option<(f64, f64, f64)> {
    let step = (stop - start) / count.max(0.0);
    if !step.is_finite() || step <= 0.0 {
        return None;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let scaled = 10f64.powf(-power) / factor;
        i1 = (start * scaled).round();
        i2 = (stop * scaled).round();
        if i1 / scaled < start {
            i1 += 1.0;
        }
        if i2 / scaled > stop {
            i2 -= 1.0;
        }
        inc = -scaled;
    } else {
        let scaled = 10f64.powf(power) * factor;
        i1 = (start / scaled).round();
        i2 = (stop / scaled).round();
        if i1 * scaled < start {
            i1 += 1.0;
        }
        if i2 * scaled > stop {
            i2 -= 1.0;
        }
        inc = scaled;
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    Some((i1, i2, inc))
}

/// Signed tick increment for `[start, stop]` split into roughly `count` steps.
#[must_use]
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    tick_spec(start, stop, count as f64).map_or(0.0, |(_, _, inc)| inc)
}

/// Human-friendly tick values (multiples of 1, 2 or 5 times a power of ten).
#[must_use]
pub fn nice_ticks(start: f64, stop: f64, count: usize) -> TickValues {
    let mut ticks = TickValues::new();
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return ticks;
    }
    if start == stop {
        ticks.push(start);
        return ticks;
    }

    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let Some((i1, i2, inc)) = tick_spec(lo, hi, count as f64) else {
        return ticks;
    };
    if i2 < i1 {
        return ticks;
    }

    let n = (i2 - i1) as usize + 1;
    for i in 0..n {
        let index = if reverse { i2 - i as f64 } else { i1 + i as f64 };
        let value = if inc < 0.0 { index / -inc } else { index * inc };
        ticks.push(value);
    }
    ticks
}

/// Extends `[start, stop]` outward so both ends land on nice tick values.
#[must_use]
pub fn nice_domain(start: f64, stop: f64, count: usize) -> (f64, f64) {
    if !start.is_finite() || !stop.is_finite() || start == stop {
        return (start, stop);
    }
    let reverse = stop < start;
    let (mut lo, mut hi) = if reverse { (stop, start) } else { (start, stop) };

    let mut previous_step = None;
    for _ in 0..10 {
        let step = tick_increment(lo, hi, count);
        if previous_step == Some(step) {
            break;
        }
        if step > 0.0 {
            lo = (lo / step).floor() * step;
            hi = (hi / step).ceil() * step;
        } else if step < 0.0 {
            lo = (lo * step).ceil() / step;
            hi = (hi * step).floor() / step;
        } else {
            break;
        }
        previous_step = Some(step);
    }

    if reverse { (hi, lo) } else { (lo, hi) }
}

#[cfg(test)]
mod tests {
    use super::{nice_domain, nice_ticks};

    #[test]
    fn unit_interval_uses_exact_decimal_steps() {
        let ticks = nice_ticks(0.0, 1.0, 10);
        assert_eq!(ticks.len(), 11);
        assert_eq!(ticks[3], 0.3);
        assert_eq!(ticks[10], 1.0);
    }

    #[test]
    fn reversed_extent_yields_descending_ticks() {
        let ticks = nice_ticks(100.0, 0.0, 5);
        assert_eq!(ticks.as_slice(), &[100.0, 80.0, 60.0, 40.0, 20.0, 0.0]);
    }

    #[test]
    fn nice_domain_rounds_outward() {
        assert_eq!(nice_domain(0.13, 9.7, 10), (0.0, 10.0));
        assert_eq!(nice_domain(3.0, 97.0, 5), (0.0, 100.0));
    }

    #[test]
    fn degenerate_extent_returns_single_tick() {
        assert_eq!(nice_ticks(5.0, 5.0, 5).as_slice(), &[5.0]);
        assert!(nice_ticks(0.0, 1.0, 0).is_empty());
    }
}
