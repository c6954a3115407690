use crate::core::Margin;

/// Chart size and margin after scrollbar reservation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverflowCorrection {
    pub chart_width: f64,
    pub chart_height: f64,
    pub margin: Margin,
    pub overflow_x: bool,
    pub overflow_y: bool,
}

/// Reserves `overflow_margin` for a scrollbar on each overflowing axis.
///
/// Horizontal overflow grows the bottom margin and the chart width; vertical
/// overflow grows the right margin and the chart height. Both may apply.
#[must_use]
pub fn resolve_overflow_margin(
    chart_width: f64,
    chart_height: f64,
    container_width: f64,
    container_height: f64,
    margin: Margin,
    overflow_margin: f64,
) -> OverflowCorrection {
    let overflow_x = chart_width > container_width;
    let overflow_y = chart_height > container_height;
    let mut margin = margin;
    if overflow_x {
        margin.bottom += overflow_margin;
    }
    if overflow_y {
        margin.right += overflow_margin;
    }

    OverflowCorrection {
        chart_width: if overflow_x {
            chart_width + overflow_margin
        } else {
            chart_width
        },
        chart_height: if overflow_y {
            chart_height + overflow_margin
        } else {
            chart_height
        },
        margin,
        overflow_x,
        overflow_y,
    }
}

#[cfg(test)]
mod tests {
    use super::resolve_overflow_margin;
    use crate::core::Margin;

    #[test]
    fn fitting_chart_is_untouched() {
        let margin = Margin::uniform(10.0);
        let out = resolve_overflow_margin(400.0, 300.0, 400.0, 300.0, margin, 8.0);
        assert!(!out.overflow_x && !out.overflow_y);
        assert_eq!(out.margin, margin);
        assert_eq!(out.chart_width, 400.0);
    }

    #[test]
    fn both_axes_may_overflow_at_once() {
        let out = resolve_overflow_margin(500.0, 350.0, 400.0, 300.0, Margin::uniform(10.0), 8.0);
        assert_eq!(out.chart_width, 508.0);
        assert_eq!(out.chart_height, 358.0);
        assert_eq!(out.margin.bottom, 18.0);
        assert_eq!(out.margin.right, 18.0);
        assert_eq!(out.margin.top, 10.0);
    }
}
