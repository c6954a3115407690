use crate::encoding::AxisOrient;

/// Recommended X tick label angle given the resolved Y axis side.
///
/// `y_orient` is `None` when no Y axis layout was computed. The angle is
/// negated only for a right Y axis over a bottom X axis, or a left Y axis
/// over a top X axis.
#[must_use]
pub fn resolve_x_label_angle(
    y_orient: Option<AxisOrient>,
    x_orient: AxisOrient,
    default_angle: f64,
) -> f64 {
    match (y_orient, x_orient) {
        (Some(AxisOrient::Right), AxisOrient::Bottom)
        | (Some(AxisOrient::Left), AxisOrient::Top) => -default_angle,
        _ => default_angle,
    }
}
