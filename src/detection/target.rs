use crate::models::{Contour, PointF, TargetResult};

/// Count the surviving contours and locate the target when exactly one
/// remains. Two or more candidates are reported without a position.
pub fn select_target(filtered: &[Contour], width: u32, height: u32) -> TargetResult {
    let [only] = filtered else {
        return TargetResult::none(filtered.len());
    };

    let Some(center) = only.centroid() else {
        tracing::debug!("sole target has a zero moment, reporting origin");
        return TargetResult::none(1);
    };

    TargetResult {
        count: 1,
        center,
        offset: find_offset(center, width, height),
    }
}

/// Signed distance of `point` from the center of a `width` x `height` image.
pub fn find_offset(point: PointF, width: u32, height: u32) -> PointF {
    PointF::new(
        point.x - width as f64 / 2.0,
        point.y - height as f64 / 2.0,
    )
}
