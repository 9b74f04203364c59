use image::GrayImage;
use imageproc::contours::{BorderType, find_contours};
use imageproc::point::Point;

use crate::models::Contour;

/// Find every region boundary in a binary mask, outer borders and hole
/// borders alike, in scan order.
pub fn find_all_contours(mask: &GrayImage) -> Vec<Contour> {
    find_contours::<i32>(mask)
        .into_iter()
        .map(|c| Contour {
            points: simplify_chain(&c.points),
            is_hole: matches!(c.border_type, BorderType::Hole),
        })
        .collect()
}

/// Collapse straight runs of a closed pixel chain to their end points.
///
/// A point is dropped when the step into it and the step out of it point
/// in the same direction. Duplicate consecutive points are dropped too.
pub fn simplify_chain(chain: &[Point<i32>]) -> Vec<Point<i32>> {
    let mut points: Vec<Point<i32>> = Vec::with_capacity(chain.len());
    for &p in chain {
        if points.last() != Some(&p) {
            points.push(p);
        }
    }
    while points.len() > 1 && points.first() == points.last() {
        points.pop();
    }

    let n = points.len();
    if n < 3 {
        return points;
    }

    let direction = |a: Point<i32>, b: Point<i32>| ((b.x - a.x).signum(), (b.y - a.y).signum());

    (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let cur = points[i];
            let next = points[(i + 1) % n];
            direction(prev, cur) != direction(cur, next)
        })
        .map(|i| points[i])
        .collect()
}
