//! Polygon measurements over integer contour points.
//!
//! Areas and moments use the exact integer shoelace sums and are converted
//! to floating point only at the end, so symmetric shapes produce exact
//! centroids.

use imageproc::geometry::{arc_length, convex_hull as imageproc_convex_hull};
use imageproc::point::Point;

use crate::models::PointF;

fn cross(a: Point<i32>, b: Point<i32>) -> i64 {
    a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64
}

/// Iterates the edges of a closed polygon, including the closing edge.
fn edges(points: &[Point<i32>]) -> impl Iterator<Item = (Point<i32>, Point<i32>)> + '_ {
    points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| (*a, *b))
}

/// Unsigned area enclosed by a closed polygon.
pub fn polygon_area(points: &[Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let twice: i64 = edges(points).map(|(a, b)| cross(a, b)).sum();
    twice.abs() as f64 / 2.0
}

pub fn perimeter(points: &[Point<i32>]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    arc_length(points, true)
}

/// Convex hull, empty when the points do not span any area.
pub fn convex_hull(points: &[Point<i32>]) -> Vec<Point<i32>> {
    let Some((&first, rest)) = points.split_first() else {
        return Vec::new();
    };
    let Some(&second) = rest.iter().find(|&&p| p != first) else {
        return Vec::new();
    };
    let collinear = rest.iter().all(|&p| {
        let (ax, ay) = (second.x as i64 - first.x as i64, second.y as i64 - first.y as i64);
        let (bx, by) = (p.x as i64 - first.x as i64, p.y as i64 - first.y as i64);
        ax * by - ay * bx == 0
    });
    if collinear {
        return Vec::new();
    }
    imageproc_convex_hull(points)
}

/// Strict convexity test: every turn goes the same way and no three
/// consecutive points are collinear.
pub fn is_convex(points: &[Point<i32>]) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }

    let mut prev = points[n - 2];
    let mut cur = points[n - 1];
    let (mut dx0, mut dy0) = (cur.x as i64 - prev.x as i64, cur.y as i64 - prev.y as i64);

    // bit 1: left turn, bit 2: right turn
    let mut orientation = 0u8;
    for &next in points {
        prev = cur;
        cur = next;
        let dx = cur.x as i64 - prev.x as i64;
        let dy = cur.y as i64 - prev.y as i64;

        let turn = dy * dx0 - dx * dy0;
        orientation |= match turn.signum() {
            1 => 1,
            -1 => 2,
            _ => 3,
        };
        if orientation == 3 {
            return false;
        }

        dx0 = dx;
        dy0 = dy;
    }
    true
}

/// Spatial moments up to first order of a polygon's interior.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
}

impl Moments {
    /// Green's theorem moments of a closed polygon, normalised so `m00`
    /// is non-negative whatever the winding direction.
    pub fn of_polygon(points: &[Point<i32>]) -> Self {
        if points.len() < 3 {
            return Self {
                m00: 0.0,
                m10: 0.0,
                m01: 0.0,
            };
        }

        let (mut a, mut x, mut y) = (0i64, 0i64, 0i64);
        for (p, q) in edges(points) {
            let c = cross(p, q);
            a += c;
            x += (p.x as i64 + q.x as i64) * c;
            y += (p.y as i64 + q.y as i64) * c;
        }

        let sign = if a < 0 { -1.0 } else { 1.0 };
        Self {
            m00: sign * a as f64 / 2.0,
            m10: sign * x as f64 / 6.0,
            m01: sign * y as f64 / 6.0,
        }
    }

    pub fn centroid(&self) -> Option<PointF> {
        if self.m00.abs() <= f64::EPSILON {
            return None;
        }
        Some(PointF::new(self.m10 / self.m00, self.m01 / self.m00))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(i32, i32)]) -> Vec<Point<i32>> {
        raw.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn test_square_measurements() {
        let square = pts(&[(0, 0), (10, 0), (10, 10), (0, 10)]);
        assert_eq!(polygon_area(&square), 100.0);
        assert!((perimeter(&square) - 40.0).abs() < 1e-9);
        assert!(is_convex(&square));

        let c = Moments::of_polygon(&square).centroid().unwrap();
        assert_eq!((c.x, c.y), (5.0, 5.0));
    }

    #[test]
    fn test_winding_does_not_change_area_or_centroid() {
        let cw = pts(&[(0, 0), (0, 10), (20, 10), (20, 0)]);
        let ccw: Vec<_> = cw.iter().rev().copied().collect();
        assert_eq!(polygon_area(&cw), polygon_area(&ccw));
        assert_eq!(
            Moments::of_polygon(&cw).centroid(),
            Moments::of_polygon(&ccw).centroid()
        );
    }

    #[test]
    fn test_notched_polygon_is_not_convex() {
        let l_shape = pts(&[(0, 0), (4, 0), (4, 6), (10, 6), (10, 10), (0, 10)]);
        assert!(!is_convex(&l_shape));
    }

    #[test]
    fn test_collinear_points_have_no_area_or_centroid() {
        let line = pts(&[(0, 0), (5, 5), (10, 10)]);
        assert_eq!(polygon_area(&line), 0.0);
        assert_eq!(polygon_area(&convex_hull(&line)), 0.0);
        assert!(!is_convex(&line));
        assert!(Moments::of_polygon(&line).centroid().is_none());
    }
}
