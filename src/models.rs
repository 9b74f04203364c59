use imageproc::point::Point;

use crate::detection::geometry;

/// Axis-aligned bounding box of a contour, in pixels.
///
/// Width and height count pixels, so a single point has a 1x1 box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Closed outline of a region in a mask.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    /// Boundary points with collinear runs merged to their end points.
    pub points: Vec<Point<i32>>,
    /// True when the outline borders a hole inside a region.
    pub is_hole: bool,
}

impl Contour {
    pub fn new(points: Vec<Point<i32>>) -> Self {
        Self {
            points,
            is_hole: false,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    pub fn bounding_rect(&self) -> BoundingRect {
        let Some(first) = self.points.first() else {
            return BoundingRect {
                x: 0,
                y: 0,
                width: 0,
                height: 0,
            };
        };

        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &self.points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        BoundingRect {
            x: min_x,
            y: min_y,
            width: max_x - min_x + 1,
            height: max_y - min_y + 1,
        }
    }

    /// Enclosed polygon area.
    pub fn area(&self) -> f64 {
        geometry::polygon_area(&self.points)
    }

    /// Closed arc length.
    pub fn perimeter(&self) -> f64 {
        geometry::perimeter(&self.points)
    }

    /// Width over height of the bounding box.
    pub fn aspect_ratio(&self) -> f64 {
        let bb = self.bounding_rect();
        if bb.height == 0 {
            return 0.0;
        }
        bb.width as f64 / bb.height as f64
    }

    /// Area of the convex hull of the boundary points.
    pub fn hull_area(&self) -> f64 {
        geometry::polygon_area(&geometry::convex_hull(&self.points))
    }

    /// 100 * area / hull area, or `None` when the hull is degenerate.
    pub fn solidity(&self) -> Option<f64> {
        let hull_area = self.hull_area();
        if hull_area <= 0.0 {
            return None;
        }
        Some(100.0 * self.area() / hull_area)
    }

    pub fn is_convex(&self) -> bool {
        geometry::is_convex(&self.points)
    }

    /// Area-weighted centroid, `None` when the zeroth moment vanishes.
    pub fn centroid(&self) -> Option<PointF> {
        geometry::Moments::of_polygon(&self.points).centroid()
    }
}

/// Point with sub-pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointF {
    pub x: f64,
    pub y: f64,
}

impl PointF {
    pub const ORIGIN: PointF = PointF { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Per-frame detection outcome published to telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TargetResult {
    /// Number of contours that passed every filter predicate.
    pub count: usize,
    /// Target centroid in working-resolution pixels; zero unless `count == 1`.
    pub center: PointF,
    /// Signed distance of `center` from the image center; zero unless `count == 1`.
    pub offset: PointF,
}

impl TargetResult {
    pub fn none(count: usize) -> Self {
        Self {
            count,
            center: PointF::ORIGIN,
            offset: PointF::ORIGIN,
        }
    }
}
