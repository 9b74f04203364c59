use std::fmt;

use crate::models::Contour;

/// Geometric limits a contour must satisfy to count as a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterCriteria {
    pub min_area: f64,
    pub min_perimeter: f64,
    pub min_width: f64,
    pub min_height: f64,
    /// Inclusive `[min, max]` solidity, in percent.
    pub solidity: [f64; 2],
    pub min_vertex_count: f64,
    /// Minimum bounding-box width / height.
    pub min_ratio: f64,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            min_area: 20.0,
            min_perimeter: 20.0,
            min_width: 20.0,
            min_height: 20.0,
            solidity: [0.0, 60.0],
            min_vertex_count: 0.0,
            min_ratio: 0.0,
        }
    }
}

/// First predicate a contour failed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rejection {
    TooFewPoints(usize),
    BoundingBox { width: i32, height: i32 },
    Area(f64),
    Perimeter(f64),
    DegenerateHull,
    Solidity(f64),
    VertexCount(usize),
    Ratio(f64),
    Convex,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::TooFewPoints(n) => write!(f, "only {} points", n),
            Rejection::BoundingBox { width, height } => write!(f, "bounding box {}x{}", width, height),
            Rejection::Area(a) => write!(f, "area {:.1}", a),
            Rejection::Perimeter(p) => write!(f, "perimeter {:.1}", p),
            Rejection::DegenerateHull => write!(f, "zero-area convex hull"),
            Rejection::Solidity(s) => write!(f, "solidity {:.1}%", s),
            Rejection::VertexCount(n) => write!(f, "{} vertices", n),
            Rejection::Ratio(r) => write!(f, "ratio {:.2}", r),
            Rejection::Convex => write!(f, "convex"),
        }
    }
}

/// Run the predicates in order and stop at the first failure.
pub fn evaluate(contour: &Contour, criteria: &FilterCriteria) -> Result<(), Rejection> {
    let n = contour.vertex_count();
    if n < 3 {
        return Err(Rejection::TooFewPoints(n));
    }

    let bb = contour.bounding_rect();
    if (bb.width as f64) < criteria.min_width || (bb.height as f64) < criteria.min_height {
        return Err(Rejection::BoundingBox {
            width: bb.width,
            height: bb.height,
        });
    }

    let area = contour.area();
    if area < criteria.min_area {
        return Err(Rejection::Area(area));
    }

    let perimeter = contour.perimeter();
    if perimeter < criteria.min_perimeter {
        return Err(Rejection::Perimeter(perimeter));
    }

    let hull_area = contour.hull_area();
    if hull_area <= 0.0 {
        return Err(Rejection::DegenerateHull);
    }
    let solidity = 100.0 * area / hull_area;
    if solidity < criteria.solidity[0] || solidity > criteria.solidity[1] {
        return Err(Rejection::Solidity(solidity));
    }

    if (n as f64) < criteria.min_vertex_count {
        return Err(Rejection::VertexCount(n));
    }

    let ratio = contour.aspect_ratio();
    if ratio < criteria.min_ratio {
        return Err(Rejection::Ratio(ratio));
    }

    if contour.is_convex() {
        return Err(Rejection::Convex);
    }

    Ok(())
}

/// Keep the contours that pass every predicate, preserving input order.
pub fn filter_contours(contours: &[Contour], criteria: &FilterCriteria) -> Vec<Contour> {
    contours
        .iter()
        .filter(|c| match evaluate(c, criteria) {
            Ok(()) => true,
            Err(reason) => {
                tracing::trace!("rejected contour with {} points: {}", c.vertex_count(), reason);
                false
            }
        })
        .cloned()
        .collect()
}
