//! Geometric primitives for the redaction pipeline.
//!
//! This module provides the point and bounding-box types shared by the
//! extraction engines, the deskew estimator, and the redactor, along with
//! the minimum-area-rectangle algorithm (convex hull + rotating calipers)
//! used to estimate document skew.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// A 2D point with floating-point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X-coordinate of the point.
    pub x: f32,
    /// Y-coordinate of the point.
    pub y: f32,
}

impl Point {
    /// Creates a new point with the given coordinates.
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned integer rectangle, `(x1, y1)` inclusive top-left and
/// `(x2, y2)` exclusive bottom-right in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x1: i32,
    /// Top edge.
    pub y1: i32,
    /// Right edge.
    pub x2: i32,
    /// Bottom edge.
    pub y2: i32,
}

impl Rect {
    /// Width of the rectangle, zero when degenerate.
    pub fn width(&self) -> i32 {
        (self.x2 - self.x1).max(0)
    }

    /// Height of the rectangle, zero when degenerate.
    pub fn height(&self) -> i32 {
        (self.y2 - self.y1).max(0)
    }
}

/// A bounding box represented by a collection of points.
///
/// Extraction engines emit 4-point polygons, but the type holds any number
/// of points so the deskew estimator can wrap a whole pixel cloud and ask
/// for its minimum-area rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// The points that define the bounding box.
    pub points: Vec<Point>,
}

impl BoundingBox {
    /// Creates a new bounding box from a vector of points.
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Creates an axis-aligned 4-point box from corner coordinates, ordered
    /// top-left, top-right, bottom-right, bottom-left.
    pub fn from_coords(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            points: vec![
                Point::new(x1, y1),
                Point::new(x2, y1),
                Point::new(x2, y2),
                Point::new(x1, y2),
            ],
        }
    }

    /// Reduces the box to its axis-aligned bounding rectangle via min/max
    /// over the point coordinates. Returns a zero rect for an empty box.
    pub fn to_rect(&self) -> Rect {
        let Some((min_x, max_x)) = self.points.iter().map(|p| p.x).minmax().into_option() else {
            return Rect {
                x1: 0,
                y1: 0,
                x2: 0,
                y2: 0,
            };
        };
        let (min_y, max_y) = self
            .points
            .iter()
            .map(|p| p.y)
            .minmax()
            .into_option()
            .unwrap_or((0.0, 0.0));
        Rect {
            x1: min_x as i32,
            y1: min_y as i32,
            x2: max_x as i32,
            y2: max_y as i32,
        }
    }

    /// Computes the convex hull of the point set using Graham's scan.
    ///
    /// With fewer than 3 points the original box is returned unchanged.
    fn convex_hull(&self) -> BoundingBox {
        if self.points.len() < 3 {
            return self.clone();
        }

        let mut points = self.points.clone();

        // Anchor at the lowest point, leftmost on ties.
        let mut start_idx = 0;
        for i in 1..points.len() {
            if points[i].y < points[start_idx].y
                || (points[i].y == points[start_idx].y && points[i].x < points[start_idx].x)
            {
                start_idx = i;
            }
        }
        points.swap(0, start_idx);
        let start = points[0];

        points[1..].sort_by(|a, b| {
            let cross = cross_product(&start, a, b);
            if cross == 0.0 {
                let da = (a.x - start.x).powi(2) + (a.y - start.y).powi(2);
                let db = (b.x - start.x).powi(2) + (b.y - start.y).powi(2);
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            } else if cross > 0.0 {
                std::cmp::Ordering::Less
            } else {
                std::cmp::Ordering::Greater
            }
        });

        let mut hull: Vec<Point> = Vec::new();
        for point in points {
            while hull.len() > 1
                && cross_product(&hull[hull.len() - 2], &hull[hull.len() - 1], &point) <= 0.0
            {
                hull.pop();
            }
            hull.push(point);
        }

        BoundingBox::new(hull)
    }

    /// Computes the minimum-area rectangle enclosing the point set using
    /// rotating calipers over the convex hull.
    ///
    /// Degenerate point sets (collinear or fewer than 3 hull points) fall
    /// back to the axis-aligned bounding rectangle with angle 0.
    pub fn min_area_rect(&self) -> MinAreaRect {
        let hull = self.convex_hull();
        let hull_points = &hull.points;

        if hull_points.len() < 3 {
            let rect = self.to_rect();
            return MinAreaRect {
                center: Point::new(
                    (rect.x1 + rect.x2) as f32 / 2.0,
                    (rect.y1 + rect.y2) as f32 / 2.0,
                ),
                width: rect.width() as f32,
                height: rect.height() as f32,
                angle: 0.0,
            };
        }

        let mut min_area = f32::MAX;
        let mut best = MinAreaRect {
            center: Point::new(0.0, 0.0),
            width: 0.0,
            height: 0.0,
            angle: 0.0,
        };

        let n = hull_points.len();
        for i in 0..n {
            let j = (i + 1) % n;

            let edge_x = hull_points[j].x - hull_points[i].x;
            let edge_y = hull_points[j].y - hull_points[i].y;
            let edge_length = (edge_x * edge_x + edge_y * edge_y).sqrt();
            if edge_length < f32::EPSILON {
                continue;
            }

            let nx = edge_x / edge_length;
            let ny = edge_y / edge_length;
            let px = -ny;
            let py = nx;

            // Project every hull point onto the edge direction and its
            // perpendicular to get the extent of the candidate rectangle.
            let mut min_n = f32::MAX;
            let mut max_n = f32::MIN;
            let mut min_p = f32::MAX;
            let mut max_p = f32::MIN;
            for point in hull_points {
                let proj_n = nx * (point.x - hull_points[i].x) + ny * (point.y - hull_points[i].y);
                min_n = min_n.min(proj_n);
                max_n = max_n.max(proj_n);
                let proj_p = px * (point.x - hull_points[i].x) + py * (point.y - hull_points[i].y);
                min_p = min_p.min(proj_p);
                max_p = max_p.max(proj_p);
            }

            let width = max_n - min_n;
            let height = max_p - min_p;
            let area = width * height;

            if area < min_area {
                min_area = area;
                let center_n = (min_n + max_n) / 2.0;
                let center_p = (min_p + max_p) / 2.0;
                best = MinAreaRect {
                    center: Point::new(
                        hull_points[i].x + center_n * nx + center_p * px,
                        hull_points[i].y + center_n * ny + center_p * py,
                    ),
                    width,
                    height,
                    angle: f32::atan2(ny, nx) * 180.0 / PI,
                };
            }
        }

        best
    }
}

fn cross_product(p1: &Point, p2: &Point, p3: &Point) -> f32 {
    (p2.x - p1.x) * (p3.y - p1.y) - (p2.y - p1.y) * (p3.x - p1.x)
}

/// A rectangle of minimum area enclosing a point set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinAreaRect {
    /// The center point of the rectangle.
    pub center: Point,
    /// The width of the rectangle.
    pub width: f32,
    /// The height of the rectangle.
    pub height: f32,
    /// The rotation angle of the rectangle's reference edge in degrees.
    pub angle: f32,
}

impl MinAreaRect {
    /// Returns the rectangle angle normalized into `[-90, 0)` degrees, the
    /// convention the deskew correction rule is defined against.
    pub fn normalized_angle(&self) -> f32 {
        self.angle.rem_euclid(90.0) - 90.0
    }
}

/// A redaction region in one of the two supported shapes.
///
/// The redactor reduces both variants to an axis-aligned [`Rect`] through a
/// single normalization function; a quad with a point count other than four
/// is rejected there rather than silently clipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RegionShape {
    /// A 4-point polygon, reduced via min/max over its coordinates.
    Quad(BoundingBox),
    /// An `(x, y, width, height)` rectangle.
    Xywh {
        /// Left edge.
        x: f32,
        /// Top edge.
        y: f32,
        /// Width.
        w: f32,
        /// Height.
        h: f32,
    },
}
