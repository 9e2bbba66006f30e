//! Rounded-corner path geometry for routed edges.
//!
//! A waypoint list becomes SVG path data made of straight segments joined by
//! one quadratic curve per bend. The curve starts and ends `radius` units
//! away from the bend, where the radius is clamped so that it never exceeds
//! half of either adjacent segment.

use std::fmt::Write;

use traceflow_core::geometry::Point;

/// Nominal corner radius at every bend.
pub const CORNER_RADIUS: f32 = 16.0;

/// Path data and label anchor for one edge.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgePath {
    data: String,
    label_anchor: Point,
}

impl EdgePath {
    /// Builds the path for `points`, rounding bends with at most `radius`.
    ///
    /// A radius of zero gives sharp corners.
    pub fn new(points: &[Point], radius: f32) -> Self {
        Self {
            data: path_data(points, radius),
            label_anchor: label_anchor(points),
        }
    }

    /// SVG path data (`M ... L ... Q ...`).
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Where the edge label is centered.
    pub fn label_anchor(&self) -> Point {
        self.label_anchor
    }
}

/// How a single bend is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Corner {
    /// Straight line through the bend point.
    Sharp(Point),
    /// Line to `start`, then a quadratic curve through `control` to `end`.
    Rounded {
        start: Point,
        control: Point,
        end: Point,
    },
}

impl Corner {
    /// Shapes the bend at `curr` between the segments `prev -> curr` and
    /// `curr -> next`.
    pub fn new(prev: Point, curr: Point, next: Point, radius: f32) -> Self {
        let incoming = curr.sub_point(prev);
        let outgoing = next.sub_point(curr);
        let len_in = incoming.hypot();
        let len_out = outgoing.hypot();

        if len_in == 0.0 || len_out == 0.0 {
            return Self::Sharp(curr);
        }

        let r = radius.min(len_in.min(len_out) / 2.0);
        if r <= 0.0 {
            return Self::Sharp(curr);
        }

        Self::Rounded {
            start: curr.sub_point(along(incoming, r, len_in)),
            control: curr,
            end: curr.add_point(along(outgoing, r, len_out)),
        }
    }
}

/// `vector` resized from `len` to `r`.
fn along(vector: Point, r: f32, len: f32) -> Point {
    Point::new(vector.x() * r / len, vector.y() * r / len)
}

/// Path data for `points`; see the module documentation.
pub fn path_data(points: &[Point], radius: f32) -> String {
    let Some((first, rest)) = points.split_first() else {
        return String::new();
    };

    let mut data = String::with_capacity(16 * points.len());
    // Writing into a String cannot fail.
    let _ = write!(data, "M {} {}", first.x(), first.y());

    for window in points.windows(3) {
        match Corner::new(window[0], window[1], window[2], radius) {
            Corner::Sharp(point) => {
                let _ = write!(data, " L {} {}", point.x(), point.y());
            }
            Corner::Rounded {
                start,
                control,
                end,
            } => {
                let _ = write!(
                    data,
                    " L {} {} Q {} {} {} {}",
                    start.x(),
                    start.y(),
                    control.x(),
                    control.y(),
                    end.x(),
                    end.y()
                );
            }
        }
    }

    if let Some(last) = rest.last() {
        let _ = write!(data, " L {} {}", last.x(), last.y());
    }
    data
}

/// Midpoint of the segment straddling the middle index of `points`.
///
/// For two points this is the midpoint of the only segment. The anchor is
/// not weighted by arc length.
pub fn label_anchor(points: &[Point]) -> Point {
    match points {
        [] => Point::default(),
        [only] => *only,
        _ => {
            let mid = points.len() / 2;
            points[mid - 1].midpoint(points[mid])
        }
    }
}
