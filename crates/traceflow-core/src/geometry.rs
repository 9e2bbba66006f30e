//! Geometric primitives for layout, routing and path construction.
//!
//! Coordinates follow SVG: the origin is the top-left corner, x grows to the
//! right and y grows downward. All values are `f32`.

/// A position in diagram space.
///
/// # Examples
///
/// ```
/// # use traceflow_core::geometry::Point;
/// let a = Point::new(10.0, 20.0);
/// let b = Point::new(30.0, 20.0);
///
/// assert!(a.is_axis_aligned_with(b));
/// assert_eq!(a.midpoint(b), Point::new(20.0, 20.0));
/// assert_eq!(b.sub_point(a).hypot(), 20.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> f32 {
        self.x
    }

    pub fn y(self) -> f32 {
        self.y
    }

    /// Component-wise sum, i.e. `self` moved by the vector `other`.
    pub fn add_point(self, other: Point) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    /// The vector from `other` to `self`.
    pub fn sub_point(self, other: Point) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    pub fn midpoint(self, other: Point) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Length of the point read as a vector.
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// True when the segment to `other` is horizontal or vertical.
    pub fn is_axis_aligned_with(self, other: Point) -> bool {
        self.x == other.x || self.y == other.y
    }

    /// Box of `size` centered on this point.
    pub fn to_bounds(self, size: Size) -> Bounds {
        let (half_w, half_h) = (size.width / 2.0, size.height / 2.0);
        Bounds {
            min_x: self.x - half_w,
            min_y: self.y - half_h,
            max_x: self.x + half_w,
            max_y: self.y + half_h,
        }
    }
}

/// Width and height of a node or label.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }
}

/// Axis-aligned rectangle stored as its extreme coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Degenerate bounds covering only `point`.
    pub fn from_point(point: Point) -> Self {
        Self {
            min_x: point.x,
            min_y: point.y,
            max_x: point.x,
            max_y: point.y,
        }
    }

    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn max_x(self) -> f32 {
        self.max_x
    }

    pub fn max_y(self) -> f32 {
        self.max_y
    }

    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Top-left corner.
    pub fn min_point(self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    /// Smallest bounds containing both `self` and `other`.
    ///
    /// ```
    /// # use traceflow_core::geometry::{Point, Size};
    /// let a = Point::new(50.0, 15.0).to_bounds(Size::new(100.0, 30.0));
    /// let b = Point::new(70.0, 80.0).to_bounds(Size::new(120.0, 80.0));
    ///
    /// let both = a.merge(&b);
    /// assert_eq!(both.min_x(), 0.0);
    /// assert_eq!(both.width(), 130.0);
    /// assert_eq!(both.height(), 120.0);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Grows every side by `amount`.
    pub fn inflate(&self, amount: f32) -> Self {
        Self {
            min_x: self.min_x - amount,
            min_y: self.min_y - amount,
            max_x: self.max_x + amount,
            max_y: self.max_y + amount,
        }
    }

    /// Inclusive horizontal containment.
    pub fn contains_x(self, x: f32) -> bool {
        (self.min_x..=self.max_x).contains(&x)
    }

    /// Inclusive vertical containment.
    pub fn contains_y(self, y: f32) -> bool {
        (self.min_y..=self.max_y).contains(&y)
    }

    /// Whether the closed span between `y1` and `y2`, in either order,
    /// touches the vertical extent.
    pub fn overlaps_y_span(self, y1: f32, y2: f32) -> bool {
        y1.min(y2) <= self.max_y && y1.max(y2) >= self.min_y
    }
}
