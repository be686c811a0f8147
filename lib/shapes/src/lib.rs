//! Drawable primitives persisted by `flatobj`.
//!
//! These are deliberately thin: a drawable only needs to enumerate its constituent points and be
//! rebuilt from a list of points. Anything involving transformations belongs elsewhere.

mod drawable;
pub use drawable::*;

use nalgebra::{Point2, Point3};

/// RGB triplet with channels of type `C`.
pub type Rgb<C> = Point3<C>;

/// An 8-bit-per-channel color, as resolved from a material library.
pub type Color = Rgb<u8>;

/// Discriminant of a [Drawable], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Point,
    Line,
    Wireframe,
    Polygon,
}

impl ShapeKind {
    /// Whether `count` points are enough to build a shape of this kind.
    #[inline]
    pub fn accepts(self, count: usize) -> bool {
        match self {
            ShapeKind::Point => count == 1,
            ShapeKind::Line => count == 2,
            ShapeKind::Wireframe | ShapeKind::Polygon => count >= 3,
        }
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShapeKind::Point => f.write_str("point"),
            ShapeKind::Line => f.write_str("line"),
            ShapeKind::Wireframe => f.write_str("wireframe"),
            ShapeKind::Polygon => f.write_str("polygon"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("a {kind} can't be built from {found} point(s)")]
    Arity { kind: ShapeKind, found: usize },
}

/// A 2D point, with an optional depth for 2.5D scenes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub xy: Point2<f64>,
    pub z: Option<f64>,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            xy: Point2::new(x, y),
            z: None,
        }
    }

    #[inline]
    pub fn with_z(x: f64, y: f64, z: f64) -> Self {
        Self {
            xy: Point2::new(x, y),
            z: Some(z),
        }
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.xy.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.xy.y
    }
}

impl From<Point2<f64>> for Point {
    fn from(xy: Point2<f64>) -> Self {
        Self { xy, z: None }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}
