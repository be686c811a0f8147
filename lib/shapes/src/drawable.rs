use crate::{Point, ShapeError, ShapeKind};

/// A segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub a: Point,
    pub b: Point,
}

impl Line {
    #[inline]
    pub fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }
}

/// An open chain of at least three points.
#[derive(Debug, Clone, PartialEq)]
pub struct Wireframe {
    points: Vec<Point>,
}

impl Wireframe {
    /// # Errors
    ///
    /// * [`Arity`](ShapeError::Arity) if `points.len()` < 3
    pub fn new(points: Vec<Point>) -> Result<Self, ShapeError> {
        if !ShapeKind::Wireframe.accepts(points.len()) {
            return Err(ShapeError::Arity {
                kind: ShapeKind::Wireframe,
                found: points.len(),
            });
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

/// A closed chain of at least three points.
///
/// The edge from the last point back to the first is implicit; the first point is not repeated.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    /// # Errors
    ///
    /// * [`Arity`](ShapeError::Arity) if `points.len()` < 3
    pub fn new(points: Vec<Point>) -> Result<Self, ShapeError> {
        if !ShapeKind::Polygon.accepts(points.len()) {
            return Err(ShapeError::Arity {
                kind: ShapeKind::Polygon,
                found: points.len(),
            });
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

/// Anything that can be stored in a scene.
#[derive(Debug, Clone, PartialEq)]
pub enum Drawable {
    Point(Point),
    Line(Line),
    Wireframe(Wireframe),
    Polygon(Polygon),
}

impl Drawable {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Drawable::Point(_) => ShapeKind::Point,
            Drawable::Line(_) => ShapeKind::Line,
            Drawable::Wireframe(_) => ShapeKind::Wireframe,
            Drawable::Polygon(_) => ShapeKind::Polygon,
        }
    }

    /// The constituent points of this drawable, in its own order.
    pub fn points(&self) -> Vec<Point> {
        match self {
            Drawable::Point(p) => vec![*p],
            Drawable::Line(l) => vec![l.a, l.b],
            Drawable::Wireframe(w) => w.points().to_vec(),
            Drawable::Polygon(p) => p.points().to_vec(),
        }
    }

    /// Build a drawable of a given kind from its constituent points.
    ///
    /// # Errors
    ///
    /// * [`Arity`](ShapeError::Arity) if `kind` doesn't [accept](ShapeKind::accepts) `points.len()`
    pub fn from_points(kind: ShapeKind, points: Vec<Point>) -> Result<Self, ShapeError> {
        let found = points.len();
        let arity = || ShapeError::Arity { kind, found };
        match kind {
            ShapeKind::Point => match points.as_slice() {
                [p] => Ok(Drawable::Point(*p)),
                _ => Err(arity()),
            },
            ShapeKind::Line => match points.as_slice() {
                [a, b] => Ok(Drawable::Line(Line::new(*a, *b))),
                _ => Err(arity()),
            },
            ShapeKind::Wireframe => Wireframe::new(points).map(Drawable::Wireframe),
            ShapeKind::Polygon => Polygon::new(points).map(Drawable::Polygon),
        }
    }
}

impl From<Point> for Drawable {
    fn from(p: Point) -> Self {
        Drawable::Point(p)
    }
}

impl From<Line> for Drawable {
    fn from(l: Line) -> Self {
        Drawable::Line(l)
    }
}

impl From<Wireframe> for Drawable {
    fn from(w: Wireframe) -> Self {
        Drawable::Wireframe(w)
    }
}

impl From<Polygon> for Drawable {
    fn from(p: Polygon) -> Self {
        Drawable::Polygon(p)
    }
}
