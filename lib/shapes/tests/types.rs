use flatobj_shapes::{Drawable, Line, Point, Polygon, ShapeError, ShapeKind, Wireframe};
use static_assertions::assert_impl_all;

assert_impl_all!(Drawable: Send, Sync, Clone, PartialEq);
assert_impl_all!(ShapeError: std::error::Error, Send, Sync);

fn square() -> Vec<Point> {
    vec![
        Point::new(-1.0, 1.0),
        Point::new(1.0, 1.0),
        Point::new(1.0, -1.0),
        Point::new(-1.0, -1.0),
    ]
}

#[test]
fn arity() {
    assert!(ShapeKind::Point.accepts(1));
    assert!(!ShapeKind::Point.accepts(2));
    assert!(ShapeKind::Line.accepts(2));
    assert!(!ShapeKind::Line.accepts(3));
    assert!(!ShapeKind::Wireframe.accepts(2));
    assert!(ShapeKind::Polygon.accepts(3));

    assert_eq!(
        Polygon::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)]),
        Err(ShapeError::Arity {
            kind: ShapeKind::Polygon,
            found: 2
        })
    );
    assert!(Wireframe::new(Vec::new()).is_err());
}

#[test]
fn points_in_order() {
    let poly = Drawable::from(Polygon::new(square()).unwrap());
    // closing point is implicit
    assert_eq!(poly.points(), square());
    assert_eq!(poly.kind(), ShapeKind::Polygon);

    let line = Drawable::from(Line::new(Point::new(0.0, 0.0), Point::new(0.0, 300.0)));
    assert_eq!(
        line.points(),
        vec![Point::new(0.0, 0.0), Point::new(0.0, 300.0)]
    );
}

#[test]
fn rebuild_from_points() {
    for d in [
        Drawable::from(Point::with_z(5.0, 4.0, 2.0)),
        Drawable::from(Line::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0))),
        Drawable::from(Wireframe::new(square()).unwrap()),
        Drawable::from(Polygon::new(square()).unwrap()),
    ] {
        assert_eq!(Drawable::from_points(d.kind(), d.points()), Ok(d.clone()));
    }
    assert!(Drawable::from_points(ShapeKind::Line, square()).is_err());
}
