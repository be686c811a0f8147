//! Properties which should hold for any scene.

use flatobj::{
    shapes::{Drawable, Line, Point, Polygon, Wireframe},
    Attributes, Mode, ObjFile, Value,
};
use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;

#[derive(Debug, Clone)]
struct Scene(Vec<(Drawable, Attributes)>);

// eighths are exact in binary, so nothing is lost to formatting either way
fn coord(g: &mut Gen) -> f64 {
    f64::from(i16::arbitrary(g)) / 8.0
}

fn point(g: &mut Gen) -> Point {
    if u8::arbitrary(g) % 4 == 0 {
        Point::with_z(coord(g), coord(g), coord(g))
    } else {
        Point::new(coord(g), coord(g))
    }
}

fn points(g: &mut Gen) -> Vec<Point> {
    let n = 3 + usize::arbitrary(g) % 6;
    (0..n).map(|_| point(g)).collect()
}

/// Keys which the reader doesn't treat as structure.
const KEYS: &[&str] = &["layer", "tag", "group_id", "s", "g"];

/// Any string, squeezed into a single non-empty token.
fn token(g: &mut Gen) -> String {
    let t = String::arbitrary(g)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>();
    if t.is_empty() {
        "x".to_owned()
    } else {
        t
    }
}

fn attributes(g: &mut Gen, i: usize) -> Attributes {
    let name = if bool::arbitrary(g) {
        token(g)
    } else {
        format!("object_{i}")
    };
    let mut attrs = Attributes::new(name);
    for _ in 0..usize::arbitrary(g) % 3 {
        let key = *g.choose(KEYS).unwrap();
        let value = match u8::arbitrary(g) % 2 {
            0 => Value::from(token(g)),
            _ => Value::List((0..1 + usize::arbitrary(g) % 3).map(|_| token(g)).collect()),
        };
        attrs.insert(key, value);
    }
    attrs
}

/// What a reader can recover from a drawable and its attributes.
fn flat((drawable, attrs): &(Drawable, Attributes)) -> (Drawable, String) {
    let points = drawable
        .points()
        .into_iter()
        .map(|p| Point::new(p.x(), p.y()))
        .collect();
    let drawable = Drawable::from_points(drawable.kind(), points).unwrap();
    (drawable, attrs.name().to_owned())
}

impl Arbitrary for Scene {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % 10;
        Scene(
            (0..len)
                .map(|i| {
                    let drawable = match u8::arbitrary(g) % 4 {
                        0 => Drawable::Point(point(g)),
                        1 => Drawable::Line(Line::new(point(g), point(g))),
                        2 => Drawable::Wireframe(Wireframe::new(points(g)).unwrap()),
                        _ => Drawable::Polygon(Polygon::new(points(g)).unwrap()),
                    };
                    (drawable, attributes(g, i))
                })
                .collect(),
        )
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let objects = self.0.clone();
        Box::new((0..objects.len()).map(move |skip| {
            let mut fewer = objects.clone();
            fewer.remove(skip);
            Scene(fewer)
        }))
    }
}

fn write(scene: &Scene, path: &std::path::Path) -> ObjFile {
    let mut file = ObjFile::open(path, Mode::WriteTruncate).unwrap();
    for (drawable, attrs) in &scene.0 {
        file.append(drawable, attrs.clone()).unwrap();
    }
    file
}

fn in_bounds(file: &ObjFile) -> bool {
    let len = file.vertices().len();
    file.descriptors()
        .iter()
        .flat_map(|d| d.geometry.indexes())
        .all(|&i| i >= 1 && i <= len)
}

#[quickcheck]
fn round_trip(scene: Scene) -> bool {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scene.obj");
    write(&scene, &path).close().unwrap();

    let Ok(file) = ObjFile::open(&path, Mode::Read) else {
        return false;
    };
    let Ok(read) = file.read_all() else {
        return false;
    };
    // depth and free-form attributes aren't read back
    read.iter().map(flat).eq(scene.0.iter().map(flat))
        && read.iter().all(|(_, attrs)| attrs.is_empty())
}

#[quickcheck]
fn indexes_are_one_based(scene: Scene) -> bool {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scene.obj");
    let file = write(&scene, &path);

    // every point gets a fresh vertex
    let total = scene.0.iter().map(|(d, _)| d.points().len()).sum::<usize>();
    let written = in_bounds(&file) && file.vertices().len() == total;
    file.close().unwrap();

    let reopened = ObjFile::open(&path, Mode::Read).unwrap();
    written && in_bounds(&reopened)
}

#[quickcheck]
fn appends_keep_existing_objects(first: Scene, second: Scene) -> bool {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scene.obj");
    write(&first, &path).close().unwrap();

    let mut file = ObjFile::open(&path, Mode::ReadWrite).unwrap();
    for (drawable, attrs) in &second.0 {
        file.append(drawable, attrs.clone()).unwrap();
    }
    file.close().unwrap();

    let read = ObjFile::open(&path, Mode::Read).unwrap().read_all().unwrap();
    read.iter()
        .map(flat)
        .eq(first.0.iter().chain(&second.0).map(flat))
}
