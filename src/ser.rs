//! Writing scenes as OBJ text.
//!
//! Output is laid out as the [parser](crate::de) expects it: every vertex first, then file-level
//! directives, then each object with its attributes and a single geometry statement.
//!
//! Vertices are written as `v x y z 1.0`; `z` is `1.0` for points without depth.

use std::io::{self, Write};

use crate::{Attributes, Geometry, Globals, ObjectDescriptor, Value, VertexTable};

fn write_directive<W: Write>(out: &mut W, head: &str, value: &Value) -> io::Result<()> {
    out.write_all(head.as_bytes())?;
    for token in value.tokens() {
        write!(out, " {token}")?;
    }
    out.write_all(b"\n")
}

fn write_indexes<W: Write>(out: &mut W, head: &str, indexes: &[usize]) -> io::Result<()> {
    out.write_all(head.as_bytes())?;
    for i in indexes {
        write!(out, " {i}")?;
    }
    out.write_all(b"\n")
}

/// Write a scene to `out`.
///
/// Colors aren't written; they come back through `usemtl` and the scene's `mtllib`.
#[tracing::instrument(skip_all, fields(objects = descriptors.len(), vertices = vertices.len()))]
pub fn write<W: Write>(
    out: &mut W,
    descriptors: &[ObjectDescriptor],
    vertices: &VertexTable,
    globals: &Globals,
) -> io::Result<()> {
    // `{:?}` gives the shortest representation that parses back to the same f64
    for p in vertices {
        writeln!(out, "v {:?} {:?} {:?} 1.0", p.x(), p.y(), p.z.unwrap_or(1.0))?;
    }

    for (head, value) in globals {
        write_directive(out, head, value)?;
    }

    for desc in descriptors {
        writeln!(out, "o {}", desc.name())?;
        for (key, value) in desc.attributes.iter() {
            if key == Attributes::COLOR {
                continue;
            }
            write_directive(out, key, value)?;
        }
        match &desc.geometry {
            Geometry::Point(i) => writeln!(out, "p {i}")?,
            Geometry::Line([a, b]) => writeln!(out, "l {a} {b}")?,
            Geometry::Wireframe(is) => write_indexes(out, "l", is)?,
            Geometry::Polygon(is) => write_indexes(out, "f", is)?,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use flatobj_shapes::{Color, Point};

    use super::*;

    fn to_string(descriptors: &[ObjectDescriptor], vertices: &VertexTable, globals: &Globals) -> String {
        let mut out = Vec::new();
        write(&mut out, descriptors, vertices, globals).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn layout() {
        let vertices = VertexTable::from_iter([
            Point::new(0.0, 0.0),
            Point::new(0.25, -3.5),
            Point::with_z(10.0, 1.0, 2.0),
        ]);
        let globals = Globals::from([(
            "mtllib".to_owned(),
            Value::List(vec!["a.mtl".to_owned(), "b.mtl".to_owned()]),
        )]);
        let descriptors = [
            ObjectDescriptor::new(Geometry::Point(1), Attributes::new("dot")),
            ObjectDescriptor::new(
                Geometry::Line([1, 2]),
                Attributes::new("edge")
                    .with("usemtl", "red")
                    .with("color", Color::new(255, 0, 0)),
            ),
            ObjectDescriptor::new(Geometry::Wireframe(vec![1, 2, 3]), Attributes::new("zig")),
            ObjectDescriptor::new(Geometry::Polygon(vec![3, 2, 1]), Attributes::new("tri")),
        ];

        assert_eq!(
            to_string(&descriptors, &vertices, &globals),
            "v 0.0 0.0 1.0 1.0\n\
             v 0.25 -3.5 1.0 1.0\n\
             v 10.0 1.0 2.0 1.0\n\
             mtllib a.mtl b.mtl\n\
             o dot\n\
             p 1\n\
             o edge\n\
             usemtl red\n\
             l 1 2\n\
             o zig\n\
             l 1 2 3\n\
             o tri\n\
             f 3 2 1\n"
        );
    }

    #[test]
    fn empty() {
        assert_eq!(to_string(&[], &VertexTable::new(), &Globals::new()), "");
    }
}
