//! Reading scenes from OBJ text.
//!
//! # Notes
//!
//! Only a small part of the OBJ format is understood:
//!
//! * `v x y [z ...]`: vertex; only `x` and `y` are kept
//! * `mtllib name...`: load [material libraries](mtl) relative to the source file
//! * `o name`: start a new object
//! * `usemtl name`: color the current object with a loaded material
//! * `p i`: the current object is a point
//! * `l i j [k ...]`: the current object is a line (two indices) or a wireframe (more)
//! * `f i j k [...]`: the current object is a polygon
//!
//! Anything else is skipped. Geometry before the first `o` belongs to an implicit object named
//! after the source file.
//!
//! # See Also
//!
//! * [Wavefront OBJ](https://en.wikipedia.org/wiki/Wavefront_.obj_file)

pub mod mtl;

use std::{io::BufRead, mem, path::Path, str::FromStr};

use flatobj_shapes::{Point, ShapeKind};

use crate::{
    Attributes, Error, Geometry, Globals, ObjectDescriptor, Result, Value, VertexTable,
};
use mtl::Materials;

/// Everything read from an OBJ stream.
#[derive(Debug, Clone, Default)]
pub struct Parsed {
    pub descriptors: Vec<ObjectDescriptor>,
    pub vertices: VertexTable,
    pub globals: Globals,
}

/// One non-blank, non-comment line, split into tokens.
pub(crate) struct Directive<'l> {
    pub line: usize,
    pub text: &'l str,
    pub head: &'l str,
    pub body: Vec<&'l str>,
}

impl<'l> Directive<'l> {
    pub fn split(line: usize, text: &'l str) -> Option<Self> {
        let mut words = text.split_whitespace();
        let head = words.next()?;
        if head.starts_with('#') {
            return None;
        }
        Some(Self {
            line,
            text: text.trim(),
            head,
            body: words.collect(),
        })
    }

    pub fn malformed(&self) -> Error {
        Error::MalformedDirective {
            line: self.line,
            directive: self.text.to_owned(),
        }
    }
}

pub(crate) fn parse_number<T: FromStr>(line: usize, token: &str) -> Result<T> {
    token.parse().map_err(|_| Error::InvalidNumber {
        line,
        token: token.to_owned(),
    })
}

/// An object which hasn't been finished yet.
#[derive(Debug)]
struct Partial {
    attributes: Attributes,
    kind: Option<ShapeKind>,
    indexes: Vec<usize>,
}

impl Partial {
    fn new(name: impl Into<String>) -> Self {
        Self {
            attributes: Attributes::new(name),
            kind: None,
            indexes: Vec::new(),
        }
    }

    /// `None` if no geometry was ever given.
    fn finish(self) -> Result<Option<ObjectDescriptor>> {
        let Some(kind) = self.kind else {
            return Ok(None);
        };
        let count = self.indexes.len();
        match Geometry::from_parts(kind, self.indexes) {
            Some(geometry) => Ok(Some(ObjectDescriptor::new(geometry, self.attributes))),
            None => Err(Error::InvalidArity {
                object: self.attributes.name().to_owned(),
                kind,
                count,
            }),
        }
    }

    fn add_geometry(&mut self, kind: ShapeKind, dir: &Directive<'_>) -> Result<()> {
        self.kind = Some(kind);
        for token in &dir.body {
            self.indexes.push(parse_number(dir.line, token)?);
        }
        Ok(())
    }
}

struct Parser<'src> {
    source: &'src Path,
    materials: Materials,
    current: Partial,
    parsed: Parsed,
}

impl<'src> Parser<'src> {
    fn new(source: &'src Path) -> Self {
        Self {
            source,
            materials: Materials::new(),
            current: Partial::new(implicit_name(source)),
            parsed: Parsed::default(),
        }
    }

    fn push(&mut self, partial: Partial) -> Result<()> {
        let name = partial.attributes.name().to_owned();
        match partial.finish()? {
            Some(desc) => {
                tracing::trace!(name = desc.name(), kind = %desc.kind(), "finished object");
                self.parsed.descriptors.push(desc);
            }
            None => tracing::debug!(name, "dropping object without geometry"),
        }
        Ok(())
    }

    fn directive(&mut self, dir: Directive<'_>) -> Result<()> {
        match (dir.head, dir.body.as_slice()) {
            ("mtllib", []) => return Err(dir.malformed()),
            ("mtllib", names) => {
                let base = self.source.parent().unwrap_or(Path::new(""));
                for name in names {
                    self.materials.load(&base.join(name))?;
                }
                let names = names.iter().map(|n| (*n).to_owned()).collect::<Vec<_>>();
                self.parsed
                    .globals
                    .insert("mtllib".to_owned(), Value::List(names));
            }
            ("v", [x, y, ..]) => {
                let p = Point::new(parse_number(dir.line, x)?, parse_number(dir.line, y)?);
                self.parsed.vertices.push(p);
            }
            ("o", [name, ..]) => {
                // objects are only kept once they've been given some geometry
                let prev = mem::replace(&mut self.current, Partial::new(*name));
                if prev.kind.is_some() {
                    self.push(prev)?;
                }
            }
            ("usemtl", [name, ..]) => {
                let color = self
                    .materials
                    .get(name)
                    .ok_or_else(|| Error::UnknownMaterial {
                        name: (*name).to_owned(),
                    })?;
                self.current.attributes.insert(Attributes::USEMTL, *name);
                self.current.attributes.insert(Attributes::COLOR, color);
            }
            ("p", [_, ..]) => {
                self.current.kind = Some(ShapeKind::Point);
                self.current.indexes.push(parse_number(dir.line, dir.body[0])?);
            }
            ("l", body) if body.len() >= 2 => {
                let kind = if body.len() > 2 {
                    ShapeKind::Wireframe
                } else {
                    ShapeKind::Line
                };
                self.current.add_geometry(kind, &dir)?;
            }
            ("f", body) if body.len() >= 3 => self.current.add_geometry(ShapeKind::Polygon, &dir)?,
            ("v" | "o" | "usemtl" | "p" | "l" | "f", _) => return Err(dir.malformed()),
            (head, _) => tracing::trace!(line = dir.line, head, "skipping unsupported directive"),
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Parsed> {
        let last = mem::replace(&mut self.current, Partial::new(""));
        self.push(last)?;
        Ok(self.parsed)
    }
}

/// The name given to geometry that comes before any `o` directive: the file name up to its first
/// `.`, with whitespace replaced by `_` so it can be written back as a single token.
fn implicit_name(source: &Path) -> String {
    let stem = source
        .file_name()
        .map(|n| n.to_string_lossy())
        .and_then(|n| n.split('.').next().map(str::to_owned))
        .unwrap_or_default();
    if stem.is_empty() {
        return IMPLICIT_FALLBACK.to_owned();
    }
    stem.chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

/// Implicit name for files whose name has nothing before its first `.`.
const IMPLICIT_FALLBACK: &str = "object";

/// Parse a scene from `reader`.
///
/// `source` is the path the text was read from; it names the implicit object and anchors relative
/// `mtllib` paths.
///
/// # Errors
///
/// * [`UnknownMaterial`](Error::UnknownMaterial) if `usemtl` names a material no library defined
/// * [`MalformedDirective`](Error::MalformedDirective) if a known directive is missing arguments
/// * [`InvalidNumber`](Error::InvalidNumber) if a coordinate or index can't be parsed
/// * [`InvalidArity`](Error::InvalidArity) if an object's indices don't fit its shape
/// * [`MaterialLibrary`](Error::MaterialLibrary) if a material library can't be read
/// * [`Io`](Error::Io) if `reader` fails
#[tracing::instrument(skip_all, fields(source = %source.display()))]
pub fn parse<R: BufRead>(reader: R, source: &Path) -> Result<Parsed> {
    let mut parser = Parser::new(source);
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(dir) = Directive::split(i + 1, &line) {
            parser.directive(dir)?;
        }
    }
    let parsed = parser.finish()?;
    tracing::debug!(
        objects = parsed.descriptors.len(),
        vertices = parsed.vertices.len(),
        "parsed scene"
    );
    Ok(parsed)
}
