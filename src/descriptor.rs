//! Format-neutral records describing one stored drawable.

use std::collections::BTreeMap;

use flatobj_shapes::{Color, ShapeKind};

/// File-level directives, echoed verbatim when a scene is written.
pub type Globals = BTreeMap<String, Value>;

/// The value of an object attribute or a global directive.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    List(Vec<String>),
    Color(Color),
}

impl Value {
    /// Flatten this value into the whitespace-separated tokens used to write it.
    pub fn tokens(&self) -> Vec<String> {
        match self {
            Value::Text(t) => vec![t.clone()],
            Value::List(l) => l.clone(),
            Value::Color(c) => vec![c.x.to_string(), c.y.to_string(), c.z.to_string()],
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            Value::Color(c) => Some(*c),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(t: &str) -> Self {
        Value::Text(t.to_owned())
    }
}

impl From<String> for Value {
    fn from(t: String) -> Self {
        Value::Text(t)
    }
}

impl From<Vec<String>> for Value {
    fn from(l: Vec<String>) -> Self {
        Value::List(l)
    }
}

impl From<Color> for Value {
    fn from(c: Color) -> Self {
        Value::Color(c)
    }
}

/// Named metadata attached to an object.
///
/// An object always has a name; every other attribute is optional.
#[derive(Debug, Clone, PartialEq)]
pub struct Attributes {
    name: String,
    values: BTreeMap<String, Value>,
}

impl Attributes {
    pub const NAME: &'static str = "name";
    pub const USEMTL: &'static str = "usemtl";
    pub const COLOR: &'static str = "color";

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Builder-style [insert](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set an attribute, returning its previous value.
    ///
    /// Setting [NAME](Self::NAME) renames the object instead; the old name is returned.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        if key == Self::NAME {
            let name = value.tokens().join(" ");
            return Some(Value::Text(std::mem::replace(&mut self.name, name)));
        }
        self.values.insert(key, value)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    /// The resolved material color, if any.
    pub fn color(&self) -> Option<Color> {
        self.get(Self::COLOR).and_then(Value::as_color)
    }

    /// Attributes other than the name, sorted by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of attributes, not counting the name.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The shape of an object and the 1-based [vertex table](crate::VertexTable) indices it's built
/// from.
///
/// Each variant carries exactly as many indices as its shape needs, so a geometry can't be
/// built with the wrong arity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Geometry {
    Point(usize),
    Line([usize; 2]),
    Wireframe(Vec<usize>),
    Polygon(Vec<usize>),
}

impl Geometry {
    /// Pair a kind with its indices, or `None` if `kind` doesn't accept `indexes.len()`.
    pub fn from_parts(kind: ShapeKind, indexes: Vec<usize>) -> Option<Self> {
        if !kind.accepts(indexes.len()) {
            return None;
        }
        Some(match kind {
            ShapeKind::Point => Geometry::Point(indexes[0]),
            ShapeKind::Line => Geometry::Line([indexes[0], indexes[1]]),
            ShapeKind::Wireframe => Geometry::Wireframe(indexes),
            ShapeKind::Polygon => Geometry::Polygon(indexes),
        })
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Geometry::Point(_) => ShapeKind::Point,
            Geometry::Line(_) => ShapeKind::Line,
            Geometry::Wireframe(_) => ShapeKind::Wireframe,
            Geometry::Polygon(_) => ShapeKind::Polygon,
        }
    }

    pub fn indexes(&self) -> &[usize] {
        match self {
            Geometry::Point(i) => std::slice::from_ref(i),
            Geometry::Line(ab) => ab,
            Geometry::Wireframe(is) | Geometry::Polygon(is) => is,
        }
    }
}

/// One stored object: its geometry and its attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectDescriptor {
    pub geometry: Geometry,
    pub attributes: Attributes,
}

impl ObjectDescriptor {
    pub fn new(geometry: Geometry, attributes: Attributes) -> Self {
        Self {
            geometry,
            attributes,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.attributes.name()
    }

    #[inline]
    pub fn kind(&self) -> ShapeKind {
        self.geometry.kind()
    }
}
