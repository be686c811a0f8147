use std::{
    fmt,
    fs::{File, OpenOptions},
    io::{BufReader, BufWriter, Seek, SeekFrom, Write},
    iter::FusedIterator,
    path::{Path, PathBuf},
    str::FromStr,
};

use flatobj_shapes::Drawable;

use crate::{
    de, ser, Attributes, Error, Geometry, Globals, ObjectDescriptor, Result, Value, VertexTable,
};

/// How an [ObjFile] is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Parse an existing file; the scene can only be read.
    Read,
    /// Parse an existing file; objects may be appended, and the whole scene is rewritten on close.
    ReadWrite,
    /// Create a new file, failing if it already exists.
    Write,
    /// Create a file, truncating it if it already exists.
    WriteTruncate,
}

impl Mode {
    #[inline]
    pub fn can_read(self) -> bool {
        matches!(self, Mode::Read | Mode::ReadWrite)
    }

    #[inline]
    pub fn can_write(self) -> bool {
        !matches!(self, Mode::Read)
    }

    fn options(self) -> OpenOptions {
        let mut opts = OpenOptions::new();
        match self {
            Mode::Read => opts.read(true),
            Mode::ReadWrite => opts.read(true).write(true),
            Mode::Write => opts.write(true).create_new(true),
            Mode::WriteTruncate => opts.write(true).create(true).truncate(true),
        };
        opts
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Read => f.write_str("read"),
            Mode::ReadWrite => f.write_str("read-write"),
            Mode::Write => f.write_str("write"),
            Mode::WriteTruncate => f.write_str("write-truncate"),
        }
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "read" => Ok(Mode::Read),
            "read-write" => Ok(Mode::ReadWrite),
            "write" => Ok(Mode::Write),
            "write-truncate" => Ok(Mode::WriteTruncate),
            _ => Err(Error::InvalidMode(s.to_owned())),
        }
    }
}

/// Directive heads which an attribute can't use without being misread as structure.
const RESERVED: &[&str] = &["v", "o", "p", "l", "f", "mtllib"];

/// Directive heads which a global can't use, since globals are written before any object.
const RESERVED_GLOBALS: &[&str] = &["v", "o", "p", "l", "f", "usemtl"];

fn is_token(s: &str) -> bool {
    !s.is_empty() && !s.contains(char::is_whitespace)
}

/// Whether `key` can head a directive of its own without being read back as something else.
fn is_key(key: &str, reserved: &[&str]) -> bool {
    is_token(key) && !key.starts_with('#') && !reserved.contains(&key)
}

/// Whether `value` is written as one or more tokens on the directive's own line.
fn is_value(value: &Value) -> bool {
    let tokens = value.tokens();
    !tokens.is_empty() && tokens.iter().all(|t| is_token(t))
}

fn check_entries<'a>(
    mut entries: impl Iterator<Item = (&'a str, &'a Value)>,
    reserved: &[&str],
) -> Result<()> {
    match entries.find(|(k, v)| !is_key(k, reserved) || !is_value(v)) {
        Some((key, _)) => Err(Error::InvalidAttribute(key.to_owned())),
        None => Ok(()),
    }
}

/// A scene bound to an open OBJ file.
///
/// Files opened for reading are parsed immediately. Files opened for writing collect
/// [appended](Self::append) objects and are written when the session is [closed](Self::close) or
/// dropped, whichever comes first.
#[derive(Debug)]
pub struct ObjFile {
    file: Option<File>,
    path: PathBuf,
    mode: Mode,
    descriptors: Vec<ObjectDescriptor>,
    vertices: VertexTable,
    globals: Globals,
}

impl ObjFile {
    /// Open the file at `path`.
    ///
    /// # Errors
    ///
    /// * [`Io`](Error::Io) if the file can't be opened
    /// * Anything [parse](de::parse) returns, in [readable](Mode::can_read) modes
    pub fn open(path: impl AsRef<Path>, mode: Mode) -> Result<Self> {
        Self::open_with_globals(path, mode, Globals::new())
    }

    /// Open the file at `path`, with file-level directives to write alongside the scene (for
    /// example, an `mtllib`).
    ///
    /// In [ReadWrite](Mode::ReadWrite) mode, `globals` override those read from the file.
    ///
    /// # Errors
    ///
    /// * [`InvalidAttribute`](Error::InvalidAttribute) if a global's key isn't a single token or
    ///   names a structural directive, or its value isn't a non-empty list of single tokens.
    ///   Nothing is opened in this case.
    /// * Anything [open](Self::open) returns
    pub fn open_with_globals(path: impl AsRef<Path>, mode: Mode, globals: Globals) -> Result<Self> {
        check_entries(
            globals.iter().map(|(k, v)| (k.as_str(), v)),
            RESERVED_GLOBALS,
        )?;
        let path = path.as_ref().to_owned();
        let file = mode.options().open(&path)?;
        tracing::debug!(path = %path.display(), %mode, "opened OBJ file");

        let mut res = Self {
            file: None,
            path,
            mode,
            descriptors: Vec::new(),
            vertices: VertexTable::new(),
            globals: Globals::new(),
        };
        if mode.can_read() {
            let parsed = de::parse(BufReader::new(&file), &res.path)?;
            res.descriptors = parsed.descriptors;
            res.vertices = parsed.vertices;
            res.globals = parsed.globals;
        }
        res.globals.extend(globals);
        res.file = Some(file);
        Ok(res)
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn descriptors(&self) -> &[ObjectDescriptor] {
        &self.descriptors
    }

    #[inline]
    pub fn vertices(&self) -> &VertexTable {
        &self.vertices
    }

    #[inline]
    pub fn globals(&self) -> &Globals {
        &self.globals
    }

    /// Iterate through each object as a drawable and its attributes.
    ///
    /// Vertex indices are resolved as the iterator advances, so an out-of-range index is
    /// reported by the item that uses it.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            vertices: &self.vertices,
            descriptors: self.descriptors.iter(),
        }
    }

    /// Every object in the file, as a drawable and its attributes.
    ///
    /// # Errors
    ///
    /// * [`ModeViolation`](Error::ModeViolation) if the file wasn't opened for reading
    /// * [`IndexOutOfRange`](Error::IndexOutOfRange) if an object refers to a missing vertex
    pub fn read_all(&self) -> Result<Vec<(Drawable, Attributes)>> {
        if !self.mode.can_read() {
            return Err(Error::ModeViolation {
                operation: "read",
                mode: self.mode,
            });
        }
        self.iter()
            .map(|res| res.map(|(d, attrs)| (d, attrs.clone())))
            .collect()
    }

    /// Add a drawable to the scene.
    ///
    /// Each of the drawable's points is added to the vertex table as a new vertex, even if an
    /// identical one is already present.
    ///
    /// # Errors
    ///
    /// * [`ModeViolation`](Error::ModeViolation) if the file wasn't opened for writing
    /// * [`InvalidName`](Error::InvalidName) if the object's name isn't a single token
    /// * [`InvalidAttribute`](Error::InvalidAttribute) if an attribute key isn't a single token,
    ///   would be read back as a structural directive, or its value isn't a non-empty list of
    ///   single tokens
    pub fn append(&mut self, drawable: &Drawable, attributes: Attributes) -> Result<()> {
        if !self.mode.can_write() {
            return Err(Error::ModeViolation {
                operation: "append to",
                mode: self.mode,
            });
        }
        if !is_token(attributes.name()) {
            return Err(Error::InvalidName(attributes.name().to_owned()));
        }
        check_entries(attributes.iter(), RESERVED)?;

        let kind = drawable.kind();
        let indexes = drawable
            .points()
            .into_iter()
            .map(|p| self.vertices.push(p))
            .collect::<Vec<_>>();
        let count = indexes.len();
        let geometry = Geometry::from_parts(kind, indexes).ok_or_else(|| Error::InvalidArity {
            object: attributes.name().to_owned(),
            kind,
            count,
        })?;
        tracing::trace!(name = attributes.name(), %kind, "appended object");
        self.descriptors
            .push(ObjectDescriptor::new(geometry, attributes));
        Ok(())
    }

    /// Write the scene, if needed, and close the file.
    ///
    /// The scene is only written in writable modes, and only if it contains at least one object.
    ///
    /// Dropping an [ObjFile] does the same, but can't report errors.
    pub fn close(mut self) -> Result<()> {
        self.finish()
    }

    fn finish(&mut self) -> Result<()> {
        let Some(mut file) = self.file.take() else {
            return Ok(());
        };
        if self.mode.can_write() && !self.descriptors.is_empty() {
            if self.mode == Mode::ReadWrite {
                file.set_len(0)?;
                file.seek(SeekFrom::Start(0))?;
            }
            let mut out = BufWriter::new(&mut file);
            ser::write(&mut out, &self.descriptors, &self.vertices, &self.globals)?;
            out.flush()?;
        }
        tracing::debug!(path = %self.path.display(), objects = self.descriptors.len(), "closed OBJ file");
        Ok(())
    }
}

impl Drop for ObjFile {
    fn drop(&mut self) {
        if let Err(e) = self.finish() {
            tracing::error!(path = %self.path.display(), error = %e, "couldn't write OBJ file");
        }
    }
}

impl<'f> IntoIterator for &'f ObjFile {
    type Item = Result<(Drawable, &'f Attributes)>;
    type IntoIter = Iter<'f>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the objects of an [ObjFile], as drawables.
#[derive(Debug, Clone)]
pub struct Iter<'f> {
    vertices: &'f VertexTable,
    descriptors: std::slice::Iter<'f, ObjectDescriptor>,
}

impl<'f> Iter<'f> {
    fn drawable(&self, desc: &ObjectDescriptor) -> Result<Drawable> {
        let points = desc
            .geometry
            .indexes()
            .iter()
            .map(|&index| {
                self.vertices
                    .get(index)
                    .copied()
                    .ok_or_else(|| Error::IndexOutOfRange {
                        object: desc.name().to_owned(),
                        index,
                        len: self.vertices.len(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Drawable::from_points(desc.kind(), points)?)
    }
}

impl<'f> Iterator for Iter<'f> {
    type Item = Result<(Drawable, &'f Attributes)>;

    fn next(&mut self) -> Option<Self::Item> {
        let desc = self.descriptors.next()?;
        Some(self.drawable(desc).map(|d| (d, &desc.attributes)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.descriptors.size_hint()
    }
}

impl<'f> ExactSizeIterator for Iter<'f> {}

impl<'f> FusedIterator for Iter<'f> {}
