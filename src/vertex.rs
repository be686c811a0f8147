use flatobj_shapes::Point;

/// Append-only table of points shared by every object in a scene.
///
/// Indices are 1-based, matching the OBJ format's own vertex references; index 0 is reserved and
/// never resolves. Indices are never reused or compacted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexTable {
    points: Vec<Point>,
}

impl VertexTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a point, returning its index.
    pub fn push(&mut self, p: Point) -> usize {
        self.points.push(p);
        self.points.len()
    }

    /// The point at a 1-based `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Point> {
        index.checked_sub(1).and_then(|i| self.points.get(i))
    }

    /// Number of stored points; also the greatest valid index.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate through stored points in index order, starting at index 1.
    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }
}

impl Extend<Point> for VertexTable {
    fn extend<I: IntoIterator<Item = Point>>(&mut self, iter: I) {
        self.points.extend(iter)
    }
}

impl FromIterator<Point> for VertexTable {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl<'t> IntoIterator for &'t VertexTable {
    type Item = &'t Point;
    type IntoIter = std::slice::Iter<'t, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
