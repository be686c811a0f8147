//! Persistence for scenes of 2D drawables, in a line-oriented text format modeled on Wavefront's
//! OBJ, with colors resolved through material libraries.
//!
//! ```no_run
//! use flatobj::{Attributes, Mode, ObjFile};
//! use flatobj::shapes::{Drawable, Line, Point};
//!
//! # fn main() -> flatobj::Result<()> {
//! let mut scene = ObjFile::open("scene.obj", Mode::WriteTruncate)?;
//! let edge = Line::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
//! scene.append(&Drawable::Line(edge), Attributes::new("edge"))?;
//! scene.close()?;
//!
//! for object in &flatobj::open("scene.obj", "read")? {
//!     let (drawable, attributes) = object?;
//!     println!("{}: {:?}", attributes.name(), drawable);
//! }
//! # Ok(())
//! # }
//! ```
#![cfg_attr(not(debug_assertions), warn(missing_docs))]

pub mod de;
mod descriptor;
pub mod error;
mod file;
pub mod ser;
mod vertex;

pub use descriptor::*;
pub use error::{Error, Result};
pub use file::*;
pub use vertex::*;

pub use flatobj_shapes as shapes;

use std::path::Path;

/// Open the file at `path` in one of the modes `read`, `read-write`, `write`, or
/// `write-truncate`.
///
/// # Errors
///
/// * [`InvalidMode`](Error::InvalidMode) for any other `mode`, before the file is touched
/// * Anything [ObjFile::open] returns
pub fn open(path: impl AsRef<Path>, mode: &str) -> Result<ObjFile> {
    ObjFile::open(path, mode.parse()?)
}
