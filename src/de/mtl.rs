//! Material libraries.
//!
//! Only diffuse colors are understood:
//!
//! ```text
//! newmtl red
//! Kd 1.0 0.0 0.0
//! ```
//!
//! Every other statement is skipped.

use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use flatobj_shapes::{Color, Rgb};

use crate::{
    de::{parse_number, Directive},
    Error, Result,
};

/// Material name -> diffuse color, consulted while resolving `usemtl`.
#[derive(Debug, Clone, Default)]
pub struct Materials {
    colors: HashMap<String, Color>,
}

impl Materials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<Color> {
        self.colors.get(name).copied()
    }

    pub fn insert(&mut self, name: impl Into<String>, color: Color) -> Option<Color> {
        self.colors.insert(name.into(), color)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Load every material defined in the library at `path`.
    #[tracing::instrument(skip_all, fields(path = %path.display()))]
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let lib_err = |source| Error::MaterialLibrary {
            path: path.to_owned(),
            source,
        };
        let file = File::open(path).map_err(lib_err)?;
        let before = self.len();
        self.read(BufReader::new(file)).map_err(|e| match e {
            Error::Io(source) => lib_err(source),
            e => e,
        })?;
        tracing::debug!(count = self.len() - before, "loaded material library");
        Ok(())
    }

    /// Read material definitions from `reader`.
    pub fn read<R: BufRead>(&mut self, reader: R) -> Result<()> {
        let mut pending: Option<String> = None;
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let Some(dir) = Directive::split(i + 1, &line) else {
                continue;
            };
            match dir.head {
                "newmtl" => match dir.body.as_slice() {
                    [name, ..] => pending = Some((*name).to_owned()),
                    [] => return Err(dir.malformed()),
                },
                "Kd" => {
                    let (Some(name), [r, g, b, ..]) = (pending.take(), dir.body.as_slice()) else {
                        return Err(dir.malformed());
                    };
                    let kd: Rgb<f64> = Rgb::new(
                        parse_number(dir.line, r)?,
                        parse_number(dir.line, g)?,
                        parse_number(dir.line, b)?,
                    );
                    // `as` truncates toward zero and saturates, so 1.0 -> 255 and 0.999 -> 254
                    self.insert(name, kd.map(|c| (c * 255.0) as u8));
                }
                _ => {}
            }
        }
        Ok(())
    }
}
