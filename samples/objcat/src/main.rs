use std::path::{Path, PathBuf};

use clap::Parser;
use flatobj::{shapes::Drawable, Globals, Mode, ObjFile, Value};

mod cli;
use cli::{Cli, Command};

#[derive(Debug, thiserror::Error)]
enum Error {
    #[error("{path:?}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: flatobj::Error,
    },
    #[error("couldn't locate {path:?}: {source}")]
    Locate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn in_file(path: &Path) -> impl FnOnce(flatobj::Error) -> Error + '_ {
    move |source| Error::File {
        path: path.to_owned(),
        source,
    }
}

fn describe(drawable: &Drawable) -> String {
    drawable
        .points()
        .iter()
        .map(|p| match p.z {
            Some(z) => format!("({}, {}, {})", p.x(), p.y(), z),
            None => format!("({}, {})", p.x(), p.y()),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn list(path: &Path) -> Result<(), Error> {
    let file = ObjFile::open(path, Mode::Read).map_err(in_file(path))?;
    println!("{}:", path.display());
    for object in &file {
        let (drawable, attrs) = object.map_err(in_file(path))?;
        print!("  {} {}", drawable.kind(), attrs.name());
        if let Some(c) = attrs.color() {
            print!(" #{:02x}{:02x}{:02x}", c.x, c.y, c.z);
        }
        println!(": {}", describe(&drawable));
    }
    Ok(())
}

fn directory(file: &Path) -> Result<PathBuf, Error> {
    let dir = match file.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    dir.canonicalize().map_err(|source| Error::Locate {
        path: dir.to_owned(),
        source,
    })
}

/// `mtllib` paths are relative to the file that names them, so they're made absolute when the
/// copy lands in another directory.
fn rebase_libraries(globals: &Globals, input: &Path, output: &Path) -> Result<Globals, Error> {
    let (from, to) = (directory(input)?, directory(output)?);
    let mut res = globals.clone();
    let Some(libs) = globals.get("mtllib") else {
        return Ok(res);
    };
    if from == to {
        return Ok(res);
    }
    let rebased = libs
        .tokens()
        .into_iter()
        .map(|name| -> Result<String, Error> {
            let path = from.join(&name);
            let path = path.canonicalize().map_err(|source| Error::Locate {
                path: path.clone(),
                source,
            })?;
            tracing::debug!(library = %name, to = %path.display(), "rebased material library");
            Ok(path.to_string_lossy().into_owned())
        })
        .collect::<Result<Vec<_>, _>>()?;
    res.insert("mtllib".to_owned(), Value::List(rebased));
    Ok(res)
}

fn copy(input: &Path, output: &Path, truncate: bool) -> Result<(), Error> {
    let src = ObjFile::open(input, Mode::Read).map_err(in_file(input))?;
    let mode = if truncate {
        Mode::WriteTruncate
    } else {
        Mode::Write
    };
    let globals = rebase_libraries(src.globals(), input, output)?;
    let mut dst = ObjFile::open_with_globals(output, mode, globals).map_err(in_file(output))?;
    for (drawable, attrs) in src.read_all().map_err(in_file(input))? {
        dst.append(&drawable, attrs).map_err(in_file(output))?;
    }
    tracing::info!(
        objects = dst.descriptors().len(),
        output = %output.display(),
        "copied scene"
    );
    dst.close().map_err(in_file(output))
}

pub fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    cli::initialize_tracing(&cli.log_filter, cli.log_format);

    let res = match &cli.command {
        Command::List { files } => files.iter().try_for_each(|f| list(f)),
        Command::Copy {
            input,
            output,
            truncate,
        } => copy(input, output, *truncate),
    };

    match res {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            std::process::ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use flatobj::shapes::{Color, Drawable, Point};
    use tempfile::TempDir;

    use super::*;

    fn scene_with_library(dir: &Path) -> PathBuf {
        fs::write(dir.join("colors.mtl"), "newmtl red\nKd 1 0 0\n").unwrap();
        let path = dir.join("scene.obj");
        fs::write(&path, "mtllib colors.mtl\nv 0 0\no dot\nusemtl red\np 1\n").unwrap();
        path
    }

    #[test]
    fn copies_resolve_libraries_elsewhere() {
        let dir = TempDir::new().unwrap();
        let input = scene_with_library(dir.path());
        fs::create_dir(dir.path().join("out")).unwrap();
        let output = dir.path().join("out").join("scene.obj");

        copy(&input, &output, false).unwrap();

        let file = ObjFile::open(&output, Mode::Read).unwrap();
        let objects = file.read_all().unwrap();
        assert_eq!(objects[0].0, Drawable::from(Point::new(0.0, 0.0)));
        assert_eq!(objects[0].1.name(), "dot");
        assert_eq!(objects[0].1.color(), Some(Color::new(255, 0, 0)));
        let libs = file.globals()["mtllib"].tokens();
        assert!(Path::new(&libs[0]).is_absolute());
    }

    #[test]
    fn libraries_stay_relative_beside_the_input() {
        let dir = TempDir::new().unwrap();
        let input = scene_with_library(dir.path());
        let output = dir.path().join("copy.obj");

        copy(&input, &output, false).unwrap();

        let file = ObjFile::open(&output, Mode::Read).unwrap();
        assert_eq!(file.globals()["mtllib"], Value::List(vec!["colors.mtl".to_owned()]));
        assert_eq!(file.read_all().unwrap().len(), 1);
    }
}
