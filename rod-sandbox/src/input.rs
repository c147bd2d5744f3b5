use crate::{Result, SandboxError};
use rod_core::nalgebra::Point2;
use std::path::{Path, PathBuf};

/// Reads image points stored one per row as `x<delimiter>y`.
///
/// Blank lines and lines starting with `#` are skipped.
pub fn read_points(path: impl AsRef<Path>, delimiter: char) -> Result<Vec<Point2<f64>>> {
    let path = path.as_ref();
    parse_points(&read(path)?, delimiter).map_err(|(line, message)| SandboxError::Parse {
        path: path.to_owned(),
        line,
        message,
    })
}

/// Reads interpolation parameters separated by whitespace.
///
/// Text after a `#` on a line is ignored.
pub fn read_inputs(path: impl AsRef<Path>) -> Result<Vec<f64>> {
    let path = path.as_ref();
    parse_inputs(&read(path)?).map_err(|(line, message)| SandboxError::Parse {
        path: path.to_owned(),
        line,
        message,
    })
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| SandboxError::Io {
        path: PathBuf::from(path),
        source,
    })
}

/// Errors carry the 1-based line number.
fn parse_points(
    text: &str,
    delimiter: char,
) -> core::result::Result<Vec<Point2<f64>>, (usize, String)> {
    let mut points = vec![];
    for (index, line) in content_lines(text) {
        let mut fields = line.split(delimiter).map(str::trim);
        let mut coordinate = || -> core::result::Result<f64, String> {
            let field = fields
                .next()
                .ok_or_else(|| format!("expected two values separated by {:?}", delimiter))?;
            field
                .parse()
                .map_err(|e| format!("invalid coordinate {:?}: {}", field, e))
        };
        let x = coordinate().map_err(|message| (index, message))?;
        let y = coordinate().map_err(|message| (index, message))?;
        if fields.next().is_some() {
            return Err((index, "more than two values in row".to_owned()));
        }
        points.push(Point2::new(x, y));
    }
    Ok(points)
}

fn parse_inputs(text: &str) -> core::result::Result<Vec<f64>, (usize, String)> {
    let mut inputs = vec![];
    for (index, line) in content_lines(text) {
        for field in line.split_whitespace() {
            let t = field
                .parse()
                .map_err(|e| (index, format!("invalid input {:?}: {}", field, e)))?;
            inputs.push(t);
        }
    }
    Ok(inputs)
}

fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(index, line)| {
            let line = line.split('#').next().unwrap_or_default();
            (index + 1, line.trim())
        })
        .filter(|(_, line)| !line.is_empty())
}
