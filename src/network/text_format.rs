//! Plain-text tensor format used for the trained parameter files.
//!
//! ```text
//! rows cols
//! v00 v01 ... v0(cols-1)
//! ...
//! v(rows-1)0 ...
//! ```
//!
//! The header is two integers; exactly `rows` data lines follow, each with
//! exactly `cols` whitespace-separated reals. Anything after the last declared
//! row is never read.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{DigitError, Result};
use crate::math::matrix::Matrix;

/// Parses one matrix from `reader`. `source_name` only labels errors.
pub fn read_matrix<R: BufRead>(reader: R, source_name: &str) -> Result<Matrix> {
    let mut lines = reader.lines();

    let header = match lines.next() {
        Some(line) => line.map_err(|e| DigitError::format(source_name, Some(1), e.to_string()))?,
        None => return Err(DigitError::format(source_name, Some(1), "missing \"rows cols\" header")),
    };
    let dims: Vec<&str> = header.split_whitespace().collect();
    if dims.len() != 2 {
        return Err(DigitError::format(
            source_name,
            Some(1),
            format!("header must hold exactly two integers, found {} tokens", dims.len()),
        ));
    }
    let parse_dim = |tok: &str| {
        tok.parse::<usize>().map_err(|_| {
            DigitError::format(source_name, Some(1), format!("invalid dimension {:?}", tok))
        })
    };
    let rows = parse_dim(dims[0])?;
    let cols = parse_dim(dims[1])?;

    if rows.checked_mul(cols).is_none() {
        return Err(DigitError::format(
            source_name,
            Some(1),
            format!("declared size {}x{} overflows", rows, cols),
        ));
    }

    // Grows with the rows actually present; the header alone is not trusted.
    let mut data = Vec::new();
    for i in 0..rows {
        let line_no = i + 2;
        let line = match lines.next() {
            Some(line) => line.map_err(|e| DigitError::format(source_name, Some(line_no), e.to_string()))?,
            None => {
                return Err(DigitError::format(
                    source_name,
                    Some(line_no),
                    format!("header declares {} rows but only {} are present", rows, i),
                ))
            }
        };

        let before = data.len();
        for tok in line.split_whitespace() {
            let value = tok.parse::<f64>().map_err(|_| {
                DigitError::format(source_name, Some(line_no), format!("invalid number {:?}", tok))
            })?;
            data.push(value);
        }
        let found = data.len() - before;
        if found != cols {
            return Err(DigitError::format(
                source_name,
                Some(line_no),
                format!("expected {} values, found {}", cols, found),
            ));
        }
    }

    Matrix::from_vec(rows, cols, data)
}

pub fn load_matrix(path: impl AsRef<Path>) -> Result<Matrix> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| DigitError::io(path, e))?;
    read_matrix(BufReader::new(file), &path.display().to_string())
}

/// Writes `m` in the text format. `f64`'s `Display` is the shortest string
/// that parses back to the same bits, so a write/read cycle is lossless.
pub fn write_matrix<W: Write>(mut writer: W, m: &Matrix) -> std::io::Result<()> {
    writeln!(writer, "{} {}", m.rows(), m.cols())?;
    for i in 0..m.rows() {
        let line: Vec<String> = m.row(i).iter().map(|v| v.to_string()).collect();
        writeln!(writer, "{}", line.join(" "))?;
    }
    writer.flush()
}

pub fn save_matrix(path: impl AsRef<Path>, m: &Matrix) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| DigitError::io(path, e))?;
    write_matrix(BufWriter::new(file), m).map_err(|e| DigitError::io(path, e))
}
