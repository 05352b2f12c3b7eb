//! Plain-text matrix dumps: one line per row, values separated by single spaces.
//!
//! Reading is more lenient than writing. Any whitespace separates values, blank lines are
//! skipped, and `,` is accepted as a decimal separator.

use std::io::{self, BufRead, Write};

use matrix::DenseMatrix;

use crate::Error;

/// Writes `m` to `w`, one row per line.
pub fn write_matrix<W: Write>(m: &DenseMatrix, mut w: W) -> io::Result<()> {
    for row in m.iter_rows() {
        writeln!(w, "{}", format_row(&row))?;
    }
    Ok(())
}

/// The text [`write_matrix`] would produce, as a `String`.
pub fn to_text(m: &DenseMatrix) -> String {
    m.iter_rows()
        .map(|row| format_row(&row) + "\n")
        .collect()
}

fn format_row(row: &[f64]) -> String {
    row.iter()
        .map(f64::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Reads a matrix written by [`write_matrix`] (or by hand).
///
/// # Errors
/// * [`Error::Parse`] for a token that is not a number.
/// * [`Error::RaggedLine`] when lines hold different numbers of values.
/// * [`Error::Empty`] when there is no data at all.
/// * [`Error::Matrix`] when the values do not form a valid matrix under the active limits.
pub fn read_matrix<R: BufRead>(r: R) -> Result<DenseMatrix, Error> {
    let mut rows: Vec<Vec<f64>> = Vec::new();

    for (idx, line) in r.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;

        let row = line
            .split_whitespace()
            .map(|token| parse_value(token, line_no))
            .collect::<Result<Vec<f64>, Error>>()?;
        if row.is_empty() {
            continue;
        }

        if let Some(first) = rows.first() {
            if row.len() != first.len() {
                return Err(Error::RaggedLine {
                    line: line_no,
                    expected: first.len(),
                    found: row.len(),
                });
            }
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(Error::Empty);
    }
    Ok(DenseMatrix::from_rows(&rows)?)
}

pub fn parse_matrix(s: &str) -> Result<DenseMatrix, Error> {
    read_matrix(s.as_bytes())
}

fn parse_value(token: &str, line: usize) -> Result<f64, Error> {
    token
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| Error::Parse {
            line,
            token: token.to_string(),
        })
}
