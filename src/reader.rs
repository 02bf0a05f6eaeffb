// Reader for the per-element scaled-DCS data files.
//
// Each element Z has one whitespace-delimited text file named br{Z}. The
// data directory is an explicit constructor argument; reference data is
// never located through ambient environment state.

use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::data::MAX_TABULATED_Z;

/// Raw 2D scaled-DCS grid for one element, as read from storage.
///
/// `x` is the natural log of the incident kinetic energy in MeV, `y` the
/// ratio of emitted photon energy to incident energy in (0, 1], and `value`
/// the scaled DCS in millibarn, row-major by x then y.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawElementTable {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub value: Vec<f64>,
}

impl RawElementTable {
    /// Check the shape and ordering invariants. Violations are fatal
    /// construction errors, never runtime branches.
    pub fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.x.len() < 2 || self.y.len() < 2 {
            return Err(format!(
                "table needs at least 2 points per axis, got {}x{}",
                self.x.len(),
                self.y.len()
            )
            .into());
        }
        if self.value.len() != self.x.len() * self.y.len() {
            return Err(format!(
                "value count {} does not match grid shape {}x{}",
                self.value.len(),
                self.x.len(),
                self.y.len()
            )
            .into());
        }
        if !strictly_increasing(&self.x) {
            return Err("energy axis is not strictly increasing".into());
        }
        if !strictly_increasing(&self.y) {
            return Err("photon energy ratio axis is not strictly increasing".into());
        }
        if self.y[0] <= 0.0 || self.y[self.y.len() - 1] > 1.0 {
            return Err(format!(
                "photon energy ratios must lie in (0, 1], got [{}, {}]",
                self.y[0],
                self.y[self.y.len() - 1]
            )
            .into());
        }
        Ok(())
    }
}

fn strictly_increasing(values: &[f64]) -> bool {
    values.windows(2).all(|pair| pair[0] < pair[1])
}

/// Reads per-element table files from a data directory.
pub struct TableReader {
    data_dir: PathBuf,
}

impl TableReader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        TableReader {
            data_dir: data_dir.into(),
        }
    }

    /// Load the table for an atomic number in [1, 99].
    pub fn read(&self, atomic_number: u32) -> Result<RawElementTable, Box<dyn std::error::Error>> {
        if atomic_number == 0 || atomic_number > MAX_TABULATED_Z {
            return Err(format!(
                "no tabulated data for atomic number {} (files cover 1-{})",
                atomic_number, MAX_TABULATED_Z
            )
            .into());
        }

        let path = self.data_dir.join(format!("br{}", atomic_number));
        let text = fs::read_to_string(&path)
            .map_err(|err| format!("could not open {}: {}", path.display(), err))?;
        Self::parse(&text).map_err(|err| format!("{}: {}", path.display(), err).into())
    }

    /// Parse one table stream: three integer tokens (format tag, x count,
    /// y count) followed by the x values, the y values, and the row-major
    /// value matrix.
    pub fn parse(text: &str) -> Result<RawElementTable, Box<dyn std::error::Error>> {
        let mut tokens = text.split_whitespace();

        let _format_tag: u32 = next_token(&mut tokens, "format tag")?;
        let x_size: usize = next_token(&mut tokens, "x count")?;
        let y_size: usize = next_token(&mut tokens, "y count")?;
        if x_size < 2 || y_size < 2 {
            return Err(format!("number of bins is too small: {}x{}", x_size, y_size).into());
        }

        let mut table = RawElementTable {
            x: Vec::with_capacity(x_size),
            y: Vec::with_capacity(y_size),
            value: Vec::with_capacity(x_size * y_size),
        };
        for _ in 0..x_size {
            table.x.push(next_token(&mut tokens, "x value")?);
        }
        for _ in 0..y_size {
            table.y.push(next_token(&mut tokens, "y value")?);
        }
        for _ in 0..x_size * y_size {
            table.value.push(next_token(&mut tokens, "matrix value")?);
        }

        table.validate()?;
        Ok(table)
    }
}

fn next_token<T: FromStr>(
    tokens: &mut std::str::SplitWhitespace<'_>,
    what: &str,
) -> Result<T, Box<dyn std::error::Error>>
where
    T::Err: std::fmt::Display,
{
    let token = tokens
        .next()
        .ok_or_else(|| format!("truncated stream while reading {}", what))?;
    token
        .parse()
        .map_err(|err| format!("bad {} token '{}': {}", what, token, err).into())
}
