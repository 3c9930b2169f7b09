use std::fmt;
use std::path::Path;

use ndarray::Array2;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::Rng;

use super::error::BoggleError;
use super::util::Position;
use crate::utils::serialization;

/// Value of a cell that has not been populated yet
pub const UNSET: char = '\0';

/// Letter grid for a single puzzle. Cells are addressed by `(x, y)` with x
/// running along a row and y down the columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Letters indexed as [[y, x]]
    cells: Array2<char>,
}

impl Grid {
    /// Creates a grid with every cell cleared to `UNSET`
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: Array2::from_elem((height, width), UNSET),
        }
    }

    /// Builds a grid from one string per row. Whitespace inside a row is ignored
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, BoggleError> {
        let rows = rows
            .iter()
            .map(|r| {
                r.as_ref()
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        let width = rows.first().map_or(0, |r| r.len());
        let mut grid = Self::new(width, rows.len());

        for (y, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(BoggleError::RaggedRow {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }
            for (x, c) in row.into_iter().enumerate() {
                grid.set(x, y, c)?;
            }
        }
        Ok(grid)
    }

    /// Builds an NxN grid from single letters given in row-major order
    pub fn from_letters<S: AsRef<str>>(letters: &[S]) -> Result<Self, BoggleError> {
        let dim = (letters.len() as f64).sqrt() as usize;
        if dim * dim != letters.len() {
            return Err(BoggleError::NotSquare(letters.len()));
        }

        let mut grid = Self::new(dim, dim);
        for (i, letter) in letters.iter().enumerate() {
            let (x, y) = (i % dim, i / dim);
            grid.set(x, y, single_letter(letter.as_ref(), x, y)?)?;
        }
        Ok(grid)
    }

    /// Reads a grid stored as a JSON array of rows, each row an array of
    /// one letter strings
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, BoggleError> {
        let raw_grid: Vec<Vec<String>> = serialization::load_json(path)?;
        let width = raw_grid.first().map_or(0, |r| r.len());
        let mut grid = Self::new(width, raw_grid.len());

        for (y, row) in raw_grid.iter().enumerate() {
            if row.len() != width {
                return Err(BoggleError::RaggedRow {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }
            for (x, cell) in row.iter().enumerate() {
                grid.set(x, y, single_letter(cell, x, y)?)?;
            }
        }
        Ok(grid)
    }

    /// Fills a grid with letters drawn uniformly from a to z
    pub fn random<R: Rng>(width: usize, height: usize, rng: &mut R) -> Self {
        let letters = Uniform::new_inclusive(b'a', b'z');
        let bytes: Array2<u8> = Array2::random_using((height, width), letters, rng);
        Self {
            cells: bytes.mapv(char::from),
        }
    }

    /// Returns (width, height)
    pub fn dimensions(&self) -> (usize, usize) {
        let (height, width) = self.cells.dim();
        (width, height)
    }

    pub fn contains(&self, pos: Position) -> bool {
        let (width, height) = self.dimensions();
        pos.x < width && pos.y < height
    }

    pub fn get(&self, x: usize, y: usize) -> Result<char, BoggleError> {
        self.check_bounds(x, y)?;
        Ok(self.cells[[y, x]])
    }

    pub fn set(&mut self, x: usize, y: usize, letter: char) -> Result<(), BoggleError> {
        self.check_bounds(x, y)?;
        self.cells[[y, x]] = letter;
        Ok(())
    }

    /// Every cell position in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let (width, height) = self.dimensions();
        (0..height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }

    /// True once no cell holds `UNSET`
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(|&c| c != UNSET)
    }

    /// Applies `f` to every letter in place
    pub fn map_letters(&mut self, f: impl Fn(char) -> char) {
        self.cells.mapv_inplace(f);
    }

    fn check_bounds(&self, x: usize, y: usize) -> Result<(), BoggleError> {
        let (width, height) = self.dimensions();
        if x >= width || y >= height {
            return Err(BoggleError::OutOfBounds {
                x,
                y,
                width,
                height,
            });
        }
        Ok(())
    }
}

fn single_letter(value: &str, x: usize, y: usize) -> Result<char, BoggleError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(BoggleError::InvalidCell {
            x,
            y,
            value: value.to_string(),
        }),
    }
}

impl std::ops::Index<Position> for Grid {
    type Output = char;

    fn index(&self, index: Position) -> &Self::Output {
        &self.cells[[index.y, index.x]]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.rows() {
            let line = row
                .iter()
                .map(|&c| if c == UNSET { '.' } else { c })
                .map(String::from)
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
