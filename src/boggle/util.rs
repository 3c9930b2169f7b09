use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Neighbor offsets as `(dx, dy)`, in the order the search visits them:
/// the column to the left top to bottom, the cells above and below, then the
/// column to the right top to bottom.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Shifts the position by the given offset. Returns None when either
    /// coordinate would go negative; the upper bound is the grid's business
    pub fn offset(&self, dx: isize, dy: isize) -> Option<Position> {
        Some(Position {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }

    /// All 8 surrounding positions that do not fall off the top or left edge
    pub fn neighbors(self) -> impl Iterator<Item = Position> {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(move |&(dx, dy)| self.offset(dx, dy))
    }

    /// Checks for 8-neighbor adjacency. A position is not adjacent to itself
    pub fn is_adjacent(&self, other: &Position) -> bool {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        dx <= 1 && dy <= 1 && (dx, dy) != (0, 0)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl FromStr for Position {
    type Err = String;

    /// Parses the `x,y` form used on the command line
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| format!("expected X,Y but got {:?}", s))?;
        let x = x.trim().parse().map_err(|e| format!("bad x in {:?}: {}", s, e))?;
        let y = y.trim().parse().map_err(|e| format!("bad y in {:?}: {}", s, e))?;
        Ok(Position::new(x, y))
    }
}
