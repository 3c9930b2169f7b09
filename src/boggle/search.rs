use std::collections::{BTreeMap, BTreeSet};

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::dictionary::{Dictionary, PrefixIndex};
use super::grid::Grid;
use super::util::Position;

/// Whether a path is abandoned as soon as its letters stop being a prefix of
/// some word, or only checked against the dictionary at every step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pruning {
    #[default]
    Prefix,
    /// Walks every simple path. Exponential in the grid size, only useful
    /// for tiny grids
    Exhaustive,
}

/*
    Depth first backtracking search over the grid from a single starting cell.
    The current word, the visited mask and the path are shared by the whole
    traversal and restored on the way out of every cell.
*/
pub struct PathSearch<'a> {
    grid: &'a Grid,
    dictionary: &'a Dictionary,
    prefixes: &'a PrefixIndex,
    pruning: Pruning,
    /// Letters along the current path
    word: String,
    /// Cells on the current path, indexed as [[y, x]]
    visited: Array2<bool>,
    /// Current path, in visit order
    path: Vec<Position>,
    /// Words found so far with the first path that spelled each one
    found: BTreeMap<String, Vec<Position>>,
}

impl<'a> PathSearch<'a> {
    pub fn new(grid: &'a Grid, dictionary: &'a Dictionary, prefixes: &'a PrefixIndex) -> Self {
        let (width, height) = grid.dimensions();
        Self {
            grid,
            dictionary,
            prefixes,
            pruning: Pruning::default(),
            word: String::new(),
            visited: Array2::from_elem((height, width), false),
            path: Vec::new(),
            found: BTreeMap::new(),
        }
    }

    pub fn with_pruning(mut self, pruning: Pruning) -> Self {
        self.pruning = pruning;
        self
    }

    /// Finds every dictionary word that can be traced from `start`.
    /// A start outside the grid finds nothing
    pub fn solve(self, start: Position) -> BTreeSet<String> {
        self.solve_with_paths(start).into_keys().collect()
    }

    /// Same as `solve`, but keeps the first path found for each word
    pub fn solve_with_paths(mut self, start: Position) -> BTreeMap<String, Vec<Position>> {
        if !self.prefixes.is_empty() {
            self.visit(start);
        }
        debug_assert!(self.word.is_empty() && self.path.is_empty());
        self.found
    }

    /// Walks the grid with an explicit stack of (cell, neighbors tried) frames
    /// so long paths cannot overflow the thread stack
    fn visit(&mut self, start: Position) {
        if !self.enter(start) {
            return;
        }
        let mut stack = vec![(start, 0usize)];
        while let Some(frame) = stack.last_mut() {
            let (pos, tried) = *frame;
            match pos.neighbors().nth(tried) {
                Some(next) => {
                    frame.1 += 1;
                    if self.enter(next) {
                        stack.push((next, 0));
                    }
                }
                None => {
                    stack.pop();
                    self.leave(pos);
                }
            }
        }
    }

    /// Tries to extend the current path with `pos`. Returns false, with the
    /// state untouched, when the cell is off the grid, already on the path or
    /// leads to no word
    fn enter(&mut self, pos: Position) -> bool {
        if !self.grid.contains(pos) {
            return false;
        }
        if self.visited[[pos.y, pos.x]] {
            return false;
        }

        self.word.push(self.grid[pos]);
        if self.pruning == Pruning::Prefix && !self.prefixes.contains_prefix(&self.word) {
            self.word.pop();
            return false;
        }

        debug_assert!(self.path.last().map_or(true, |last| last.is_adjacent(&pos)));
        self.visited[[pos.y, pos.x]] = true;
        self.path.push(pos);

        // A complete word does not stop the search, longer words may share the path
        if self.dictionary.contains(&self.word) && !self.found.contains_key(&self.word) {
            self.found.insert(self.word.clone(), self.path.clone());
        }
        true
    }

    fn leave(&mut self, pos: Position) {
        self.path.pop();
        self.visited[[pos.y, pos.x]] = false;
        self.word.pop();
    }
}
