use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use tracing::{debug, info};

use super::dictionary::{Dictionary, PrefixIndex};
use super::grid::Grid;
use super::search::{PathSearch, Pruning};
use super::util::Position;

/// Runs one independent search per starting cell and merges the results
pub struct Solver<'a> {
    grid: &'a Grid,
    dictionary: &'a Dictionary,
    prefixes: &'a PrefixIndex,
    pruning: Pruning,
}

impl<'a> Solver<'a> {
    pub fn new(grid: &'a Grid, dictionary: &'a Dictionary, prefixes: &'a PrefixIndex) -> Self {
        Self {
            grid,
            dictionary,
            prefixes,
            pruning: Pruning::default(),
        }
    }

    pub fn with_pruning(mut self, pruning: Pruning) -> Self {
        self.pruning = pruning;
        self
    }

    fn search(&self) -> PathSearch<'a> {
        PathSearch::new(self.grid, self.dictionary, self.prefixes).with_pruning(self.pruning)
    }

    /// Words reachable from a single starting cell
    pub fn solve_from(&self, start: Position) -> BTreeSet<String> {
        let found = self.search().solve(start);
        debug!(%start, words = found.len(), "searched cell");
        found
    }

    /// Words reachable from any cell, visiting starts in row-major order
    pub fn solve_all(&self) -> BTreeSet<String> {
        let start_time = Instant::now();
        let mut words = BTreeSet::new();
        for start in self.grid.positions() {
            words.extend(self.solve_from(start));
        }
        info!(
            words = words.len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "solved grid"
        );
        words
    }

    /// Same result as `solve_all`, with one rayon task per starting cell.
    /// Each task owns its search state; the sets are merged once they finish
    pub fn solve_all_parallel(&self) -> BTreeSet<String> {
        let start_time = Instant::now();
        let starts = self.grid.positions().collect::<Vec<_>>();
        let words = starts
            .into_par_iter()
            .map(|start| self.solve_from(start))
            .reduce(BTreeSet::new, |mut acc, found| {
                acc.extend(found);
                acc
            });
        info!(
            words = words.len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "solved grid in parallel"
        );
        words
    }

    /// Words reachable from a single starting cell with the path that spelled each
    pub fn solve_from_with_paths(&self, start: Position) -> BTreeMap<String, Vec<Position>> {
        let found = self.search().solve_with_paths(start);
        debug!(%start, words = found.len(), "searched cell");
        found
    }

    /// Every word with one path spelling it. When a word can be found from
    /// several cells, the path from the earliest cell in row-major order wins
    pub fn solve_all_with_paths(&self) -> BTreeMap<String, Vec<Position>> {
        let mut words = BTreeMap::new();
        for start in self.grid.positions() {
            for (word, path) in self.solve_from_with_paths(start) {
                words.entry(word).or_insert(path);
            }
        }
        words
    }
}
