use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{info, warn, Level};

use crate::boggle::{CaseMode, Dictionary, Grid, Position, PrefixIndex, Pruning, Solver};
use crate::config::Config;
use crate::utils::serialization;

mod boggle;
mod config;
mod utils;

/// Finds every dictionary word that can be traced through a Boggle grid
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Grid letters in row-major order, either N*N single letters or one
    /// string per row
    #[arg(name = "LETTERS")]
    letters: Vec<String>,
    /// Word list, whitespace separated [default: dict.txt]
    #[arg(short, long)]
    dictionary: Option<PathBuf>,
    /// JSON grid file holding an array of rows of one letter strings
    #[arg(short, long, conflicts_with = "random")]
    grid: Option<PathBuf>,
    /// Play on a random NxN grid
    #[arg(long, value_name = "N")]
    random: Option<usize>,
    /// Seed for the random grid
    #[arg(long, requires = "random")]
    seed: Option<u64>,
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Only search from this cell
    #[arg(long, value_name = "X,Y")]
    start: Option<Position>,
    /// Case policy for the word list and grid letters
    #[arg(long, value_enum)]
    case: Option<CaseMode>,
    /// Search starting cells in parallel
    #[arg(long)]
    parallel: bool,
    /// Disable prefix pruning and walk every path
    #[arg(long)]
    exhaustive: bool,
    /// Show the path that spells each word
    #[arg(long)]
    paths: bool,
    /// Print a JSON report
    #[arg(long)]
    json: bool,
    /// Also write the JSON report to this file
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// More logging, repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Layers the command line flags over the config file
    fn merge_into(&self, config: &mut Config) {
        if let Some(dictionary) = &self.dictionary {
            config.dictionary = dictionary.clone();
        }
        if let Some(case) = self.case {
            config.case = case;
        }
        if self.exhaustive {
            config.pruning = Pruning::Exhaustive;
        }
        config.parallel |= self.parallel;
        config.paths |= self.paths;
        config.json |= self.json;
    }

    fn build_grid(&self, case: CaseMode) -> anyhow::Result<Grid> {
        let mut grid = if let Some(path) = &self.grid {
            Grid::from_file(path)
                .with_context(|| format!("failed to read grid from {}", path.display()))?
        } else if let Some(n) = self.random {
            let mut rng = match self.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            Grid::random(n, n, &mut rng)
        } else if self.letters.iter().any(|l| l.chars().count() > 1) {
            Grid::from_rows(&self.letters[..])?
        } else if !self.letters.is_empty() {
            Grid::from_letters(&self.letters[..])?
        } else {
            bail!("no grid given, pass LETTERS, --grid or --random");
        };

        grid.map_letters(|c| case.apply_char(c));
        if !grid.is_complete() {
            bail!("grid has unset cells");
        }
        Ok(grid)
    }
}

#[derive(Debug, Serialize)]
struct WordMatch {
    word: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<Vec<Position>>,
}

#[derive(Debug, Serialize)]
struct SolveReport {
    width: usize,
    height: usize,
    count: usize,
    words: Vec<WordMatch>,
}

fn find_words(solver: &Solver, config: &Config, start: Option<Position>) -> Vec<WordMatch> {
    if config.paths {
        let found = match start {
            Some(start) => solver.solve_from_with_paths(start),
            None => solver.solve_all_with_paths(),
        };
        found
            .into_iter()
            .map(|(word, path)| WordMatch {
                word,
                path: Some(path),
            })
            .collect()
    } else {
        let found = match start {
            Some(start) => solver.solve_from(start),
            None if config.parallel => solver.solve_all_parallel(),
            None => solver.solve_all(),
        };
        found
            .into_iter()
            .map(|word| WordMatch { word, path: None })
            .collect()
    }
}

/// Renders a path as `t(1, 0) -> a(2, 1) -> n(2, 0)`
fn format_path(grid: &Grid, path: &[Position]) -> anyhow::Result<String> {
    let steps = path
        .iter()
        .map(|p| Ok(format!("{}{}", grid.get(p.x, p.y)?, p)))
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(steps.join(" -> "))
}

fn print_text(grid: &Grid, report: &SolveReport) -> anyhow::Result<()> {
    print!("{}", grid);
    println!();
    for m in report.words.iter() {
        match &m.path {
            Some(path) => println!("{}\t{}", m.word, format_path(grid, path)?),
            None => println!("{}", m.word),
        }
    }
    println!("{} words", report.count);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    cli.merge_into(&mut config);
    info!(?config, "starting");

    let grid = cli.build_grid(config.case)?;
    let dictionary = Dictionary::from_file(&config.dictionary, config.case).with_context(|| {
        format!("failed to load dictionary {}", config.dictionary.display())
    })?;
    if dictionary.is_empty() {
        warn!(path = %config.dictionary.display(), "dictionary has no words");
    }
    let prefixes = PrefixIndex::build(&dictionary)?;

    if let Some(start) = cli.start {
        if !grid.contains(start) {
            warn!(%start, "start cell is outside the grid, nothing to search");
        }
    }

    let solver = Solver::new(&grid, &dictionary, &prefixes).with_pruning(config.pruning);
    let words = find_words(&solver, &config, cli.start);
    let (width, height) = grid.dimensions();
    let report = SolveReport {
        width,
        height,
        count: words.len(),
        words,
    };

    if config.json {
        println!("{}", serialization::to_json(&report)?);
    } else {
        print_text(&grid, &report)?;
    }
    if let Some(path) = &cli.output {
        serialization::save_json(&report, path)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        info!(path = %path.display(), "wrote report");
    }

    Ok(())
}
