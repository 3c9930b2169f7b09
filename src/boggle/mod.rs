// Word search over a Boggle letter grid
pub mod dictionary;
pub mod error;
pub mod grid;
pub mod search;
pub mod solver;
pub mod util;

pub use self::dictionary::{CaseMode, Dictionary, PrefixIndex};
pub use self::error::BoggleError;
pub use self::grid::Grid;
pub use self::search::Pruning;
pub use self::solver::Solver;
pub use self::util::Position;
