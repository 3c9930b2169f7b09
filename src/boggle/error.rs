use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoggleError {
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    #[error("board needs to be NxN, got {0} letters")]
    NotSquare(usize),
    #[error("row {row} has {found} letters but the grid is {expected} wide")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("cell ({x}, {y}) must hold exactly one letter, got {value:?}")]
    InvalidCell { x: usize, y: usize, value: String },
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Fst(#[from] fst::Error),
}
