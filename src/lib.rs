//! A perfect agent for playing or analysing the game 'Chomp'
//!
//! This agent uses an exhaustive minimax game tree search to find
//! the optimal move for any position on a rectangular chocolate bar.
//!
//! # Basic Usage
//!
//! ```
//! use chomp_ai::{board::Board, solver::Solver, Move};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let board = Board::new(2, 2)?;
//! let mut solver = Solver::new();
//! let (best_move, nodes) = solver.solve(&board);
//!
//! assert_eq!(best_move, Some(Move::new(1, 1)));
//! assert_eq!(nodes, 20);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use ::anyhow;

use ::anyhow::anyhow;

use std::fmt;
use std::str::FromStr;

pub mod board;

pub mod solver;

pub mod game;


/// Boards with more cells than this may take an impractically long time to search
pub const SEARCH_WARN_CELLS: usize = 20;

const_assert!(SEARCH_WARN_CELLS > 0);

// the parallel root analysis shares the board between threads
assert_impl_all!(board::Board: Send, Sync, Clone);

/// A chomp targeting the cell at (`row`, `column`)
///
/// The cell and every cell below and to the right of it are eaten
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Move {
    pub row: usize,
    pub column: usize,
}

impl Move {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

impl From<(usize, usize)> for Move {
    fn from((row, column): (usize, usize)) -> Self {
        Self::new(row, column)
    }
}

/// Parses a move written as `row column`, separated by whitespace
impl FromStr for Move {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let coords = s
            .split_whitespace()
            .map(|n| n.parse::<usize>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| anyhow!("could not parse '{}' as a valid move", s.trim()))?;
        match coords[..] {
            [row, column] => Ok(Self::new(row, column)),
            _ => Err(anyhow!("could not parse '{}' as a valid move", s.trim())),
        }
    }
}
