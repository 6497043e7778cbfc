//! An agent to solve the game of Chomp

use indicatif::*;
use rayon::prelude::*;

use crate::{board::Board, Move};

/// The value of a searched position along with the move that achieves it
///
/// `best_move` is only recorded by maximizing searches of non-terminal positions
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct SearchResult {
    pub score: usize,
    pub best_move: Option<Move>,
}

/// An agent to solve Chomp positions
///
/// # Notes
/// This agent uses a plain minimax search over the full game tree, with no
/// pruning and no caching of previously seen positions. Every branch searches
/// its own copy of the board, so sibling branches never share state.
///
/// # Position Scoring
/// A terminal position (every cell eaten) is scored by its number of eaten cells.
/// The poisoned cell is treated as an ordinary cell inside the search, so every
/// line of play runs until the bar is gone and every leaf has the same score.
/// Ties are broken in favour of the candidate seen last in row-major order.
#[derive(Clone, Default, Debug)]
pub struct Solver {
    /// The number of nodes searched by this `Solver` so far (for diagnostics only)
    ///
    /// This accumulates across searches, see [`Solver::reset`]
    pub node_count: usize,
}

impl Solver {
    pub fn new() -> Self {
        Self { node_count: 0 }
    }

    /// Clears the visited node counter
    pub fn reset(&mut self) {
        self.node_count = 0;
    }

    /// Performs game tree search
    ///
    /// Returns the score of the position and, for the maximizing side, the best move
    pub fn search(&mut self, board: &Board, maximizing: bool) -> SearchResult {
        self.minimax(board, maximizing, None)
    }

    fn minimax(
        &mut self,
        board: &Board,
        maximizing: bool,
        progress: Option<&ProgressBar>,
    ) -> SearchResult {
        self.node_count += 1;

        if board.is_terminal() {
            return SearchResult {
                score: board.evaluate(),
                best_move: None,
            };
        }

        let mut best_score = if maximizing { usize::MIN } else { usize::MAX };
        let mut best_move = None;

        for chomp in board.valid_moves() {
            let mut next = board.clone();
            next.apply_move(chomp.row, chomp.column);
            let score = self.minimax(&next, !maximizing, None).score;

            if let Some(progress) = progress {
                progress.inc(1);
            }

            // later moves replace earlier ones with an equal score
            if maximizing && score >= best_score {
                best_score = score;
                best_move = Some(chomp);
            } else if !maximizing && score <= best_score {
                best_score = score;
            }
        }

        SearchResult {
            score: best_score,
            best_move,
        }
    }

    /// Calculates the best move for the side to move
    ///
    /// Returns the move along with the total number of nodes this solver has visited
    pub fn solve(&mut self, board: &Board) -> (Option<Move>, usize) {
        let result = self.search(board, true);
        (result.best_move, self.node_count)
    }

    /// Same as [`Solver::solve`], showing a progress bar over the candidate moves
    pub fn solve_verbose(&mut self, board: &Board) -> (Option<Move>, usize) {
        let progress = ProgressBar::new(board.valid_moves().count() as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("Searching moves: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
                .progress_chars("█▓▒░  "),
        );

        let result = self.minimax(board, true, Some(&progress));
        progress.finish_and_clear();

        println!("Searched {} nodes so far", self.node_count);
        (result.best_move, self.node_count)
    }

    /// Scores every valid move of the position in row-major order
    ///
    /// Each candidate is searched on its own thread with a private node
    /// counter, which is added to this solver's counter afterwards
    pub fn analyse(&mut self, board: &Board) -> Vec<(Move, usize)> {
        self.node_count += 1;

        let moves: Vec<Move> = board.valid_moves().collect();
        let results: Vec<(Move, usize, usize)> = moves
            .par_iter()
            .map(|&chomp| {
                let mut solver = Solver::new();
                let mut next = board.clone();
                next.apply_move(chomp.row, chomp.column);
                let score = solver.search(&next, false).score;
                (chomp, score, solver.node_count)
            })
            .collect();

        self.node_count += results.iter().map(|&(_, _, nodes)| nodes).sum::<usize>();
        results
            .into_iter()
            .map(|(chomp, score, _)| (chomp, score))
            .collect()
    }
}
