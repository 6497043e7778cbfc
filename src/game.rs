//! Turn bookkeeping for a live game of Chomp

use anyhow::{anyhow, Result};

use crate::{board::Board, solver::Solver, Move};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    Playing,
    PlayerOneWin,
    PlayerTwoWin,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Mode {
    /// One human against the AI
    Ai,
    /// Two humans
    Human,
}

impl Mode {
    /// Only "ai" (in any case) selects the AI mode, anything else is human vs human
    pub fn from_input(input: &str) -> Self {
        if input.trim().eq_ignore_ascii_case("ai") {
            Mode::Ai
        } else {
            Mode::Human
        }
    }
}

#[derive(Clone, Debug)]
pub enum PlayerKind {
    Human,
    /// The AI keeps its solver for the whole game, so its node count accumulates
    Ai(Solver),
}

#[derive(Clone, Debug)]
pub struct Player {
    pub name: String,
    pub kind: PlayerKind,
}

impl Player {
    pub fn human<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            kind: PlayerKind::Human,
        }
    }

    pub fn ai<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            kind: PlayerKind::Ai(Solver::new()),
        }
    }

    pub fn is_human(&self) -> bool {
        matches!(self.kind, PlayerKind::Human)
    }

    /// Nodes searched by this player's solver, `None` for humans
    pub fn visited_nodes(&self) -> Option<usize> {
        match &self.kind {
            PlayerKind::Human => None,
            PlayerKind::Ai(solver) => Some(solver.node_count),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    players: [Player; 2],
    current: usize,
    state: GameState,
}

impl Game {
    pub fn new(rows: usize, columns: usize, mode: Mode, human_first: bool) -> Result<Self> {
        let players = match (mode, human_first) {
            (Mode::Ai, true) => [Player::human("Human"), Player::ai("AI")],
            (Mode::Ai, false) => [Player::ai("AI"), Player::human("Human")],
            (Mode::Human, _) => [Player::human("Player 1"), Player::human("Player 2")],
        };
        Ok(Self::with_players(Board::new(rows, columns)?, players))
    }

    pub fn with_players(board: Board, players: [Player; 2]) -> Self {
        Self {
            board,
            players,
            current: 0,
            state: GameState::Playing,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    pub fn winner(&self) -> Option<&Player> {
        match self.state {
            GameState::Playing => None,
            GameState::PlayerOneWin => Some(&self.players[0]),
            GameState::PlayerTwoWin => Some(&self.players[1]),
        }
    }

    pub fn loser(&self) -> Option<&Player> {
        match self.state {
            GameState::Playing => None,
            GameState::PlayerOneWin => Some(&self.players[1]),
            GameState::PlayerTwoWin => Some(&self.players[0]),
        }
    }

    /// Plays a move for the current player
    ///
    /// Choosing the poisoned cell loses immediately and leaves the board as it was
    pub fn play_checked(&mut self, chomp: Move) -> Result<GameState> {
        if self.state != GameState::Playing {
            return Err(anyhow!("Invalid move, the game is already over"));
        }

        if self.board.is_poisonous(chomp.row, chomp.column) {
            self.state = if self.current == 0 {
                GameState::PlayerTwoWin
            } else {
                GameState::PlayerOneWin
            };
            return Ok(self.state);
        }

        self.board.apply_checked(chomp)?;
        self.current = 1 - self.current;

        Ok(self.state)
    }

    /// Asks the current player's solver for a move, `None` if a human is to move
    pub fn ai_move(&mut self, verbose: bool) -> Option<Move> {
        let board = &self.board;
        match &mut self.players[self.current].kind {
            PlayerKind::Human => None,
            PlayerKind::Ai(solver) => {
                let (best_move, _) = if verbose {
                    solver.solve_verbose(board)
                } else {
                    solver.solve(board)
                };
                best_move
            }
        }
    }

    /// Scores of every valid move as seen by the current player's solver
    pub fn ai_analysis(&mut self) -> Option<Vec<(Move, usize)>> {
        let board = &self.board;
        match &mut self.players[self.current].kind {
            PlayerKind::Human => None,
            PlayerKind::Ai(solver) => Some(solver.analyse(board)),
        }
    }
}
