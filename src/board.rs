use anyhow::{anyhow, Result};
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::fmt;
use std::io::{stdout, Write};

use crate::Move;

/// The state of a single square of the chocolate bar
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Cell {
    Present,
    Eaten,
    Poison,
}

impl Cell {
    pub fn is_eaten(&self) -> bool {
        matches!(self, Cell::Eaten)
    }

    /// The character used to draw this cell
    pub fn symbol(&self) -> char {
        match self {
            Cell::Poison => '#',
            Cell::Eaten => '0',
            Cell::Present => '1',
        }
    }
}

/// A rectangular chocolate bar with the poisoned square in the top-left corner
///
/// Cloning a `Board` yields a fully independent copy, which is how the
/// search explores hypothetical moves without touching the live game
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Board {
    cells: Vec<Cell>, // cells are stored left-to-right, top-to-bottom
    rows: usize,
    columns: usize,
}

impl Board {
    /// The fixed location of the poisoned square
    pub const POISON: Move = Move::new(0, 0);

    pub fn new(rows: usize, columns: usize) -> Result<Self> {
        if rows == 0 || columns == 0 {
            return Err(anyhow!(
                "Invalid board size {}x{}, both dimensions must be at least 1",
                rows,
                columns
            ));
        }
        let size = rows.checked_mul(columns).ok_or_else(|| {
            anyhow!(
                "Invalid board size {}x{}, too many cells",
                rows,
                columns
            )
        })?;
        let mut cells = vec![Cell::Present; size];
        cells[Self::POISON.row * columns + Self::POISON.column] = Cell::Poison;
        Ok(Self {
            cells,
            rows,
            columns,
        })
    }

    /// Builds a position by playing a comma separated list of `row column` moves
    ///
    /// ```
    /// # use chomp_ai::board::Board;
    /// let board = Board::from_moves(3, 3, "1 1, 0 2").unwrap();
    /// assert_eq!(board.to_string(), "# 1 0\n1 0 0\n1 0 0\n\n");
    /// ```
    pub fn from_moves<S: AsRef<str>>(rows: usize, columns: usize, moves: S) -> Result<Self> {
        let mut board = Self::new(rows, columns)?;

        for token in moves.as_ref().split(',').map(str::trim) {
            if token.is_empty() {
                continue;
            }
            board.apply_checked(token.parse::<Move>()?)?;
        }
        Ok(board)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<Cell> {
        if row < self.rows && column < self.columns {
            Some(self.cells[row * self.columns + column])
        } else {
            None
        }
    }

    /// Eats the cell at (`row`, `column`) and every cell below and to the right of it
    ///
    /// The move must be valid, see [`Board::is_valid_move`]
    pub fn apply_move(&mut self, row: usize, column: usize) {
        debug_assert!(
            self.is_valid_move(row, column),
            "chomp at ({}, {}) is not a valid move",
            row,
            column
        );
        for r in row..self.rows {
            for cell in &mut self.cells[r * self.columns + column..(r + 1) * self.columns] {
                *cell = Cell::Eaten;
            }
        }
    }

    /// Validated version of [`Board::apply_move`]
    pub fn apply_checked(&mut self, chomp: Move) -> Result<()> {
        match self.cell(chomp.row, chomp.column) {
            None => Err(anyhow!(
                "Invalid move, cell {} out of range. Rows must be below {} and columns below {}",
                chomp,
                self.rows,
                self.columns
            )),
            Some(Cell::Eaten) => Err(anyhow!("Invalid move, cell {} already eaten", chomp)),
            Some(_) => {
                self.apply_move(chomp.row, chomp.column);
                Ok(())
            }
        }
    }

    pub fn is_poisonous(&self, row: usize, column: usize) -> bool {
        self.cell(row, column) == Some(Cell::Poison)
    }

    pub fn is_terminal(&self) -> bool {
        self.cells.iter().all(Cell::is_eaten)
    }

    /// The number of eaten cells, used as the leaf score of the search
    pub fn evaluate(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_eaten()).count()
    }

    /// A move is valid if it is on the board and targets a cell that hasn't been eaten,
    /// including the poisoned cell
    pub fn is_valid_move(&self, row: usize, column: usize) -> bool {
        match self.cell(row, column) {
            Some(cell) => !cell.is_eaten(),
            None => false,
        }
    }

    /// All valid moves in row-major order
    pub fn valid_moves(&self) -> impl Iterator<Item = Move> + '_ {
        (0..self.rows)
            .flat_map(move |row| (0..self.columns).map(move |column| Move::new(row, column)))
            .filter(move |chomp| self.is_valid_move(chomp.row, chomp.column))
    }

    /// Draws the board to the terminal, coloured by cell state
    pub fn display(&self) -> Result<()> {
        let mut stdout = stdout();

        for (idx, cell) in self.cells.iter().enumerate() {
            let separator = if (idx + 1) % self.columns == 0 { "\n" } else { " " };

            stdout
                .queue(PrintStyledContent(
                    style(cell.symbol())
                        .attribute(Attribute::Bold)
                        .with(match cell {
                            Cell::Poison => Color::Red,
                            Cell::Eaten => Color::DarkGrey,
                            Cell::Present => Color::Yellow,
                        }),
                ))?
                .queue(PrintStyledContent(style(separator)))?;
        }
        stdout.queue(PrintStyledContent(style("\n")))?;
        stdout.flush()?;
        Ok(())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.columns) {
            let line: Vec<String> = row.iter().map(|cell| cell.symbol().to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_board() -> Result<()> {
        let board = Board::new(2, 3)?;
        assert_eq!(board.cell(0, 0), Some(Cell::Poison));
        assert_eq!(board.evaluate(), 0);
        assert!(!board.is_terminal());
        assert_eq!(board.to_string(), "# 1 1\n1 1 1\n\n");
        Ok(())
    }

    #[test]
    fn zero_dimension() {
        assert!(Board::new(0, 3).is_err());
        assert!(Board::new(3, 0).is_err());
    }

    #[test]
    fn oversized_board() {
        assert!(Board::new(usize::MAX / 2, 3).is_err());
        assert!(Board::new(3, usize::MAX).is_err());
    }

    #[test]
    fn chomp_eats_lower_right() -> Result<()> {
        let mut board = Board::new(3, 4)?;
        board.apply_move(1, 2);

        for row in 0..3 {
            for column in 0..4 {
                let eaten = row >= 1 && column >= 2;
                assert_eq!(board.cell(row, column).map(|c| c.is_eaten()), Some(eaten));
            }
        }
        assert_eq!(board.evaluate(), 4);
        Ok(())
    }

    #[test]
    fn parse_errors() {
        assert!(Board::from_moves(3, 3, "1").is_err());
        assert!(Board::from_moves(3, 3, "a b").is_err());
        assert!(Board::from_moves(3, 3, "3 0").is_err());
        assert!(Board::from_moves(3, 3, "1 1, 2 2").is_err());
    }
}
