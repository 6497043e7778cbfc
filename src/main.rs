use anyhow::{anyhow, Result};
use clap::Parser;

use std::io::{stdin, stdout, Stdin, Write};

use chomp_ai::{
    game::{Game, GameState, Mode},
    Move, SEARCH_WARN_CELLS,
};

#[derive(Parser, Debug)]
#[command(name = "chomp", version, about = "Play Chomp against a perfect minimax AI")]
struct Cli {
    /// Number of rows of the chocolate bar
    #[arg(short = 'r', long)]
    rows: Option<usize>,
    /// Number of columns of the chocolate bar
    #[arg(short = 'c', long)]
    columns: Option<usize>,
    /// Game mode, "ai" or "human"
    #[arg(short = 'm', long)]
    mode: Option<String>,
    /// Let the human player move first (AI mode only)
    #[arg(long, conflicts_with = "ai_first")]
    human_first: bool,
    /// Let the AI move first (AI mode only)
    #[arg(long)]
    ai_first: bool,
    /// Show search progress while the AI is thinking
    #[arg(short = 'v', long)]
    verbose: bool,
    /// Print the score of every candidate move before the AI plays
    #[arg(short = 'a', long)]
    analyse: bool,
}

fn prompt(stdin: &Stdin, message: &str) -> Result<String> {
    print!("{}", message);
    stdout().flush()?;

    let mut buffer = String::new();
    if stdin.read_line(&mut buffer)? == 0 {
        return Err(anyhow!("unexpected end of input"));
    }
    Ok(buffer.trim().to_string())
}

fn prompt_number(stdin: &Stdin, message: &str) -> Result<usize> {
    loop {
        match prompt(stdin, message)?.parse::<usize>() {
            Ok(number) if number > 0 => return Ok(number),
            _ => println!("Please enter a positive whole number."),
        }
    }
}

/// Only a lone "y" (in any case) counts as yes
fn is_yes(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let stdin = stdin();

    println!("Welcome to Chomp\n");

    let rows = match cli.rows {
        Some(rows) => rows,
        None => prompt_number(&stdin, "Enter number of rows: ")?,
    };
    let columns = match cli.columns {
        Some(columns) => columns,
        None => prompt_number(&stdin, "Enter number of columns: ")?,
    };
    let mode = match &cli.mode {
        Some(mode) => Mode::from_input(mode),
        None => Mode::from_input(&prompt(&stdin, "Choose mode (AI/Human): ")?),
    };

    let human_first = match mode {
        Mode::Human => true,
        Mode::Ai if cli.human_first => true,
        Mode::Ai if cli.ai_first => false,
        Mode::Ai => is_yes(&prompt(&stdin, "Do you want to start first? (y/n): ")?),
    };

    let cells = rows.saturating_mul(columns);
    if mode == Mode::Ai && cells > SEARCH_WARN_CELLS {
        println!(
            "Warning: a {}x{} board has {} cells, the AI may take a very long time to move",
            rows,
            columns,
            cells
        );
    }

    let mut game = Game::new(rows, columns, mode, human_first)?;

    // game loop
    while game.state() == GameState::Playing {
        game.board().display()?;
        println!("{}'s turn", game.current_player().name);

        let next_move = if game.current_player().is_human() {
            let input = prompt(&stdin, "Enter row and column: ")?;
            match input.parse::<Move>() {
                Err(_) => {
                    println!("Invalid input. Please enter two integers separated by a space.");
                    continue;
                }
                Ok(chomp) if !game.board().is_valid_move(chomp.row, chomp.column) => {
                    println!("Invalid move. Try again.");
                    continue;
                }
                Ok(chomp) => chomp,
            }

        // AI player
        } else {
            if cli.analyse {
                if let Some(scores) = game.ai_analysis() {
                    for (chomp, score) in scores {
                        println!("  {} -> {}", chomp, score);
                    }
                }
            }
            println!("AI is thinking...");
            stdout().flush()?;

            match game.ai_move(cli.verbose) {
                Some(chomp) => {
                    println!("AI chooses move: {}", chomp);
                    chomp
                }
                None => return Err(anyhow!("AI found no move on a non-terminal board")),
            }
        };

        if let Err(err) = game.play_checked(next_move) {
            println!("{}", err);
            // try the move again
            continue;
        }
    }

    // end state
    if let (Some(loser), Some(winner)) = (game.loser(), game.winner()) {
        println!(
            "{} has to eat the poisonous piece! {} wins!",
            loser.name, winner.name
        );
    }
    for player in game.players() {
        if let Some(nodes) = player.visited_nodes() {
            println!("{} visited {} nodes.", player.name, nodes);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yes_answers() {
        assert!(is_yes("y"));
        assert!(is_yes(" Y\n"));
        assert!(!is_yes("yes"));
        assert!(!is_yes("n"));
        assert!(!is_yes(""));
    }
}
