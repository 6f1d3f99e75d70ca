//! Command-line front end for the Sudoku engine: generate printable puzzles
//! or run the propagation solver over a flat-string board.

use clap::{Parser, Subcommand};
use log::info;
use sudoku_engine::{Generator, Grid, SimpleBoard, SudokuError, DEFAULT_ALPHABET};

#[derive(Parser)]
#[command(name = "sudoku", version, about = "Generate and solve Sudoku boards")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate puzzles with a unique propagation-reachable solution
    Generate {
        /// Block width (board side = width * height)
        #[arg(long, default_value_t = 3)]
        block_width: usize,
        /// Block height
        #[arg(long, default_value_t = 3)]
        block_height: usize,
        /// Explicit symbol alphabet, one character per board row
        #[arg(long)]
        alphabet: Option<String>,
        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
        /// Number of boards to generate
        #[arg(short, long, default_value_t = 1)]
        count: usize,
        /// Also print each board's solution
        #[arg(long)]
        solutions: bool,
    },
    /// Propagate deductions over a flat-string board and print the result
    Solve {
        /// Block width
        #[arg(long, default_value_t = 3)]
        block_width: usize,
        /// Block height
        #[arg(long, default_value_t = 3)]
        block_height: usize,
        /// Explicit symbol alphabet, one character per board row
        #[arg(long)]
        alphabet: Option<String>,
        /// Row-major board string, spaces for empty cells
        board: String,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> sudoku_engine::Result<()> {
    match cli.command {
        Command::Generate {
            block_width,
            block_height,
            alphabet,
            seed,
            count,
            solutions,
        } => {
            let mut generator = match seed {
                Some(seed) => Generator::with_seed(seed),
                None => Generator::new(),
            };
            for i in 0..count {
                let board = generator.generate(block_width, block_height, alphabet.as_deref())?;
                let givens = board
                    .problem()
                    .to_string()
                    .chars()
                    .filter(|&symbol| symbol != ' ')
                    .count();
                info!("board {} has {} givens", i + 1, givens);

                if count > 1 {
                    println!("Board {}:", i + 1);
                }
                println!("{}", render(board.problem()));
                if solutions {
                    println!("Solution:");
                    println!("{}", render(board.solution()));
                }
            }
        }
        Command::Solve {
            block_width,
            block_height,
            alphabet,
            board,
        } => {
            let alphabet = match alphabet {
                Some(alphabet) => alphabet,
                None => default_alphabet(block_width * block_height)?,
            };
            let mut grid = Grid::from_flat(block_width, block_height, &alphabet, &board)?;
            grid.solve_possible()?;

            let solved = SimpleBoard::new(block_width, block_height, Some(&grid.to_string()))?;
            println!("{}", render(&solved));
            if grid.is_final() {
                println!("Board solved.");
            } else {
                println!(
                    "Propagation stopped with {} cells still open.",
                    grid.empty_positions().len()
                );
            }
        }
    }
    Ok(())
}

/// The default alphabet truncated to the board side.
fn default_alphabet(side: usize) -> sudoku_engine::Result<String> {
    let max = DEFAULT_ALPHABET.chars().count();
    if side > max {
        return Err(SudokuError::SideOutOfRange { side, max });
    }
    Ok(DEFAULT_ALPHABET.chars().take(side).collect())
}

/// Render a board with block borders, e.g. for a 4x4 board:
///
/// ```text
/// +----+----+
/// | 1 2| 3 4|
/// ...
/// ```
fn render(board: &SimpleBoard) -> String {
    let mut out = String::new();
    let separator = horizontal_separator(board);

    for row in 0..board.rows() {
        if row % board.block_height() == 0 {
            out.push_str(&separator);
            out.push('\n');
        }
        for col in 0..board.cols() {
            if col % board.block_width() == 0 {
                out.push('|');
            }
            out.push(' ');
            out.push(board[(row, col)]);
        }
        out.push_str("|\n");
    }
    out.push_str(&separator);
    out
}

fn horizontal_separator(board: &SimpleBoard) -> String {
    let mut line = String::new();
    for col in 0..board.cols() {
        if col % board.block_width() == 0 {
            line.push('+');
        }
        line.push_str("--");
    }
    line.push('+');
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_marks_blocks() {
        let board = SimpleBoard::new(2, 2, Some("12  3   4      1")).unwrap();
        let rendered = render(&board);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "+----+----+");
        assert_eq!(lines[1], "| 1 2|    |");
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn test_default_alphabet_bounds() {
        assert_eq!(default_alphabet(4).unwrap(), "1234");
        assert!(matches!(
            default_alphabet(81),
            Err(SudokuError::SideOutOfRange { .. })
        ));
    }
}
