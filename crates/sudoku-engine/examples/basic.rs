//! Basic example of generating and solving a board.

use sudoku_engine::{Generator, Grid, DEFAULT_ALPHABET};

fn main() -> sudoku_engine::Result<()> {
    // Generate a classic 9x9 puzzle.
    println!("Generating a 9x9 puzzle...\n");
    let board = Generator::new().generate(3, 3, None)?;

    println!("Problem:  {:?}", board.problem().to_string());
    println!("Solution: {:?}", board.solution().to_string());

    let givens = board
        .problem()
        .to_string()
        .chars()
        .filter(|&symbol| symbol != ' ')
        .count();
    println!("Given cells: {}\n", givens);

    // Reconstruct the problem and solve it by propagation alone.
    let alphabet: String = DEFAULT_ALPHABET.chars().take(9).collect();
    let mut grid = Grid::from_flat(3, 3, &alphabet, &board.problem().to_string())?;
    grid.solve_possible()?;
    assert!(grid.is_final());
    println!("Propagation reached the full solution: {}", grid);

    // A 4x4 board over letters.
    let small = Generator::new().generate(2, 2, Some("ABCD"))?;
    println!("\n4x4 problem over ABCD: {:?}", small.problem().to_string());

    Ok(())
}
