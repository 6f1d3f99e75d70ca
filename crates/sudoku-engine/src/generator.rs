//! Puzzle generation: randomized trial assignments with propagation and
//! rollback, followed by a greedy minimization sweep.
//!
//! One generation attempt walks an explicit state machine: from a clean grid
//! it keeps trying random (position, symbol) assignments, committing each one
//! that still propagates cleanly. A propagation contradiction rolls back the
//! single assignment while `trials < MAX_TRIALS` and other candidate
//! positions remain, and otherwise hard-resets to a clean grid. Once the
//! working grid is final, redundant assignments are removed one by one; the
//! surviving set is locally irreducible (not guaranteed globally minimal —
//! puzzle shape depends on this exact policy, so it is kept greedy).

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::alphabet::DEFAULT_ALPHABET;
use crate::board::{Board, SimpleBoard};
use crate::error::{Result, SudokuError};
use crate::grid::Grid;

/// Failed trials tolerated before restarting from a clean grid.
const MAX_TRIALS: usize = 10;

/// A recorded `(position, symbol)` clue.
type Assignment = ((usize, usize), char);

/// Generate a board with an entropy-seeded generator.
///
/// See [`Generator::generate`] for the error contract.
pub fn generate(block_width: usize, block_height: usize, alphabet: Option<&str>) -> Result<Board> {
    Generator::new().generate(block_width, block_height, alphabet)
}

/// Sudoku puzzle generator.
pub struct Generator {
    rng: StdRng,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    /// Create a generator seeded from entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a generator with a specific seed for reproducibility.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate a board that is uniquely reducible to a full solution by
    /// propagation alone.
    ///
    /// With no explicit alphabet the default one is used; a side longer than
    /// it fails with [`SudokuError::SideOutOfRange`]. An explicit alphabet
    /// whose length mismatches the side fails with
    /// [`SudokuError::InvalidAlphabet`].
    pub fn generate(
        &mut self,
        block_width: usize,
        block_height: usize,
        alphabet: Option<&str>,
    ) -> Result<Board> {
        let side = block_width * block_height;
        let alphabet = match alphabet {
            Some(alphabet) => alphabet.to_string(),
            None => {
                let default_len = DEFAULT_ALPHABET.chars().count();
                if side > default_len {
                    return Err(SudokuError::SideOutOfRange {
                        side,
                        max: default_len,
                    });
                }
                DEFAULT_ALPHABET.chars().take(side).collect()
            }
        };

        let assignments = self.construct_assignments(block_width, block_height, &alphabet)?;
        let pure = remove_unneeded_assignments(block_width, block_height, &alphabet, assignments)?;

        let problem = construct_from_assignments(block_width, block_height, &alphabet, &pure)?;
        let mut solution = problem.copy();
        solution.solve_possible()?;
        assert!(
            solution.is_final(),
            "generated problem must propagate to a full solution"
        );

        let problem = SimpleBoard::new(block_width, block_height, Some(&problem.to_string()))?;
        let solution = SimpleBoard::new(block_width, block_height, Some(&solution.to_string()))?;
        Board::new(block_width, block_height, problem, Some(solution))
    }

    /// Build an assignment series whose propagation reaches a full solution.
    fn construct_assignments(
        &mut self,
        block_width: usize,
        block_height: usize,
        alphabet: &str,
    ) -> Result<Vec<Assignment>> {
        let mut solution = Grid::new(block_width, block_height, alphabet)?;
        let mut trials = 0;
        let mut assignments: Vec<Assignment> = Vec::new();
        let mut possible_positions = solution.empty_positions();

        while !solution.is_final() {
            let (pos_index, pos, symbol) = self.pick_assignment(&solution, &possible_positions);

            let mut candidate = solution.copy();
            candidate.set(pos.0, pos.1, symbol)?;

            match candidate.solve_possible() {
                Ok(()) => {
                    trace!("assigned {:?} at {:?}", symbol, pos);
                    assignments.push((pos, symbol));
                    possible_positions = candidate.empty_positions();
                    solution = candidate;
                }
                Err(SudokuError::NoPossibleSymbols { .. })
                    if trials < MAX_TRIALS && possible_positions.len() > 1 =>
                {
                    // Soft rollback: drop this position, keep everything else.
                    trace!("assignment {:?} at {:?} leads to a dead end", symbol, pos);
                    trials += 1;
                    possible_positions.swap_remove(pos_index);
                }
                Err(SudokuError::NoPossibleSymbols { .. }) => {
                    // Hard reset: too much thrashing, start the attempt over.
                    debug!(
                        "restarting generation after {} assignments",
                        assignments.len()
                    );
                    solution = Grid::new(block_width, block_height, alphabet)?;
                    trials = 0;
                    assignments.clear();
                    possible_positions = solution.empty_positions();
                }
                Err(err) => return Err(err),
            }
        }

        Ok(assignments)
    }

    /// Pick a random empty position and a random symbol possible there.
    fn pick_assignment(
        &mut self,
        grid: &Grid,
        possible_positions: &[(usize, usize)],
    ) -> (usize, (usize, usize), char) {
        let pos_index = self.rng.gen_range(0..possible_positions.len());
        let pos = possible_positions[pos_index];
        let symbols = grid.possible_symbols(pos.0, pos.1);
        let symbol = *symbols
            .choose(&mut self.rng)
            .expect("empty cell of a propagated grid always has candidates");
        (pos_index, pos, symbol)
    }
}

/// Rebuild a grid from an assignment series.
fn construct_from_assignments(
    block_width: usize,
    block_height: usize,
    alphabet: &str,
    assignments: &[Assignment],
) -> Result<Grid> {
    let mut grid = Grid::new(block_width, block_height, alphabet)?;
    for &((row, col), symbol) in assignments {
        grid.set(row, col, symbol)?;
    }
    Ok(grid)
}

/// Drop assignments the remaining ones already force: one greedy
/// left-to-right sweep, each removal kept only if the reduced series still
/// propagates to a full solution.
fn remove_unneeded_assignments(
    block_width: usize,
    block_height: usize,
    alphabet: &str,
    assignments: Vec<Assignment>,
) -> Result<Vec<Assignment>> {
    let mut pure = assignments;
    let mut i = 0;

    while i < pure.len() {
        let removed = pure.remove(i);
        let mut grid = construct_from_assignments(block_width, block_height, alphabet, &pure)?;
        let still_solvable = match grid.solve_possible() {
            Ok(()) => grid.is_final(),
            // Removing a clue only relaxes constraints; a contradiction here
            // cannot happen, but treat it as "still needed" all the same.
            Err(SudokuError::NoPossibleSymbols { .. }) => false,
            Err(err) => return Err(err),
        };
        if still_solvable {
            trace!("clue {:?} at {:?} is redundant", removed.1, removed.0);
        } else {
            pure.insert(i, removed);
            i += 1;
        }
    }

    Ok(pure)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solve_problem(board: &Board) -> Grid {
        let side = board.problem().rows();
        let alphabet: String = DEFAULT_ALPHABET.chars().take(side).collect();
        let mut grid = Grid::from_flat(
            board.block_width(),
            board.block_height(),
            &alphabet,
            &board.problem().to_string(),
        )
        .unwrap();
        grid.solve_possible().unwrap();
        grid
    }

    #[test]
    fn test_generated_2x2_board_is_solvable() {
        let board = Generator::with_seed(42).generate(2, 2, None).unwrap();
        let solved = solve_problem(&board);

        assert!(solved.is_final());
        assert_eq!(solved.to_string(), board.solution().to_string());
    }

    #[test]
    fn test_generated_2x3_board_is_solvable() {
        let board = Generator::with_seed(7).generate(2, 3, None).unwrap();
        let solved = solve_problem(&board);

        assert!(solved.is_final());
        assert_eq!(solved.to_string(), board.solution().to_string());
    }

    #[test]
    fn test_generated_3x3_board_is_solvable() {
        let board = Generator::with_seed(1).generate(3, 3, None).unwrap();
        let solved = solve_problem(&board);

        assert!(solved.is_final());
        assert_eq!(solved.to_string(), board.solution().to_string());
    }

    #[test]
    fn test_problem_agrees_with_solution() {
        let board = Generator::with_seed(3).generate(2, 2, None).unwrap();
        for row in 0..4 {
            for col in 0..4 {
                let given = board.problem()[(row, col)];
                if given != ' ' {
                    assert_eq!(given, board.solution()[(row, col)]);
                }
            }
        }
    }

    #[test]
    fn test_problem_is_neither_full_nor_empty() {
        let board = Generator::with_seed(11).generate(2, 2, None).unwrap();
        let problem = board.problem().to_string();
        assert!(problem.contains(' '));
        assert!(problem.chars().any(|symbol| symbol != ' '));
    }

    #[test]
    fn test_problem_is_minimal() {
        let board = Generator::with_seed(5).generate(2, 2, None).unwrap();
        let problem = board.problem().to_string();

        for drop in 0..problem.len() {
            if problem.chars().nth(drop) == Some(' ') {
                continue;
            }
            let reduced: String = problem
                .chars()
                .enumerate()
                .map(|(i, symbol)| if i == drop { ' ' } else { symbol })
                .collect();
            let mut grid = Grid::from_flat(2, 2, "1234", &reduced).unwrap();
            let final_now = match grid.solve_possible() {
                Ok(()) => grid.is_final(),
                Err(_) => false,
            };
            assert!(!final_now, "clue at index {} was redundant", drop);
        }
    }

    #[test]
    fn test_explicit_alphabet() {
        let board = Generator::with_seed(9)
            .generate(2, 2, Some("ABCD"))
            .unwrap();
        assert!(board
            .solution()
            .to_string()
            .chars()
            .all(|symbol| "ABCD".contains(symbol)));
    }

    #[test]
    fn test_explicit_alphabet_length_mismatch() {
        assert!(matches!(
            Generator::with_seed(0).generate(2, 2, Some("12345")),
            Err(SudokuError::InvalidAlphabet(_))
        ));
    }

    #[test]
    fn test_default_alphabet_too_small() {
        assert!(matches!(
            Generator::with_seed(0).generate(9, 9, None),
            Err(SudokuError::SideOutOfRange { side: 81, max: 62 })
        ));
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let first = Generator::with_seed(42).generate(2, 2, None).unwrap();
        let second = Generator::with_seed(42).generate(2, 2, None).unwrap();
        assert_eq!(first.problem().to_string(), second.problem().to_string());
        assert_eq!(first.solution().to_string(), second.solution().to_string());
    }
}
