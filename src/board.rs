//! Board representation and rules for generalized m,n,k connect games.
//!
//! A board is an n-by-n grid of cells plus the player to move. A player wins
//! by placing `win_len` of their marks in an unbroken horizontal, vertical or
//! diagonal line. Boards are immutable values: applying a move produces a new
//! board, leaving the original untouched, which lets the search explore many
//! continuations from the same position.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::{MctsError, Result};

/// The two players. `X` moves first on a fresh board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Returns the opposing player.
    pub fn other(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

/// A cell coordinate, zero-indexed from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Coord { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Direction vectors for run detection: right, down, down-right, down-left.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// An n-by-n grid of cells plus the player to move.
///
/// The grid is stored row-major; `None` marks an empty cell. `win_len` is the
/// run length required to win (k). Geometry travels with the value, so boards
/// of different sizes and run lengths coexist in one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: Vec<Option<Player>>,
    size: usize,
    win_len: usize,
    to_move: Player,
}

impl Board {
    /// Creates an empty `size`-by-`size` board requiring a run of `win_len`,
    /// with `X` to move.
    pub fn new(size: usize, win_len: usize) -> Result<Self> {
        if size == 0 || win_len == 0 || win_len > size {
            return Err(MctsError::InvalidConfiguration(format!(
                "run length {win_len} does not fit a {size}x{size} board"
            )));
        }
        Ok(Board {
            cells: vec![None; size * size],
            size,
            win_len,
            to_move: Player::X,
        })
    }

    /// Builds a board from row strings, one character per cell: `X`, `O`, or
    /// `.` for empty. Intended for tests and demos.
    pub fn from_rows(rows: &[&str], win_len: usize, to_move: Player) -> Result<Self> {
        let mut board = Board::new(rows.len(), win_len)?;
        board.to_move = to_move;
        for (row, line) in rows.iter().enumerate() {
            if line.chars().count() != board.size {
                return Err(MctsError::InvalidConfiguration(format!(
                    "row {row} has {} cells, expected {}",
                    line.chars().count(),
                    board.size
                )));
            }
            for (col, ch) in line.chars().enumerate() {
                board.cells[row * board.size + col] = match ch {
                    'X' => Some(Player::X),
                    'O' => Some(Player::O),
                    '.' => None,
                    other => {
                        return Err(MctsError::InvalidConfiguration(format!(
                            "unrecognized cell character {other:?}"
                        )))
                    }
                };
            }
        }
        Ok(board)
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Run length required to win.
    pub fn win_len(&self) -> usize {
        self.win_len
    }

    /// The player whose turn it is.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Mark at `at`, or `None` if the cell is empty.
    ///
    /// Panics if `at` is outside the grid.
    pub fn cell(&self, at: Coord) -> Option<Player> {
        self.cells[at.row * self.size + at.col]
    }

    /// Every empty cell, in row-major scan order.
    ///
    /// The order is part of the contract: downstream tie-breaks pick the
    /// first of equally scored alternatives.
    pub fn legal_moves(&self) -> Vec<Coord> {
        let mut moves = Vec::new();
        for row in 0..self.size {
            for col in 0..self.size {
                if self.cells[row * self.size + col].is_none() {
                    moves.push(Coord { row, col });
                }
            }
        }
        moves
    }

    /// Places the mover's mark at `at` and flips the turn, returning the
    /// resulting board. The original board is not modified.
    pub fn apply(&self, at: Coord) -> Result<Board> {
        if at.row >= self.size || at.col >= self.size {
            return Err(MctsError::IllegalMove(at));
        }
        let index = at.row * self.size + at.col;
        if self.cells[index].is_some() {
            return Err(MctsError::IllegalMove(at));
        }
        let mut next = self.clone();
        next.cells[index] = Some(self.to_move);
        next.to_move = self.to_move.other();
        Ok(next)
    }

    /// Draws a move uniformly at random from `legal_moves`.
    pub fn random_move<R: Rng>(&self, rng: &mut R) -> Result<Coord> {
        self.legal_moves()
            .choose(rng)
            .copied()
            .ok_or(MctsError::NoLegalMoves)
    }

    /// True iff `player` has an unbroken run of at least `win_len` marks in
    /// some row, column, or either diagonal direction.
    pub fn has_run(&self, player: Player) -> bool {
        for row in 0..self.size {
            for col in 0..self.size {
                for &(dr, dc) in &DIRECTIONS {
                    if self.run_from(row, col, dr, dc, player) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Checks the `win_len` cells starting at (`row`, `col`) along the given
    /// direction, bounds-checked against the grid.
    fn run_from(&self, row: usize, col: usize, dr: isize, dc: isize, player: Player) -> bool {
        for step in 0..self.win_len as isize {
            let r = row as isize + dr * step;
            let c = col as isize + dc * step;
            if r < 0 || c < 0 || r >= self.size as isize || c >= self.size as isize {
                return false;
            }
            if self.cells[r as usize * self.size + c as usize] != Some(player) {
                return false;
            }
        }
        true
    }

    /// The player holding a winning run, if any.
    pub fn winner(&self) -> Option<Player> {
        [Player::X, Player::O]
            .into_iter()
            .find(|&player| self.has_run(player))
    }

    /// True iff no empty cell remains.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }

    /// True iff either player has a winning run or the board is full.
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    /// First cell (row-major) where `other` differs from this board.
    ///
    /// A child position differs from its parent in exactly one cell, so this
    /// recovers the move that produced it.
    pub fn diff_one(&self, other: &Board) -> Option<Coord> {
        for row in 0..self.size {
            for col in 0..self.size {
                let at = Coord { row, col };
                if self.cell(at) != other.cell(at) {
                    return Some(at);
                }
            }
        }
        None
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                let symbol = match self.cells[row * self.size + col] {
                    Some(Player::X) => "X",
                    Some(Player::O) => "O",
                    None => ".",
                };
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        write!(f, "{} to move", self.to_move)
    }
}
