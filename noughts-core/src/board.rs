//! 3x3 board, cells, sides and winning lines

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of cells on the board
pub const BOARD_CELLS: usize = 9;

/// Every row, column and diagonal, in evaluation order
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // cols
    [0, 4, 8],
    [2, 4, 6], // diags
];

// ============================================================================
// SIDES AND CELLS
// ============================================================================

/// One of the two players
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    X,
    O,
}

/// The human player (minimizer)
pub const HUMAN: Side = Side::X;

/// The automated player (maximizer)
pub const ENGINE: Side = Side::O;

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::X => Side::O,
            Side::O => Side::X,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Side::X => "X",
            Side::O => "O",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Contents of a single cell.
///
/// On the wire a cell is one of `""`, `"X"` or `"O"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Cell {
    #[default]
    Empty,
    X,
    O,
}

impl Cell {
    /// Parse a wire symbol
    pub fn from_symbol(symbol: &str) -> Result<Self> {
        match symbol {
            "" => Ok(Cell::Empty),
            "X" => Ok(Cell::X),
            "O" => Ok(Cell::O),
            other => Err(EngineError::InvalidCell {
                symbol: other.to_string(),
            }),
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Cell::Empty => "",
            Cell::X => "X",
            Cell::O => "O",
        }
    }

    /// The side occupying this cell, if any
    pub fn side(self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Side::X),
            Cell::O => Some(Side::O),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    fn notation(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }
}

impl From<Side> for Cell {
    fn from(side: Side) -> Self {
        match side {
            Side::X => Cell::X,
            Side::O => Cell::O,
        }
    }
}

impl From<Cell> for &'static str {
    fn from(cell: Cell) -> Self {
        cell.symbol()
    }
}

impl TryFrom<String> for Cell {
    type Error = EngineError;

    fn try_from(symbol: String) -> Result<Self> {
        Cell::from_symbol(&symbol)
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// Board cells in row-major order (copy to mutate)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Cell>", into = "Vec<Cell>")]
pub struct Board {
    cells: [Cell; BOARD_CELLS],
}

impl Board {
    pub const fn empty() -> Self {
        Self {
            cells: [Cell::Empty; BOARD_CELLS],
        }
    }

    /// Build a board from exactly nine cells
    pub fn from_cells(cells: &[Cell]) -> Result<Self> {
        let cells: [Cell; BOARD_CELLS] = cells
            .try_into()
            .map_err(|_| EngineError::InvalidLength { len: cells.len() })?;
        Ok(Self { cells })
    }

    /// Build a board from nine wire symbols
    pub fn from_symbols<S: AsRef<str>>(symbols: &[S]) -> Result<Self> {
        if symbols.len() != BOARD_CELLS {
            return Err(EngineError::InvalidLength { len: symbols.len() });
        }
        let cells = symbols
            .iter()
            .map(|s| Cell::from_symbol(s.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::from_cells(&cells)
    }

    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    pub fn cells(&self) -> &[Cell; BOARD_CELLS] {
        &self.cells
    }

    /// Indices of empty cells, ascending
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(index, _)| index)
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// Number of marks a side has on the board
    pub fn count(&self, side: Side) -> usize {
        let cell = Cell::from(side);
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Return a new board with `side` placed at `index`
    pub fn play(&self, index: usize, side: Side) -> Result<Self> {
        let current = self
            .get(index)
            .ok_or(EngineError::IndexOutOfRange { index })?;
        if !current.is_empty() {
            return Err(EngineError::IllegalMove { index });
        }
        let mut next = *self;
        next.cells[index] = side.into();
        Ok(next)
    }

    /// Compact notation, e.g. `XX..O....`
    pub fn to_notation(&self) -> String {
        self.cells.iter().map(|c| c.notation()).collect()
    }

    // In-place edits for the search's scratch board. Callers guarantee
    // `index` is in range and each `place` is paired with a `clear`.
    pub(crate) fn place(&mut self, index: usize, side: Side) {
        self.cells[index] = side.into();
    }

    pub(crate) fn clear(&mut self, index: usize) {
        self.cells[index] = Cell::Empty;
    }
}

/// Row and column of a cell index
pub fn coords(index: usize) -> (usize, usize) {
    (index / 3, index % 3)
}

impl TryFrom<Vec<Cell>> for Board {
    type Error = EngineError;

    fn try_from(cells: Vec<Cell>) -> Result<Self> {
        Board::from_cells(&cells)
    }
}

impl From<Board> for Vec<Cell> {
    fn from(board: Board) -> Self {
        board.cells.to_vec()
    }
}

/// Parses `XO.` style notation. Whitespace, `/` and `|` are ignored;
/// `.`, `-` and `_` mark empty cells.
impl FromStr for Board {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        let cells = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/' && *c != '|')
            .map(|c| match c {
                'x' | 'X' => Ok(Cell::X),
                'o' | 'O' => Ok(Cell::O),
                '.' | '-' | '_' => Ok(Cell::Empty),
                other => Err(EngineError::InvalidCell {
                    symbol: other.to_string(),
                }),
            })
            .collect::<Result<Vec<_>>>()?;
        Board::from_cells(&cells)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.cells.chunks(3).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            let line: Vec<String> = chunk.iter().map(|c| c.notation().to_string()).collect();
            write!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
