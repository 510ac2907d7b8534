use alloc::collections::{BTreeSet, VecDeque};
use alloc::vec::Vec;
use core::fmt;
use ndarray::Array2;
use rand::prelude::*;

use crate::*;

/// Game progress. Transitions exactly once from `InProgress` to a terminal
/// value and never reverts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Win,
    Loss,
}

impl Outcome {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Win | Self::Loss)
    }
}

impl Default for Outcome {
    fn default() -> Self {
        Self::InProgress
    }
}

/// Result of a single [`Board::reveal`] call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Opened,
    Exploded,
    Won,
}

/// Result of a single [`Board::toggle_flag`] call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Toggled,
    /// Refused: the target is an opened cell showing a positive count.
    RevealedNumber,
}

/// Owns the tile grid and enforces every game invariant.
///
/// Mines are not placed at construction. The first `reveal` of a game places
/// them, excluding the revealed coordinate, so the opening move never hits a
/// mine.
#[derive(Debug)]
pub struct Board {
    rows: Coord,
    cols: Coord,
    mines: CellCount,
    grid: Array2<Tile>,
    opened: CellCount,
    outcome: Outcome,
    confirmed_flags: BTreeSet<Coord2>,
    rng: SmallRng,
    mines_placed: bool,
}

const fn grid_index((row, col): Coord2) -> (usize, usize) {
    (row as usize, col as usize)
}

impl Board {
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        if config.mines >= config.total_cells() {
            return Err(GameError::TooManyMines);
        }
        Ok(Self {
            rows: config.rows,
            cols: config.cols,
            mines: config.mines,
            grid: Array2::default(grid_index(config.size())),
            opened: 0,
            outcome: Outcome::default(),
            confirmed_flags: BTreeSet::new(),
            rng: SmallRng::seed_from_u64(seed),
            mines_placed: false,
        })
    }

    /// Builds a board with a fixed mine layout, for deterministic play.
    /// Duplicate coordinates collapse; off-grid coordinates are rejected.
    pub fn with_mines((rows, cols): Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let unique: BTreeSet<Coord2> = mine_coords.iter().copied().collect();
        let config = GameConfig::new(rows, cols, unique.len() as CellCount);
        let mut board = Self::new(config, 0)?;

        for &coord in &unique {
            if coord.0 >= rows || coord.1 >= cols {
                return Err(GameError::InvalidCoords);
            }
            board.arm(coord);
        }
        board.mines_placed = true;
        Ok(board)
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn mine_count(&self) -> CellCount {
        self.mines
    }

    pub const fn opened_count(&self) -> CellCount {
        self.opened
    }

    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub const fn safe_cell_count(&self) -> CellCount {
        cell_total(self.rows, self.cols) - self.mines
    }

    /// Flags currently sitting on actual mines. Reaching `mine_count` is the
    /// flag-based win condition, checked by the controller between turns.
    pub fn confirmed_flag_count(&self) -> CellCount {
        self.confirmed_flags.len() as CellCount
    }

    /// Tile at `coord`, or `None` when the coordinate is off the grid.
    pub fn lookup(&self, coord: Coord2) -> Option<&Tile> {
        self.grid.get(grid_index(coord))
    }

    /// Opens the cell at `coord`, flood-filling outward from zero-count
    /// cells with a work list; the already-opened check is the termination
    /// base case. Opening an opened cell or an off-grid coordinate changes
    /// nothing, and a finished board accepts no further moves.
    pub fn reveal(&mut self, coord: Coord2) -> RevealOutcome {
        if self.outcome.is_terminal() || self.lookup(coord).is_none() {
            return RevealOutcome::NoChange;
        }
        if self.opened == 0 && !self.mines_placed {
            self.place_mines(coord);
        }

        let safe_cells = self.safe_cell_count();
        let mut outcome = RevealOutcome::NoChange;
        let mut to_open: VecDeque<Coord2> = VecDeque::from([coord]);

        while let Some(next) = to_open.pop_front() {
            let tile = &mut self.grid[grid_index(next)];
            if tile.opened {
                continue;
            }

            tile.opened = true;
            tile.flagged = false;
            let armed = tile.armed;
            let hint = tile.adjacent_mines;
            self.opened += 1;

            if armed {
                if !self.outcome.is_terminal() {
                    self.outcome = Outcome::Loss;
                }
                outcome = RevealOutcome::Exploded;
                log::debug!("mine hit at {:?}", next);
            } else if self.opened == safe_cells {
                if !self.outcome.is_terminal() {
                    self.outcome = Outcome::Win;
                    outcome = RevealOutcome::Won;
                }
            } else if outcome == RevealOutcome::NoChange {
                outcome = RevealOutcome::Opened;
            }

            // Zero-count cells cascade into every in-grid neighbor. A
            // neighbor that is a mine would have made this count non-zero,
            // so the cascade can never open one.
            if hint == 0 {
                to_open.extend(neighbors(next, self.size()));
            }
        }

        outcome
    }

    /// Toggles the flag at `coord`. Flagging an opened number cell is
    /// refused; anything else, including an opened empty cell, toggles.
    /// Membership in the confirmed-flag set is kept in step: flagging an
    /// unflagged mine confirms it, any further toggle withdraws it.
    pub fn toggle_flag(&mut self, coord: Coord2) -> FlagOutcome {
        if self.outcome.is_terminal() {
            return FlagOutcome::NoChange;
        }
        let Some(&tile) = self.lookup(coord) else {
            return FlagOutcome::NoChange;
        };

        if self.confirmed_flags.contains(&coord) {
            self.confirmed_flags.remove(&coord);
        } else if tile.is_armed() && !tile.is_flagged() {
            self.confirmed_flags.insert(coord);
        }

        if tile.adjacent_mines() > 0 && tile.is_opened() && !tile.is_armed() {
            return FlagOutcome::RevealedNumber;
        }

        self.grid[grid_index(coord)].toggle_flag();
        FlagOutcome::Toggled
    }

    /// Marks every mine for display. Used when rendering a finished game;
    /// no other state changes.
    pub fn reveal_all_mines(&mut self) {
        for tile in self.grid.iter_mut() {
            if tile.armed {
                tile.triggered = true;
            }
        }
    }

    /// Shuffle-take placement over every coordinate except the opening one.
    /// Hints are computed here as well, by bumping the counter of each
    /// mine's neighbors.
    fn place_mines(&mut self, start: Coord2) {
        let mut coords: Vec<Coord2> = (0..self.rows)
            .flat_map(|row| (0..self.cols).map(move |col| (row, col)))
            .filter(|&coord| coord != start)
            .collect();
        coords.shuffle(&mut self.rng);

        for &coord in coords.iter().take(self.mines as usize) {
            self.arm(coord);
        }
        self.mines_placed = true;
        log::debug!("placed {} mines, first reveal at {:?}", self.mines, start);
    }

    fn arm(&mut self, coord: Coord2) {
        self.grid[grid_index(coord)].armed = true;
        for neighbor in neighbors(coord, self.size()) {
            self.grid[grid_index(neighbor)].record_adjacent_mine();
        }
    }

    fn write_border(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "-|")?;
        for _ in 0..self.cols {
            write!(f, "-")?;
        }
        write!(f, "|")
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " |")?;
        for col in 1..=self.cols {
            write!(f, "{col}")?;
        }
        writeln!(f, "|")?;

        self.write_border(f)?;
        writeln!(f)?;

        for row in 0..self.rows {
            write!(f, "{}|", row + 1)?;
            for col in 0..self.cols {
                write!(f, "{}", self.grid[(row as usize, col as usize)])?;
            }
            writeln!(f, "|")?;
        }

        self.write_border(f)
    }
}
