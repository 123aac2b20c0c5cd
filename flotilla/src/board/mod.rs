//! Types that make up the placement board.

use crate::fleet::ShipId;

use self::grid::Grid;
pub use self::{
    coordinate::{Coordinate, RawCell},
    dim::BoardDim,
    errors::{CannotPlaceReason, PlaceError},
    grid::Cell,
};

mod coordinate;
mod dim;
mod errors;
mod grid;

/// The occupancy grid for the placement phase. Records which cells hold a
/// hull and which are reserved as spacing around one, keyed by the owning
/// ship so that releasing a ship touches only its own cells.
///
/// The board has no notion of a gesture; checks are read-only and the only
/// writes go through [`place`][Board::place] and [`release`][Board::release].
#[derive(Debug)]
pub struct Board {
    grid: Grid,
}

/// The run of cells a ship of `len` occupies starting at `anchor`, extending
/// to the right. Ships place horizontally.
fn footprint(anchor: RawCell, len: usize) -> impl Iterator<Item = RawCell> {
    (0..len as i32).map(move |i| anchor.offset_col(i))
}

impl Board {
    /// Create an empty board with the given dimensions.
    pub fn new(dim: BoardDim) -> Self {
        Self {
            grid: Grid::new(dim),
        }
    }

    /// Get the dimensions of this board.
    pub fn dim(&self) -> BoardDim {
        self.grid.dim
    }

    /// Get the cell at the given [`Coordinate`], or `None` if it is out of
    /// bounds.
    pub fn get(&self, coord: Coordinate) -> Option<Cell> {
        self.grid.get(coord).copied()
    }

    /// Get an iterator over the rows of the board. Each row is an iterator
    /// over the cells of that row.
    pub fn iter_rows(
        &self,
    ) -> impl Iterator<Item = impl Iterator<Item = Cell> + '_> + '_ {
        let grid = &self.grid;
        grid.dim
            .iter_coordinates()
            .map(move |row| row.map(move |coord| grid[coord]))
    }

    /// Check whether a ship of `len` could occupy the run of cells starting
    /// at `anchor`. Every footprint cell must be on the board and empty, and
    /// no cell of the bounded 8-neighborhood of the footprint may hold a
    /// hull. A neighboring spacing buffer does not block placement; the
    /// spacing rule forbids hull-to-hull adjacency only.
    ///
    /// Read-only; used continuously while a ship is dragged and once more
    /// when it is dropped.
    pub fn check(&self, anchor: RawCell, len: usize) -> Result<(), CannotPlaceReason> {
        for cell in footprint(anchor, len) {
            let coord = match self.grid.dim.bound(cell) {
                Some(coord) => coord,
                None => return Err(CannotPlaceReason::OutOfBounds),
            };
            match self.grid[coord] {
                Cell::Empty => {}
                Cell::Hull(_) => return Err(CannotPlaceReason::Occupied),
                Cell::Buffer(_) => return Err(CannotPlaceReason::TooClose),
            }
            for neighbor in self.grid.dim.neighbors(coord) {
                if self.grid[neighbor].is_hull() {
                    return Err(CannotPlaceReason::TooClose);
                }
            }
        }
        Ok(())
    }

    /// Place a ship of `len` at `anchor`, claiming the footprint cells as
    /// hull and every bounded empty neighbor as spacing buffer. Returns the
    /// bounded anchor on success and leaves the grid untouched on failure.
    ///
    /// The ship must not currently own any cells; a ship being moved is
    /// [`release`][Board::release]d when its drag begins.
    pub fn place(
        &mut self,
        ship: ShipId,
        anchor: RawCell,
        len: usize,
    ) -> Result<Coordinate, PlaceError> {
        debug_assert!(
            !self.owns_cells(ship),
            "{:?} still owns cells; release before re-placing",
            ship
        );
        let origin = match self.grid.dim.bound(anchor) {
            Some(coord) => coord,
            None => {
                return Err(PlaceError::new(CannotPlaceReason::OutOfBounds, ship, anchor));
            }
        };
        self.check(anchor, len)
            .map_err(|reason| PlaceError::new(reason, ship, anchor))?;

        // Checked above, so every footprint cell bounds.
        let dim = self.grid.dim;
        for cell in footprint(anchor, len) {
            let coord = dim.bound(cell).expect("footprint was checked in bounds");
            self.grid[coord] = Cell::Hull(ship);
            for neighbor in dim.neighbors(coord) {
                if self.grid[neighbor].is_empty() {
                    self.grid[neighbor] = Cell::Buffer(ship);
                }
            }
        }
        Ok(origin)
    }

    /// Clear every cell owned by the given ship, then re-derive the spacing
    /// buffers of the hulls that remain. A buffer cell shared with another
    /// ship keeps its kind; only its recorded owner may change. Returns true
    /// if the ship owned any cells.
    pub fn release(&mut self, ship: ShipId) -> bool {
        let mut cleared = false;
        for cell in self.grid.cells_mut() {
            if cell.owner() == Some(ship) {
                *cell = Cell::Empty;
                cleared = true;
            }
        }
        if cleared {
            self.restore_buffers();
        }
        cleared
    }

    /// Return every cell to empty.
    pub fn reset(&mut self) {
        self.grid.clear();
    }

    /// Whether the given ship owns any cell of the grid.
    fn owns_cells(&self, ship: ShipId) -> bool {
        self.grid.cells.iter().any(|cell| cell.owner() == Some(ship))
    }

    /// Re-stamp the spacing buffers of every hull on the board. Restores the
    /// invariant that the buffers are exactly the bounded 8-neighborhood of
    /// the hulls after a release freed a shared buffer cell.
    fn restore_buffers(&mut self) {
        let dim = self.grid.dim;
        let hulls: Vec<(Coordinate, ShipId)> = self
            .grid
            .cells
            .iter()
            .enumerate()
            .filter_map(|(idx, cell)| match cell {
                Cell::Hull(owner) => Some((dim.un_linearize(idx), *owner)),
                _ => None,
            })
            .collect();
        for (coord, owner) in hulls {
            for neighbor in dim.neighbors(coord) {
                if self.grid[neighbor].is_empty() {
                    self.grid[neighbor] = Cell::Buffer(owner);
                }
            }
        }
    }
}

impl Default for Board {
    /// Construct a board with the default 10x10 dimensions.
    fn default() -> Self {
        Self::new(BoardDim::default())
    }
}
