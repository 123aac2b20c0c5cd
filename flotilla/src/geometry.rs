//! Mapping between screen-space pixel positions and board cells.

use crate::board::{Coordinate, RawCell};

/// A position in screen space, in pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PixelPos {
    pub x: f32,
    pub y: f32,
}

impl PixelPos {
    /// Construct a [`PixelPos`] from the given `x` and `y`.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for PixelPos {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

/// Horizontal compensation for a ship sprite's anchor point, in pixels.
/// Sprites longer than one cell anchor off-center by 15 px per cell of
/// length; the single-cell sprite is off by its length alone.
pub fn anchor_offset(ship_len: usize) -> f32 {
    if ship_len > 1 {
        ship_len as f32 * 15.0
    } else {
        ship_len as f32
    }
}

/// Placement of the board in screen space: the pixel position of its
/// top-left corner and the size of one (square) cell.
///
/// Converts pointer positions to cell indices and back. Performs no bounds
/// checking in either direction; a [`RawCell`] must be bounds-checked before
/// it indexes the grid.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoardGeometry {
    origin: PixelPos,
    cell_size: f32,
}

impl BoardGeometry {
    /// Create a [`BoardGeometry`] with the given origin and cell size.
    /// Panics if `cell_size` is not positive.
    pub fn new(origin: PixelPos, cell_size: f32) -> Self {
        assert!(cell_size > 0.0, "cell size must be positive, got {}", cell_size);
        Self { origin, cell_size }
    }

    /// The pixel position of the board's top-left corner.
    pub fn origin(&self) -> PixelPos {
        self.origin
    }

    /// The size of one cell in pixels.
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// The cell a ship sprite of the given length covers when its anchor sits
    /// at `pos`. May lie outside the board.
    pub fn cell_at(&self, pos: PixelPos, ship_len: usize) -> RawCell {
        let col = ((pos.x - (self.origin.x + anchor_offset(ship_len))) / self.cell_size).floor();
        let row = ((pos.y - self.origin.y) / self.cell_size).floor();
        RawCell::new(col as i32, row as i32)
    }

    /// The pixel position that centers a ship sprite of the given length on
    /// the given cell: the cell's center plus the sprite's anchor offset.
    /// Inverse of [`cell_at`][BoardGeometry::cell_at] on cell centers.
    pub fn snap(&self, coord: Coordinate, ship_len: usize) -> PixelPos {
        let half = self.cell_size / 2.0;
        PixelPos::new(
            coord.col as f32 * self.cell_size + self.origin.x + half + anchor_offset(ship_len),
            coord.row as f32 * self.cell_size + self.origin.y + half,
        )
    }
}

impl Default for BoardGeometry {
    /// Board at the screen origin with the standard 50 px cells.
    fn default() -> Self {
        Self {
            origin: PixelPos::new(0.0, 0.0),
            cell_size: 50.0,
        }
    }
}
