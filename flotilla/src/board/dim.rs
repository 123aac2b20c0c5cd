use crate::board::{Coordinate, RawCell};

/// Dimensions of the placement board. Implements the bounds checks, index
/// linearization, and neighborhood iteration the grid is built on.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BoardDim {
    /// Width of the board. This cooresponds to the `col` axis.
    width: usize,
    /// Height of the board. This cooresponds to the `row` axis.
    height: usize,
}

impl BoardDim {
    /// Create new [`BoardDim`] with the specified width and height.
    /// Panics if `width * height` exceeds `usize::MAX` or if `width` or
    /// `height` is 0.
    pub fn new(width: usize, height: usize) -> Self {
        match Self::try_new(width, height) {
            Some(dim) => dim,
            None => {
                if width == 0 || height == 0 {
                    panic!("BoardDim must be nonzero, got {}x{}", width, height);
                } else {
                    panic!("BoardDim too large: {} * {} > {}", width, height, usize::MAX);
                }
            }
        }
    }

    /// Create new [`BoardDim`] with the specified width and height.
    /// Returns `None` if `width * height` exceeds `usize::MAX` or if `width`
    /// or `height` is 0.
    pub fn try_new(width: usize, height: usize) -> Option<Self> {
        if width == 0 || height == 0 {
            None
        } else {
            width.checked_mul(height).map(|_| Self { width, height })
        }
    }

    /// Get the width of these dimensions.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the height of these dimensions.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Compute the linear total size of these dimensions. Used to allocate
    /// storage for the grid.
    pub fn total_size(&self) -> usize {
        self.width * self.height
    }

    /// Check if the given [`RawCell`] lies on the board. If so, return the
    /// corresponding [`Coordinate`], otherwise return `None`.
    pub fn bound(&self, cell: RawCell) -> Option<Coordinate> {
        if cell.col >= 0
            && (cell.col as usize) < self.width
            && cell.row >= 0
            && (cell.row as usize) < self.height
        {
            Some(Coordinate::new(cell.col as usize, cell.row as usize))
        } else {
            None
        }
    }

    /// Convert a coordinate to a linear index within this dimension.
    /// Returns `None` if the coordinate is out of range for the dimension.
    pub fn try_linearize(&self, coord: Coordinate) -> Option<usize> {
        if coord.col < self.width && coord.row < self.height {
            Some(coord.row * self.width + coord.col)
        } else {
            None
        }
    }

    /// Convert a linear index back into a [`Coordinate`]. Panics if `idx` is
    /// >= `total_size`.
    pub fn un_linearize(&self, idx: usize) -> Coordinate {
        assert!(idx < self.total_size(), "{} out of range for {:?}", idx, self);
        Coordinate::new(idx % self.width, idx / self.width)
    }

    /// Get an iterator over rows of this grid. Each row is an iterator over
    /// the coordinates of that row.
    pub fn iter_coordinates(self) -> impl Iterator<Item = impl Iterator<Item = Coordinate>> {
        let width = self.width;
        (0..self.height).map(move |row| (0..width).map(move |col| Coordinate { col, row }))
    }

    /// Iterate the bounded 8-neighborhood of the given coordinate: every cell
    /// that shares an edge or corner with it, clipped to the board.
    pub fn neighbors(self, coord: Coordinate) -> impl Iterator<Item = Coordinate> {
        let center = RawCell::from(coord);
        (-1..=1)
            .flat_map(|drow| (-1..=1).map(move |dcol| (dcol, drow)))
            .filter(|&(dcol, drow)| dcol != 0 || drow != 0)
            .filter_map(move |(dcol, drow)| {
                self.bound(RawCell::new(center.col + dcol, center.row + drow))
            })
    }
}

impl Default for BoardDim {
    /// Construct the default dimensions, a 10x10 board.
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
        }
    }
}
