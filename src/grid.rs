use crate::input::Direction;

/// Logical grid dimensions in cell units.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Returns the cell a fresh snake starts on.
    #[must_use]
    pub fn center(self) -> Cell {
        Cell {
            x: i32::from(self.width / 2),
            y: i32::from(self.height / 2),
        }
    }

    /// Returns true when the cell lies inside the grid.
    #[must_use]
    pub fn contains(self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && cell.x < i32::from(self.width)
            && cell.y < i32::from(self.height)
    }
}

/// One grid position, column `x` and row `y`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring cell in `direction`, wrapped onto the torus.
    #[must_use]
    pub fn stepped(self, direction: Direction, bounds: GridSize) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: wrap(self.x + dx, i32::from(bounds.width)),
            y: wrap(self.y + dy, i32::from(bounds.height)),
        }
    }

    /// Top-left pixel of this cell on a screen with square cells of `cell_size` pixels.
    #[must_use]
    pub fn to_pixels(self, cell_size: u16) -> (i32, i32) {
        let size = i32::from(cell_size);
        (self.x * size, self.y * size)
    }

    /// Cell containing the pixel `(x, y)`.
    #[must_use]
    pub fn from_pixels(x: i32, y: i32, cell_size: u16) -> Self {
        let size = i32::from(cell_size.max(1));
        Self {
            x: x.div_euclid(size),
            y: y.div_euclid(size),
        }
    }
}

/// Wraps `coord` into `[0, size)`.
///
/// Applied to each axis independently, this turns the grid into a torus:
/// leaving the right edge re-enters on the left in the same row, and the
/// same for top and bottom.
#[must_use]
pub fn wrap(coord: i32, size: i32) -> i32 {
    debug_assert!(size > 0);
    coord.rem_euclid(size)
}
