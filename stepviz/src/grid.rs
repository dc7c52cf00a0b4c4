// grid.rs - Fixed-size live/dead grid for the automaton engine

/// Moore neighbourhood offsets.
pub const NEIGHBORS: [(i64, i64); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1,  0),          (1,  0),
    (-1,  1), (0,  1), (1,  1),
];

/// Rectangular grid stored row-major, so every row is exactly `width` cells.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// All-dead grid of the given size. A zero side collapses the grid to 0×0
    /// so `height()` always equals the number of rows.
    pub fn new(width: usize, height: usize) -> Self {
        let (width, height) = if width == 0 || height == 0 {
            (0, 0)
        } else {
            (width, height)
        };
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Zero-sized in either direction.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Out-of-bounds coordinates read as dead.
    pub fn get(&self, x: i64, y: i64) -> bool {
        self.index(x, y).is_some_and(|i| self.cells[i])
    }

    /// Writes outside the grid are ignored.
    pub fn set(&mut self, x: i64, y: i64, alive: bool) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = alive;
        }
    }

    pub fn toggle(&mut self, x: i64, y: i64) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = !self.cells[i];
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Live cells among the eight neighbours; nothing wraps around.
    pub fn live_neighbors(&self, x: i64, y: i64) -> usize {
        NEIGHBORS
            .iter()
            .filter(|&&(dx, dy)| self.get(x + dx, y + dy))
            .count()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        // chunks() panics on a zero chunk size
        self.cells.chunks(self.width.max(1))
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Live cell coordinates in row-major order.
    pub fn live_cells(&self) -> Vec<(i64, i64)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(|(i, _)| ((i % self.width) as i64, (i / self.width) as i64))
            .collect()
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [bool] {
        &mut self.cells
    }
}
