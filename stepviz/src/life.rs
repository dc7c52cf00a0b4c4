// life.rs - Conway's Game of Life as a single-stepping engine

use std::collections::hash_map::DefaultHasher;
use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::Stepper;
use crate::config::{GridConfig, MAX_GRID_DIM, check_max};
use crate::error::ConfigResult;
use crate::grid::Grid;
use crate::patterns;

/// Generations remembered for cycle detection.
const HISTORY_LEN: usize = 10;

/// How `seed` fills the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedMode {
    /// Every cell independently alive with probability 0.5.
    Random,
    /// A named entry of the pattern table; unknown names give an empty grid.
    Pattern(String),
}

impl From<&str> for SeedMode {
    fn from(mode: &str) -> Self {
        match mode.trim() {
            "random" => SeedMode::Random,
            name => SeedMode::Pattern(name.to_string()),
        }
    }
}

impl FromStr for SeedMode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for SeedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedMode::Random => write!(f, "random"),
            SeedMode::Pattern(name) => write!(f, "{name}"),
        }
    }
}

/// Game of Life over a fixed, non-wrapping grid.
#[derive(Clone, Debug)]
pub struct Life {
    grid: Grid,
    next_grid: Grid,
    generation: u64,
    rng: StdRng,
    grid_history: [u64; HISTORY_LEN],
    history_count: usize,
    settled: bool,
}

impl Life {
    /// Builds the grid and applies the configured seed mode.
    pub fn new(config: &GridConfig) -> ConfigResult<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut life = Self {
            grid: Grid::new(config.width, config.height),
            next_grid: Grid::new(config.width, config.height),
            generation: 0,
            rng,
            grid_history: [0; HISTORY_LEN],
            history_count: 0,
            settled: false,
        };
        life.seed(&config.seed_mode);
        Ok(life)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.grid.population()
    }

    /// Reallocates to all-dead cells of the new size. Oversized sides are
    /// rejected and leave the grid untouched.
    pub fn resize(&mut self, width: usize, height: usize) -> ConfigResult<()> {
        check_max("width", width, MAX_GRID_DIM)?;
        check_max("height", height, MAX_GRID_DIM)?;
        debug!(width, height, "resizing grid");
        self.grid = Grid::new(width, height);
        self.next_grid = Grid::new(width, height);
        self.generation = 0;
        self.clear_history();
        Ok(())
    }

    /// Out-of-bounds writes are ignored; the generation is left alone.
    pub fn set_cell(&mut self, x: i64, y: i64, alive: bool) {
        self.grid.set(x, y, alive);
        self.clear_history();
    }

    pub fn toggle_cell(&mut self, x: i64, y: i64) {
        self.grid.toggle(x, y);
        self.clear_history();
    }

    /// Replaces the whole grid and restarts the generation count.
    pub fn seed(&mut self, mode: &SeedMode) {
        match mode {
            SeedMode::Random => {
                let rng = &mut self.rng;
                for cell in self.grid.cells_mut() {
                    *cell = rng.gen_bool(0.5);
                }
            }
            SeedMode::Pattern(name) => match patterns::find(name) {
                Some(pattern) => pattern.stamp(&mut self.grid),
                None => {
                    debug!(pattern = %name, "unknown pattern, leaving grid empty");
                    self.grid.clear();
                }
            },
        }
        debug!(mode = %mode, population = self.grid.population(), "seeded grid");
        self.generation = 0;
        self.clear_history();
    }

    fn hash_grid(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.grid.hash(&mut hasher);
        hasher.finish()
    }

    fn check_for_cycle(&mut self) -> bool {
        let current_hash = self.hash_grid();
        let seen = self.history_count.min(HISTORY_LEN);
        if self.grid_history[..seen].contains(&current_hash) {
            return true;
        }
        self.grid_history[self.history_count % HISTORY_LEN] = current_hash;
        self.history_count += 1;
        false
    }

    fn clear_history(&mut self) {
        self.grid_history = [0; HISTORY_LEN];
        self.history_count = 0;
        self.settled = false;
    }
}

impl Stepper for Life {
    fn step_once(&mut self) {
        if self.grid.is_empty() {
            return;
        }
        if self.history_count == 0 {
            // remember the starting generation too
            self.check_for_cycle();
        }

        let width = self.grid.width() as i64;
        let height = self.grid.height() as i64;
        for y in 0..height {
            for x in 0..width {
                let count = self.grid.live_neighbors(x, y);
                let next_state = match (self.grid.get(x, y), count) {
                    (true, 2) | (true, 3) => true, // Survival
                    (false, 3) => true,            // Birth
                    _ => false,                    // Death or stays dead
                };
                self.next_grid.set(x, y, next_state);
            }
        }

        std::mem::swap(&mut self.grid, &mut self.next_grid);
        self.generation += 1;
        trace!(generation = self.generation, "stepped grid");

        if !self.settled && self.check_for_cycle() {
            debug!(generation = self.generation, "grid settled into a cycle");
            self.settled = true;
        }
    }

    /// Clears every cell.
    fn reset(&mut self) {
        self.grid.clear();
        self.generation = 0;
        self.clear_history();
    }

    fn is_complete(&self) -> bool {
        self.grid.is_empty()
    }

    fn steps(&self) -> u64 {
        self.generation
    }

    fn settled(&self) -> bool {
        self.is_complete() || self.settled
    }
}
