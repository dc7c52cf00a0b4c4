//! Step-by-step engines for algorithm visualisation.
//!
//! Each engine is a standalone state machine: a driver calls
//! [`Stepper::step_once`] on demand or from a timer, then reads the engine's
//! accessors to render the current state. Nothing here schedules itself or
//! shares state between engines.
//!
//! ```
//! use stepviz::{BubbleSort, SortEngine, SortConfig, Stepper};
//!
//! let mut sort = BubbleSort::new(&SortConfig::default()).unwrap();
//! sort.load_array(vec![3, 1, 2]);
//! while !sort.is_complete() {
//!     sort.step_once();
//! }
//! assert_eq!(sort.array(), &[1, 2, 3]);
//! ```

pub mod config;
pub mod error;
pub mod grid;
pub mod life;
pub mod patterns;
pub mod sort;

pub use config::{GridConfig, SortConfig};
pub use error::{ConfigError, ConfigResult};
pub use grid::Grid;
pub use life::{Life, SeedMode};
pub use sort::{
    BubbleSort, Distribution, Highlights, MergeSort, QuickSort, Role, SortEngine,
};

/// Driver-facing interface shared by every engine.
pub trait Stepper {
    /// Performs one primitive transition. Does nothing once complete.
    fn step_once(&mut self);

    /// Regenerates or clears the primary data and drops all progress.
    fn reset(&mut self);

    fn is_complete(&self) -> bool;

    /// Progress counter: generations for the grid, counted operations for sorts.
    fn steps(&self) -> u64;

    /// True when auto-play has nothing more to show.
    fn settled(&self) -> bool {
        self.is_complete()
    }
}
