//! Bubble sort with the nested loops reified as two cursors.

use tracing::{debug, trace};

use super::{ArraySource, Highlights, SortEngine};
use crate::Stepper;
use crate::config::SortConfig;
use crate::error::ConfigResult;

/// One comparison (and at most one swap) per step.
#[derive(Clone, Debug)]
pub struct BubbleSort {
    array: Vec<u32>,
    source: ArraySource,
    /// Completed passes; the last `outer` slots are in final position.
    outer: usize,
    inner: usize,
    complete: bool,
    highlights: Highlights,
    comparisons: u64,
}

impl BubbleSort {
    pub fn new(config: &SortConfig) -> ConfigResult<Self> {
        let mut source = ArraySource::new(config)?;
        let array = source.generate();
        let mut sort = Self {
            array: Vec::new(),
            source,
            outer: 0,
            inner: 0,
            complete: false,
            highlights: Highlights::default(),
            comparisons: 0,
        };
        sort.load_array(array);
        Ok(sort)
    }

    /// `(outer, inner)` loop cursors.
    pub fn cursors(&self) -> (usize, usize) {
        (self.outer, self.inner)
    }
}

impl Stepper for BubbleSort {
    fn step_once(&mut self) {
        if self.complete {
            return;
        }
        self.highlights.clear();

        let n = self.array.len();
        if self.outer + 1 >= n {
            debug!(comparisons = self.comparisons, "bubble sort complete");
            self.complete = true;
            return;
        }

        let j = self.inner;
        if j + 1 < n - self.outer {
            if self.array[j] > self.array[j + 1] {
                self.array.swap(j, j + 1);
                self.highlights.swapped = vec![j, j + 1];
            }
            self.highlights.comparing = vec![j, j + 1];
            trace!(pass = self.outer, index = j, "compared");
            self.inner += 1;
            self.comparisons += 1;
        } else {
            // end of pass
            self.outer += 1;
            self.inner = 0;
        }
    }

    fn reset(&mut self) {
        let array = self.source.generate();
        self.load_array(array);
    }

    fn is_complete(&self) -> bool {
        self.complete
    }

    /// Comparisons performed so far.
    fn steps(&self) -> u64 {
        self.comparisons
    }
}

impl SortEngine for BubbleSort {
    fn name(&self) -> &'static str {
        "Bubble Sort"
    }

    fn array(&self) -> &[u32] {
        &self.array
    }

    fn highlights(&self) -> &Highlights {
        &self.highlights
    }

    fn load_array(&mut self, values: Vec<u32>) {
        self.complete = values.len() <= 1;
        self.array = values;
        self.outer = 0;
        self.inner = 0;
        self.highlights.clear();
        self.comparisons = 0;
    }

    fn source(&self) -> &ArraySource {
        &self.source
    }

    fn source_mut(&mut self) -> &mut ArraySource {
        &mut self.source
    }
}
