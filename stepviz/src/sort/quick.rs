//! Quick sort with Lomuto partitioning, recursion replaced by a range stack.

use tracing::{debug, trace};

use super::{ArraySource, Highlights, SortEngine};
use crate::Stepper;
use crate::config::SortConfig;
use crate::error::ConfigResult;

/// Inclusive index range still waiting to be partitioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub low: usize,
    pub high: usize,
}

/// Partition of the span on top of the stack. The pivot sits at `high`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    pub low: usize,
    pub high: usize,
    /// Next slot for an element `<=` the pivot.
    pub store: usize,
    /// Element compared next.
    pub scan: usize,
}

impl Partition {
    /// Index of the last element known to be `<=` the pivot.
    pub fn boundary(&self) -> Option<usize> {
        (self.store > self.low).then(|| self.store - 1)
    }
}

#[derive(Clone, Debug)]
pub struct QuickSort {
    array: Vec<u32>,
    source: ArraySource,
    stack: Vec<Span>,
    partition: Option<Partition>,
    highlights: Highlights,
    steps: u64,
}

impl QuickSort {
    pub fn new(config: &SortConfig) -> ConfigResult<Self> {
        let mut source = ArraySource::new(config)?;
        let array = source.generate();
        let mut sort = Self {
            array: Vec::new(),
            source,
            stack: Vec::new(),
            partition: None,
            highlights: Highlights::default(),
            steps: 0,
        };
        sort.load_array(array);
        Ok(sort)
    }

    pub fn stack(&self) -> &[Span] {
        &self.stack
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    pub fn partition(&self) -> Option<&Partition> {
        self.partition.as_ref()
    }

    fn start_partition(&mut self, Span { low, high }: Span) {
        if low >= high {
            self.stack.pop();
            return;
        }

        self.partition = Some(Partition {
            low,
            high,
            store: low,
            scan: low,
        });
        self.highlights.comparing = vec![high];
        self.highlights.pivot = Some(high);
        self.highlights.partition = Some(low..=high);
        self.steps += 1;
    }

    fn compare(&mut self, mut partition: Partition) {
        let Partition { low, high, scan, .. } = partition;

        if self.array[scan] <= self.array[high] {
            if partition.store != scan {
                self.array.swap(partition.store, scan);
                self.highlights.swapped = vec![partition.store, scan];
            }
            partition.store += 1;
        }
        partition.scan += 1;

        self.highlights.comparing = vec![scan, high];
        self.highlights.pivot = Some(high);
        self.highlights.partition = Some(low..=high);
        self.partition = Some(partition);
        self.steps += 1;
    }

    fn finish_partition(&mut self, Partition { low, high, store, .. }: Partition) {
        let pivot_pos = store;
        if pivot_pos != high {
            self.array.swap(pivot_pos, high);
            self.highlights.swapped = vec![pivot_pos, high];
        }

        self.stack.pop();
        // right first so the left part is partitioned next
        if pivot_pos + 1 < high {
            self.stack.push(Span {
                low: pivot_pos + 1,
                high,
            });
        }
        if pivot_pos > low + 1 {
            self.stack.push(Span {
                low,
                high: pivot_pos - 1,
            });
        }
        self.steps += 1;

        if self.stack.is_empty() {
            debug!(steps = self.steps, "quick sort complete");
            self.highlights.clear();
        }
    }
}

impl Stepper for QuickSort {
    fn step_once(&mut self) {
        self.highlights.clear();

        match self.partition.take() {
            None => {
                if let Some(&span) = self.stack.last() {
                    self.start_partition(span);
                }
            }
            Some(partition) if partition.scan < partition.high => self.compare(partition),
            Some(partition) => self.finish_partition(partition),
        }
        trace!(steps = self.steps, depth = self.stack.len(), "quick step");
    }

    fn reset(&mut self) {
        let array = self.source.generate();
        self.load_array(array);
    }

    fn is_complete(&self) -> bool {
        self.stack.is_empty() && self.partition.is_none()
    }

    /// Partition starts, comparisons and pivot placements.
    fn steps(&self) -> u64 {
        self.steps
    }
}

impl SortEngine for QuickSort {
    fn name(&self) -> &'static str {
        "Quick Sort"
    }

    fn array(&self) -> &[u32] {
        &self.array
    }

    fn highlights(&self) -> &Highlights {
        &self.highlights
    }

    fn load_array(&mut self, values: Vec<u32>) {
        self.stack.clear();
        if values.len() > 1 {
            self.stack.push(Span {
                low: 0,
                high: values.len() - 1,
            });
        }
        self.array = values;
        self.partition = None;
        self.highlights.clear();
        self.steps = 0;
    }

    fn source(&self) -> &ArraySource {
        &self.source
    }

    fn source_mut(&mut self) -> &mut ArraySource {
        &mut self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_sort(values: Vec<u32>) -> QuickSort {
        let mut sort = QuickSort::new(&SortConfig {
            seed: Some(9),
            ..SortConfig::default()
        })
        .unwrap();
        sort.load_array(values);
        sort
    }

    #[test]
    fn partition_walkthrough() {
        let mut sort = quick_sort(vec![3, 5, 1, 4, 2]);

        sort.step_once();
        assert_eq!(sort.highlights().comparing, vec![4]);
        assert_eq!(sort.highlights().pivot, Some(4));
        let partition = *sort.partition().unwrap();
        assert_eq!((partition.store, partition.scan), (0, 0));
        assert_eq!(partition.boundary(), None);

        // 3 > 2
        sort.step_once();
        assert_eq!(sort.highlights().comparing, vec![0, 4]);
        assert!(sort.highlights().swapped.is_empty());
        // 5 > 2
        sort.step_once();
        // 1 <= 2, moves to slot 0
        sort.step_once();
        assert_eq!(sort.array(), &[1, 5, 3, 4, 2]);
        assert_eq!(sort.highlights().swapped, vec![0, 2]);
        assert_eq!(sort.partition().unwrap().boundary(), Some(0));
        // 4 > 2
        sort.step_once();

        // pivot into slot 1
        sort.step_once();
        assert_eq!(sort.array(), &[1, 2, 3, 4, 5]);
        assert_eq!(sort.highlights().swapped, vec![1, 4]);
        assert!(sort.partition().is_none());
        assert_eq!(sort.stack(), &[Span { low: 2, high: 4 }]);
        assert_eq!(sort.steps(), 6);
    }

    #[test]
    fn left_range_is_processed_first() {
        let mut sort = quick_sort(vec![4, 1, 7, 6, 2, 5]);
        // start + 5 comparisons + placement
        for _ in 0..7 {
            sort.step_once();
        }
        let stack = sort.stack();
        assert_eq!(stack.len(), 2);
        assert!(stack[1].high < stack[0].low);
    }

    #[test]
    fn equal_elements_go_left() {
        let mut sort = quick_sort(vec![2, 2, 2]);
        while !sort.is_complete() {
            sort.step_once();
        }
        assert_eq!(sort.array(), &[2, 2, 2]);
    }

    #[test]
    fn stack_depth_is_bounded_by_length() {
        let n = 40;
        let mut sort = quick_sort((1..=n).collect());
        let mut max_depth = 0;
        while !sort.is_complete() {
            max_depth = max_depth.max(sort.stack_depth());
            sort.step_once();
        }
        assert!(max_depth <= n as usize);
        assert!(sort.highlights().is_empty());
    }

    #[test]
    fn trivial_arrays_start_complete() {
        let mut sort = quick_sort(vec![1]);
        assert!(sort.is_complete());
        sort.step_once();
        assert_eq!(sort.steps(), 0);
        assert!(quick_sort(vec![]).is_complete());
    }

    #[test]
    fn degenerate_span_is_popped() {
        let mut sort = quick_sort(vec![3, 1]);
        sort.stack.push(Span { low: 1, high: 1 });
        sort.step_once();
        assert_eq!(sort.stack(), &[Span { low: 0, high: 1 }]);
        assert_eq!(sort.steps(), 0);
        assert!(sort.partition().is_none());
    }
}
