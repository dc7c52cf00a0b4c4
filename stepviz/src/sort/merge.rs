//! Top-down merge sort driven by an explicit task stack.
//!
//! Each pending recursive call is a [`Task`]. Dividing a range replaces its
//! task with three: the merge of the range, then the right half, then the left
//! half on top, so halves are handled left to right and merged afterwards.

use tracing::{debug, trace};

use super::{ArraySource, Highlights, SortEngine};
use crate::Stepper;
use crate::config::SortConfig;
use crate::error::ConfigResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Divide { left: usize, right: usize },
    Merge { left: usize, mid: usize, right: usize },
}

/// Merge in progress for the task on top of the stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeState {
    /// Copy of `array[left..=mid]` taken when the merge started.
    pub left_run: Vec<u32>,
    /// Copy of `array[mid + 1..=right]`.
    pub right_run: Vec<u32>,
    pub left_cursor: usize,
    pub right_cursor: usize,
    pub write: usize,
}

#[derive(Clone, Debug)]
pub struct MergeSort {
    array: Vec<u32>,
    source: ArraySource,
    stack: Vec<Task>,
    merge: Option<MergeState>,
    highlights: Highlights,
    steps: u64,
}

impl MergeSort {
    pub fn new(config: &SortConfig) -> ConfigResult<Self> {
        let mut source = ArraySource::new(config)?;
        let array = source.generate();
        let mut sort = Self {
            array: Vec::new(),
            source,
            stack: Vec::new(),
            merge: None,
            highlights: Highlights::default(),
            steps: 0,
        };
        sort.load_array(array);
        Ok(sort)
    }

    pub fn stack(&self) -> &[Task] {
        &self.stack
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    pub fn merge_state(&self) -> Option<&MergeState> {
        self.merge.as_ref()
    }

    fn divide(&mut self, left: usize, right: usize) {
        self.stack.pop();
        if left >= right {
            return;
        }

        let mid = (left + right) / 2;
        self.stack.push(Task::Merge { left, mid, right });
        self.stack.push(Task::Divide { left: mid + 1, right });
        self.stack.push(Task::Divide { left, right: mid });
        self.highlights.dividing = Some(left..=right);
    }

    fn merge_step(&mut self, left: usize, mid: usize, right: usize) {
        let Some(mut state) = self.merge.take() else {
            self.merge = Some(MergeState {
                left_run: self.array[left..=mid].to_vec(),
                right_run: self.array[mid + 1..=right].to_vec(),
                left_cursor: 0,
                right_cursor: 0,
                write: left,
            });
            self.highlights.merging = Some(left..=right);
            return;
        };

        let next_left = state.left_run.get(state.left_cursor).copied();
        let next_right = state.right_run.get(state.right_cursor).copied();
        let value = match (next_left, next_right) {
            (Some(l), Some(r)) => {
                self.highlights.comparing =
                    vec![left + state.left_cursor, mid + 1 + state.right_cursor];
                // ties take the left run to keep the merge stable
                if l <= r {
                    state.left_cursor += 1;
                    l
                } else {
                    state.right_cursor += 1;
                    r
                }
            }
            (Some(l), None) => {
                state.left_cursor += 1;
                l
            }
            (None, Some(r)) => {
                state.right_cursor += 1;
                r
            }
            (None, None) => {
                self.stack.pop();
                if self.stack.is_empty() {
                    debug!(steps = self.steps, "merge sort complete");
                }
                return;
            }
        };

        self.array[state.write] = value;
        state.write += 1;
        self.merge = Some(state);
        self.highlights.merging = Some(left..=right);
    }
}

impl Stepper for MergeSort {
    fn step_once(&mut self) {
        let Some(&task) = self.stack.last() else {
            return;
        };
        self.highlights.clear();
        self.steps += 1;

        match task {
            Task::Divide { left, right } => self.divide(left, right),
            Task::Merge { left, mid, right } => self.merge_step(left, mid, right),
        }
        trace!(steps = self.steps, depth = self.stack.len(), "merge step");
    }

    fn reset(&mut self) {
        let array = self.source.generate();
        self.load_array(array);
    }

    fn is_complete(&self) -> bool {
        self.stack.is_empty()
    }

    /// Every transition counts: divides, base cases, merge starts, writes and merge ends.
    fn steps(&self) -> u64 {
        self.steps
    }
}

impl SortEngine for MergeSort {
    fn name(&self) -> &'static str {
        "Merge Sort"
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
            self.stack.push(Task::Divide {
                left: 0,
                right: values.len() - 1,
            });
        }
        self.array = values;
        self.merge = None;
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

    fn merge_sort(values: Vec<u32>) -> MergeSort {
        let mut sort = MergeSort::new(&SortConfig {
            seed: Some(5),
            ..SortConfig::default()
        })
        .unwrap();
        sort.load_array(values);
        sort
    }

    #[test]
    fn divide_pushes_merge_right_left() {
        let mut sort = merge_sort(vec![4, 3, 2, 1]);
        sort.step_once();
        assert_eq!(
            sort.stack(),
            &[
                Task::Merge { left: 0, mid: 1, right: 3 },
                Task::Divide { left: 2, right: 3 },
                Task::Divide { left: 0, right: 1 },
            ]
        );
        assert_eq!(sort.highlights().dividing, Some(0..=3));
    }

    #[test]
    fn two_element_sequence() {
        let mut sort = merge_sort(vec![2, 1]);

        // divide [0..=1]
        sort.step_once();
        assert_eq!(sort.highlights().dividing, Some(0..=1));
        // base cases [0..=0] and [1..=1]
        sort.step_once();
        assert!(sort.highlights().is_empty());
        sort.step_once();
        assert!(sort.merge_state().is_none());

        // merge start stages both runs, no comparison yet
        sort.step_once();
        let state = sort.merge_state().unwrap();
        assert_eq!((state.left_run.clone(), state.right_run.clone()), (vec![2], vec![1]));
        assert_eq!(state.write, 0);
        assert_eq!(sort.highlights().merging, Some(0..=1));
        assert!(sort.highlights().comparing.is_empty());

        // compare heads, right wins
        sort.step_once();
        assert_eq!(sort.highlights().comparing, vec![0, 1]);
        assert_eq!(sort.array(), &[1, 1]);

        // copy the left leftover
        sort.step_once();
        assert!(sort.highlights().comparing.is_empty());
        assert_eq!(sort.array(), &[1, 2]);
        assert!(!sort.is_complete());

        // both runs exhausted
        sort.step_once();
        assert!(sort.is_complete());
        assert!(sort.merge_state().is_none());
        assert!(sort.highlights().is_empty());
        assert_eq!(sort.steps(), 7);
    }

    #[test]
    fn merge_is_stable_on_ties() {
        let mut sort = merge_sort(vec![5, 5]);
        for _ in 0..4 {
            sort.step_once();
        }
        sort.step_once();
        let state = sort.merge_state().unwrap();
        assert_eq!((state.left_cursor, state.right_cursor), (1, 0));
    }

    #[test]
    fn pending_divides_stay_logarithmic() {
        let n = 64;
        let mut sort = merge_sort((0..n).rev().collect());
        let mut max_divides = 0;
        while !sort.is_complete() {
            let divides = sort
                .stack()
                .iter()
                .filter(|task| matches!(task, Task::Divide { .. }))
                .count();
            max_divides = max_divides.max(divides);
            sort.step_once();
        }
        // one sibling per level plus the range on top
        assert!(max_divides <= 7, "max pending divides {max_divides}");
        assert_eq!(sort.array(), (0..n).collect::<Vec<_>>().as_slice());
    }

    #[test]
    fn trivial_arrays_start_complete() {
        let mut sort = merge_sort(vec![4]);
        assert!(sort.is_complete());
        sort.step_once();
        assert_eq!(sort.steps(), 0);
        assert!(merge_sort(vec![]).is_complete());
    }
}
